use clap::Parser;
use std::path::PathBuf;

/// Directories scanned on every run, relative to the working directory
pub const SCAN_DIRECTORIES: &[&str] = &[
    "static",
    "themes/mussell-portfolio/assets",
    "themes/mussell-portfolio/static",
];

/// Strip EXIF, IPTC and XMP metadata from the site's images.
///
/// Scans static/, themes/mussell-portfolio/assets/ and
/// themes/mussell-portfolio/static/ for JPEG and PNG files and rewrites each
/// one in place with pixel data only. Exits 0 when every image was scrubbed
/// (or none were found) and 1 when any image failed.
#[derive(Debug, Parser)]
#[command(name = "image-scrubber", version)]
pub struct Args {}

impl Args {
    /// The fixed set of directories to scan
    pub fn directories(&self) -> Vec<PathBuf> {
        SCAN_DIRECTORIES.iter().map(PathBuf::from).collect()
    }
}
