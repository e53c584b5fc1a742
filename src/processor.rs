use std::path::{Path, PathBuf};

use crate::finder::find_images;
use crate::scrubber::scrub_image;

const RULE_WIDTH: usize = 50;

/// Exit status when every image was scrubbed, or there were none
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status when at least one image failed
pub const EXIT_FAILURE: u8 = 1;

pub struct Processor {
    directories: Vec<PathBuf>,
    stats: RunSummary,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn exit_status(&self) -> u8 {
        if self.failed == 0 {
            EXIT_SUCCESS
        } else {
            EXIT_FAILURE
        }
    }
}

impl Processor {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Processor {
            directories,
            stats: RunSummary::default(),
        }
    }

    /// Scan, scrub every image found one after another, and summarise
    pub fn run(&mut self) -> RunSummary {
        println!("Image Metadata Scrubber");
        println!("{}", "=".repeat(RULE_WIDTH));
        println!();
        println!("Scanning for images...");

        let images = find_images(self.directories.as_slice());
        self.stats.total_files = images.len();

        if images.is_empty() {
            println!("✓ No images found to process.");
            return self.stats;
        }

        println!("Found {} image(s) to process", images.len());
        println!();

        let total = images.len();
        for (index, path) in images.iter().enumerate() {
            println!("[{}/{}] Processing: {}", index + 1, total, path.display());
            if self.scrub_file(path) {
                self.stats.succeeded += 1;
            } else {
                self.stats.failed += 1;
            }
            println!();
        }

        self.print_summary();
        self.stats
    }

    /// Scrub a single file; errors stop here and become a `false`
    fn scrub_file(&self, path: &Path) -> bool {
        match scrub_image(path) {
            Ok(report) => {
                println!(
                    "  ✓ Metadata removed successfully ({:?} {}x{}, {})",
                    report.format,
                    report.width,
                    report.height,
                    report.removed.describe()
                );
                true
            }
            Err(e) => {
                let err = anyhow::Error::new(e);
                eprintln!("  ✗ Error processing {}: {:#}", path.display(), err);
                false
            }
        }
    }

    fn print_summary(&self) {
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("✓ Successfully processed: {}", self.stats.succeeded);
        if self.stats.failed > 0 {
            eprintln!("✗ Failed: {}", self.stats.failed);
            println!();
            println!("Some images could not be scrubbed and may still carry metadata.");
        } else {
            println!();
            println!("All image metadata has been scrubbed for privacy protection.");
        }
    }
}
