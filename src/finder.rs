use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions treated as images, matched case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Recursively collect image files under each directory.
///
/// Missing directories and unreadable entries produce a warning on stderr and
/// are skipped; the remaining directories are still scanned.
pub fn find_images<P: AsRef<Path>>(directories: &[P]) -> Vec<PathBuf> {
    let mut images = Vec::new();

    for dir in directories {
        let dir = dir.as_ref();

        if !dir.exists() {
            eprintln!("⚠ Directory not found: {}", dir.display());
            continue;
        }
        if !dir.is_dir() {
            eprintln!("⚠ Not a directory: {}", dir.display());
            continue;
        }

        for entry_result in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    if let Some(path) = err.path() {
                        eprintln!("⚠ Failed to access {}: {}", path.display(), err);
                    } else {
                        eprintln!("⚠ Directory walk error: {}", err);
                    }
                    continue;
                }
            };

            // Linked directories are not descended into; linked files count
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if is_image_file(path) {
                images.push(path.to_path_buf());
            }
        }
    }

    images
}

/// Check a path against the extension allow-list
pub fn is_image_file(path: &Path) -> bool {
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    // Skip AppleDouble files (._*), they are resource forks not images
    if filename.starts_with("._") {
        return false;
    }

    match path.extension() {
        Some(ext) => IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}
