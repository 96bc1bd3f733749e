//! Directory scanner module.
//!
//! Lists the playable video files directly inside a catalog directory.
//! Subdirectories are not descended into.

use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Video file extensions the displays can play.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v"];

/// Check if a file extension is a playable video format.
fn is_video_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    VIDEO_EXTENSIONS.contains(&ext_lower.as_str())
}

/// Check if a file name is hidden (starts with a dot).
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Validate that `path` exists and is a directory.
pub fn validate_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// List video files in a directory.
///
/// Hidden entries and files with other extensions are skipped, and so are
/// entries that cannot be read (e.g. broken symlinks). Failing to read the
/// directory itself is an error. The result is sorted by path so repeated
/// scans of an unchanged directory are identical.
pub fn list_video_files(path: &Path) -> Result<Vec<PathBuf>> {
    validate_directory(path)?;

    let mut files = Vec::new();
    let mut total_files_scanned = 0usize;

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The catalog directory itself could not be read.
            Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        total_files_scanned += 1;

        let name = entry.file_name().to_string_lossy();
        if is_hidden(&name) {
            tracing::debug!("Skipping hidden file: {}", entry.path().display());
            continue;
        }

        let playable = entry
            .path()
            .extension()
            .map(|ext| is_video_extension(&ext.to_string_lossy()))
            .unwrap_or(false);
        if playable {
            files.push(entry.into_path());
        }
    }

    files.sort();

    tracing::debug!(
        "Scanned {} files in {}: {} videos",
        total_files_scanned,
        path.display(),
        files.len()
    );

    Ok(files)
}
