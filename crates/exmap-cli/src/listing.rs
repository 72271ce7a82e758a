//! Directory listing. Only file names reach the core library.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;
use walkdir::WalkDir;

/// File names under `folder`, sorted. Subfolders are only entered when
/// `recursive` is set.
pub fn list_filenames(folder: &Path, recursive: bool) -> Result<Vec<String>> {
    let metadata = fs::metadata(folder)
        .with_context(|| format!("Cannot read folder {}", folder.display()))?;
    if !metadata.is_dir() {
        bail!("Not a directory: {}", folder.display());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut names = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(max_depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => warn!("Skipping non-UTF-8 file name: {}", entry.path().display()),
        }
    }

    names.sort();
    Ok(names)
}
