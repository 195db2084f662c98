//! Recursive directory traversal.
//!
//! Builds the ordered file list behind [`Collection::from_dir`](crate::model::Collection::from_dir).
//! Entries are visited in file-name order so the same tree always yields the
//! same sequence. Unreadable entries are skipped with a warning rather than
//! aborting the walk.

use crate::error::{FiletagError, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Traversal options, usually taken from [`FiletagConfig`](crate::config::FiletagConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Descend into symlinked directories and include symlinked files.
    pub follow_links: bool,
    /// Include dot-files and dot-directories below the root.
    pub include_hidden: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

/// Collect every regular file below `dir`, canonicalized.
///
/// Fails with `InvalidPath` if `dir` does not exist or is not a directory.
pub fn collect_files(dir: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FiletagError::invalid_path(dir, "not a directory"));
    }

    let walker = WalkDir::new(dir)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || options.include_hidden || !is_hidden(e));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match std::fs::canonicalize(entry.path()) {
            Ok(path) => files.push(path),
            Err(e) => warn!("skipping {}: {}", entry.path().display(), e),
        }
    }

    Ok(files)
}
