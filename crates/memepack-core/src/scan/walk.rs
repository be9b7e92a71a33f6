use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::normalize_extension;

/// Lower-cased extension with its dot, if the file has one
pub fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
}

fn is_pruned(entry: &DirEntry, skip_dirs: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && skip_dirs.contains(entry.file_name().to_string_lossy().as_ref())
}

/// Recursively list asset files under `root`.
///
/// Directories named in `skip_dirs` are not descended into. Symlinked
/// directories are not followed; symlinked files are kept. Unreadable
/// entries are skipped.
pub fn find_files(
    root: &Path,
    skip_dirs: &BTreeSet<String>,
    extensions: &BTreeSet<String>,
) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_pruned(e, skip_dirs))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(error = %err, "walk_entry_skipped");
                None
            }
        })
        .filter(|e| !e.file_type().is_dir() && e.path().is_file())
        .filter(|e| file_extension(e.path()).is_some_and(|ext| extensions.contains(&ext)))
        .map(DirEntry::into_path)
        .collect()
}
