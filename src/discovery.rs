//! Finding working copies inside a projects directory.

use std::path::{Path, PathBuf};

use log::warn;
use serde::Serialize;
use walkdir::WalkDir;

use crate::manager::is_working_copy;

/// A working copy found by [`discover_working_copies`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkingCopyEntry {
    /// Directory name.
    pub name: String,
    pub path: PathBuf,
}

/// Immediate subdirectories of `directory` that are working copies, sorted
/// by name ignoring case.
///
/// A missing directory yields an empty list. Entries that cannot be read
/// are skipped with a warning.
pub fn discover_working_copies(directory: &Path) -> Vec<WorkingCopyEntry> {
    if !directory.is_dir() {
        return Vec::new();
    }

    let mut entries: Vec<WorkingCopyEntry> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping entry in {}: {}", directory.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir() && is_working_copy(entry.path()))
        .map(|entry| WorkingCopyEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        })
        .collect();

    entries.sort_by_cached_key(|entry| entry.name.to_lowercase());
    entries
}
