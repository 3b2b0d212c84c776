//! Filesystem collaborator for the tool-cache and registry scans.

use std::path::{Path, PathBuf};

/// Existence checks and child-directory listing.
///
/// The discovery policy only ever reads the filesystem; all writes happen
/// inside the delegated package managers.
pub trait FileSystem: Send + Sync {
    /// True when `path` exists and is a directory.
    fn dir_exists(&self, path: &Path) -> bool;

    /// Immediate child directories of `path`, sorted by name for
    /// deterministic scan order. Missing or unreadable paths yield an
    /// empty list.
    fn subdirectories(&self, path: &Path) -> Vec<PathBuf>;

    /// True when `path` exists and is a regular file.
    fn file_exists(&self, path: &Path) -> bool;
}

/// Production filesystem access via `std::fs`.
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn subdirectories(&self, path: &Path) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(path) else {
            return Vec::new();
        };
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|entry| entry.is_dir())
            .collect();
        dirs.sort();
        dirs
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
