//! Hosted tool cache scan for CI agents.
//!
//! Build agents keep pre-provisioned interpreters under a well-known root
//! (`<root>/Python/<version>/x64/python.exe`). Checking there first avoids
//! spawning any interpreter at all on CI hosts.

use crate::fs::FileSystem;
use crate::version::{split_major_minor, VersionRequest};
use std::path::{Path, PathBuf};

/// Environment variable agents use to point at the tool cache root.
pub(crate) const TOOL_CACHE_DIR_VAR: &str = "AGENT_TOOLSDIRECTORY";

/// Conventional root when the variable is unset.
pub(crate) const DEFAULT_TOOL_CACHE_ROOT: &str = r"C:\hostedtoolcache\windows";

/// Resolve the tool cache root from the environment, with the
/// conventional fallback.
pub(crate) fn tool_cache_root() -> PathBuf {
    std::env::var(TOOL_CACHE_DIR_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOOL_CACHE_ROOT))
}

/// Scan the tool cache for a matching interpreter.
///
/// Version-named subdirectories of `<root>/Python` are matched on
/// major.minor; the first whose `x64/python.exe` exists on disk wins.
pub(crate) fn scan_tool_cache<F: FileSystem>(
    fs: &F,
    root: &Path,
    required: &VersionRequest,
) -> Option<PathBuf> {
    let python_root = root.join("Python");
    if !fs.dir_exists(&python_root) {
        return None;
    }

    for dir in fs.subdirectories(&python_root) {
        let Some(name) = dir.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let Some(pair) = split_major_minor(name) else {
            continue;
        };
        if !required.matches_pair(pair) {
            continue;
        }

        let candidate = dir.join("x64").join("python.exe");
        if fs.file_exists(&candidate) {
            return Some(candidate);
        }
    }

    None
}
