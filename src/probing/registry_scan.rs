//! Windows installation registry scan.
//!
//! CPython installers record installs under `SOFTWARE\Python\PythonCore`,
//! per-user or per-machine depending on installer scope, so both hives are
//! checked.

use crate::fs::FileSystem;
use crate::registry::{RegistryHive, RegistryReader};
use crate::version::{split_major_minor, VersionRequest};
use std::path::{Path, PathBuf};

const PYTHON_CORE_ROOT: &str = r"SOFTWARE\Python\PythonCore";

const HIVES: [RegistryHive; 2] = [RegistryHive::CurrentUser, RegistryHive::LocalMachine];

/// Scan both hives for an installed interpreter matching the requirement.
///
/// Version subkey tags are matched on their first four characters, which
/// covers plain tags ("3.11") and architecture-suffixed ones ("3.11-32").
/// The `InstallPath` subkey's default value names the install directory;
/// the first directory whose `python.exe` exists on disk wins.
pub(crate) fn scan_registry<G: RegistryReader, F: FileSystem>(
    registry: &G,
    fs: &F,
    required: &VersionRequest,
) -> Option<PathBuf> {
    for hive in HIVES {
        for tag in registry.subkey_names(hive, PYTHON_CORE_ROOT) {
            let prefix: String = tag.chars().take(4).collect();
            let Some(pair) = split_major_minor(&prefix) else {
                continue;
            };
            if !required.matches_pair(pair) {
                continue;
            }

            let key = format!(r"{PYTHON_CORE_ROOT}\{tag}\InstallPath");
            let Some(install_dir) = registry.read_default_value(hive, &key) else {
                continue;
            };

            let candidate = Path::new(&install_dir).join("python.exe");
            if fs.file_exists(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}
