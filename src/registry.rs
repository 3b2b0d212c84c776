//! Registry-style key/value collaborator for the Windows install scan.

/// The two hives consulted for per-user and per-machine installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryHive {
    /// `HKEY_CURRENT_USER`.
    CurrentUser,
    /// `HKEY_LOCAL_MACHINE`.
    LocalMachine,
}

/// Read-only access to a registry-shaped key/value store.
///
/// The scan policy built on top of this trait runs on every platform; only
/// the production [`SystemRegistry`] is backed by the real Windows registry.
/// On other hosts it reads as empty, which keeps the policy testable
/// anywhere through substitution.
pub trait RegistryReader: Send + Sync {
    /// Names of the immediate subkeys of `path` under `hive`, or an empty
    /// list when the key does not exist or cannot be read.
    fn subkey_names(&self, hive: RegistryHive, path: &str) -> Vec<String>;

    /// The default (unnamed) string value of the key at `path`, if any.
    fn read_default_value(&self, hive: RegistryHive, path: &str) -> Option<String>;
}

/// Production registry access. Real on Windows, empty elsewhere.
pub struct SystemRegistry;

#[cfg(windows)]
impl RegistryReader for SystemRegistry {
    fn subkey_names(&self, hive: RegistryHive, path: &str) -> Vec<String> {
        match open_hive(hive).open_subkey(path) {
            Ok(key) => key.enum_keys().filter_map(Result::ok).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn read_default_value(&self, hive: RegistryHive, path: &str) -> Option<String> {
        open_hive(hive)
            .open_subkey(path)
            .ok()?
            .get_value::<String, _>("")
            .ok()
    }
}

#[cfg(windows)]
fn open_hive(hive: RegistryHive) -> winreg::RegKey {
    use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE};

    match hive {
        RegistryHive::CurrentUser => winreg::RegKey::predef(HKEY_CURRENT_USER),
        RegistryHive::LocalMachine => winreg::RegKey::predef(HKEY_LOCAL_MACHINE),
    }
}

#[cfg(not(windows))]
impl RegistryReader for SystemRegistry {
    fn subkey_names(&self, _hive: RegistryHive, _path: &str) -> Vec<String> {
        Vec::new()
    }

    fn read_default_value(&self, _hive: RegistryHive, _path: &str) -> Option<String> {
        None
    }
}
