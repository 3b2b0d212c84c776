//! Platform identification used to select candidate lists and installers.

/// Operating system family the engine is running on.
///
/// Selected once per engine through a [`PlatformInfo`] collaborator rather
/// than compile-time `cfg` exclusion, so every platform's discovery and
/// installation policy stays testable on any host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OsFamily {
    /// Windows, including the `py` launcher, tool cache and registry probes.
    Windows,
    /// Linux. Installation support is Debian/Ubuntu only.
    Linux,
    /// macOS with Homebrew installation.
    MacOs,
    /// Anything else. Discovery still probes `python3`/`python`, but
    /// automatic installation is refused.
    Other,
}

/// Collaborator answering which operating system family the process runs on.
pub trait PlatformInfo: Send + Sync {
    /// The detected operating system family.
    fn family(&self) -> OsFamily;

    /// True when running on Windows.
    fn is_windows(&self) -> bool {
        self.family() == OsFamily::Windows
    }

    /// True when running on Linux.
    fn is_linux(&self) -> bool {
        self.family() == OsFamily::Linux
    }

    /// True when running on macOS.
    fn is_macos(&self) -> bool {
        self.family() == OsFamily::MacOs
    }
}

/// Production platform identification backed by `std::env::consts::OS`.
pub struct HostPlatform;

impl PlatformInfo for HostPlatform {
    fn family(&self) -> OsFamily {
        match std::env::consts::OS {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::MacOs,
            _ => OsFamily::Other,
        }
    }
}
