//! Native package manager dispatch for interpreter installation.

use crate::platform::{OsFamily, PlatformInfo};
use crate::process::{ProcessRunner, RunError};
use crate::version::VersionRequest;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Quick availability check before committing to a manager.
const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(3);

/// Package installation is slow; minutes, not seconds.
const APT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const WINGET_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const CHOCO_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const BREW_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// The native package managers the installer can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PackageManager {
    /// Windows Package Manager, the preferred Windows installer.
    #[strum(serialize = "winget")]
    Winget,
    /// Chocolatey, the Windows fallback when winget is unavailable.
    #[strum(serialize = "choco")]
    Choco,
    /// Debian/Ubuntu apt. Other distributions are out of scope.
    #[strum(serialize = "apt-get")]
    Apt,
    /// Homebrew on macOS.
    #[strum(serialize = "brew")]
    Brew,
}

/// Failures of the installation operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// No supported package manager answered its availability probe.
    /// Silent fallback here would hide a real environment deficiency.
    #[error("no supported package manager is available to install python (tried winget and choco)")]
    NoInstallerAvailable,

    /// Automatic installation has no dispatch for this OS family.
    #[error("automatic python installation is not supported on {family}")]
    UnsupportedPlatform {
        /// The detected family.
        family: OsFamily,
    },

    /// The chosen package manager ran and failed.
    #[error("{manager} failed to install python {version}")]
    Installer {
        /// Manager that was dispatched to.
        manager: PackageManager,
        /// Version it was asked to install.
        version: VersionRequest,
        /// The underlying process failure.
        #[source]
        source: RunError,
    },

    /// The caller's cancellation token fired during installation.
    #[error("installation cancelled")]
    Cancelled,
}

/// Install the requested interpreter with the platform's native package
/// manager.
///
/// Success here only means the manager exited cleanly; whether a matching
/// interpreter is actually usable is decided by the caller's subsequent
/// locate pass.
pub(crate) async fn install_with<R, P>(
    runner: &R,
    platform: &P,
    required: &VersionRequest,
    cancel: &CancellationToken,
) -> Result<(), InstallError>
where
    R: ProcessRunner,
    P: PlatformInfo,
{
    if cancel.is_cancelled() {
        return Err(InstallError::Cancelled);
    }

    match platform.family() {
        OsFamily::Linux => {
            // Debian/Ubuntu only; the package index may be stale on fresh
            // runners, so update first.
            let script =
                format!("sudo apt-get -qq update && sudo apt-get -y install python{required}");
            tracing::info!(version = %required, manager = %PackageManager::Apt, "installing python");
            runner
                .run_shell(&script, APT_TIMEOUT, cancel)
                .await
                .map_err(|source| installer_error(PackageManager::Apt, *required, source))?;
        }
        OsFamily::Windows => {
            if runner
                .command_responds("winget", "--version", AVAILABILITY_TIMEOUT, cancel)
                .await
            {
                let id = format!("Python.Python.{required}");
                tracing::info!(version = %required, manager = %PackageManager::Winget, "installing python");
                runner
                    .run(
                        "winget",
                        &[
                            "install",
                            "--exact",
                            "--id",
                            &id,
                            "--silent",
                            "--disable-interactivity",
                            "--accept-source-agreements",
                            "--accept-package-agreements",
                            "--source",
                            "winget",
                        ],
                        None,
                        WINGET_TIMEOUT,
                        cancel,
                    )
                    .await
                    .map_err(|source| installer_error(PackageManager::Winget, *required, source))?;
            } else if runner
                .command_responds("choco", "--version", AVAILABILITY_TIMEOUT, cancel)
                .await
            {
                tracing::warn!("winget unavailable, falling back to chocolatey");
                let pinned = format!("{required}.0");
                runner
                    .run(
                        "choco",
                        &["install", "python", "--version", &pinned, "-y", "--no-progress"],
                        None,
                        CHOCO_TIMEOUT,
                        cancel,
                    )
                    .await
                    .map_err(|source| installer_error(PackageManager::Choco, *required, source))?;
            } else {
                return Err(InstallError::NoInstallerAvailable);
            }
        }
        OsFamily::MacOs => {
            let formula = format!("python@{required}");
            tracing::info!(version = %required, manager = %PackageManager::Brew, "installing python");
            runner
                .run("brew", &["install", &formula], None, BREW_TIMEOUT, cancel)
                .await
                .map_err(|source| installer_error(PackageManager::Brew, *required, source))?;
        }
        family @ OsFamily::Other => {
            return Err(InstallError::UnsupportedPlatform { family });
        }
    }

    Ok(())
}

fn installer_error(
    manager: PackageManager,
    version: VersionRequest,
    source: RunError,
) -> InstallError {
    match source {
        RunError::Cancelled => InstallError::Cancelled,
        source => InstallError::Installer {
            manager,
            version,
            source,
        },
    }
}
