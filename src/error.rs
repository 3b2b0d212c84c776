//! Top-level error types for the discovery engine.

use crate::install::InstallError;
use crate::process::RunError;
use crate::version::VersionRequest;
use thiserror::Error;

/// Failures surfaced by the public discovery operations.
///
/// The only successful outcome of discovery is a verified interpreter path;
/// every other outcome lands here with a distinct, human-readable cause.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The requested version string did not parse. Raised before any
    /// probing happens.
    #[error("invalid python version string {input:?}")]
    InvalidVersion {
        /// The string that failed validation.
        input: String,
    },

    /// No matching interpreter was found and installation was disallowed
    /// by the caller.
    #[error("python {requested} not found and automatic installation is disabled")]
    NotFound {
        /// The version that was requested.
        requested: VersionRequest,
    },

    /// Installation nominally succeeded, but the verification pass still
    /// found no matching interpreter. A path is never fabricated.
    #[error("python {requested} still not found after installation")]
    NotFoundAfterInstall {
        /// The version that was requested.
        requested: VersionRequest,
    },

    /// The caller's cancellation token fired and the operation unwound.
    #[error("operation cancelled")]
    Cancelled,

    /// Automatic installation failed.
    #[error(transparent)]
    Install(#[from] InstallError),

    /// A directly requested interpreter command failed to run.
    #[error("failed to run interpreter command")]
    Command(#[source] RunError),
}

impl From<RunError> for DiscoveryError {
    fn from(error: RunError) -> Self {
        match error {
            RunError::Cancelled => Self::Cancelled,
            other => Self::Command(other),
        }
    }
}
