//! The discovery engine: locate, and if permitted, install then re-locate.

use crate::error::DiscoveryError;
use crate::fs::{FileSystem, StdFileSystem};
use crate::install::{install_with, InstallError};
use crate::locate::locate;
use crate::platform::{HostPlatform, PlatformInfo};
use crate::probing::{split_command, tool_cache_root, PROBE_TIMEOUT};
use crate::process::{ProcessRunner, TokioRunner};
use crate::registry::{RegistryReader, SystemRegistry};
use crate::version::VersionRequest;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Introspection one-liner used by [`PythonDiscovery::resolve_path`].
const EXECUTABLE_SCRIPT: &str = "import sys; print(sys.executable)";

/// Python interpreter discovery and provisioning engine.
///
/// Holds the four collaborators the engine works through: subprocess
/// execution, filesystem reads, registry reads and platform identification.
/// [`PythonDiscovery::new`] wires the production implementations;
/// [`PythonDiscovery::with_collaborators`] substitutes any of them, which
/// is how the platform-specific policies are exercised on foreign hosts.
///
/// The engine holds no mutable state; concurrent calls on one instance are
/// independent.
///
/// # Example
///
/// ```rust,no_run
/// use python_discovery::{CancellationToken, PythonDiscovery};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let discovery = PythonDiscovery::new();
///     let cancel = CancellationToken::new();
///
///     match discovery.ensure_installed("3.11", true, &cancel).await {
///         Ok(path) => println!("python 3.11 at {}", path.display()),
///         Err(error) => eprintln!("{error}"),
///     }
/// }
/// ```
pub struct PythonDiscovery<R = TokioRunner, F = StdFileSystem, G = SystemRegistry, P = HostPlatform>
{
    runner: R,
    fs: F,
    registry: G,
    platform: P,
}

impl PythonDiscovery {
    /// Engine wired with the production collaborators.
    pub fn new() -> Self {
        Self::with_collaborators(TokioRunner, StdFileSystem, SystemRegistry, HostPlatform)
    }
}

impl Default for PythonDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, F, G, P> PythonDiscovery<R, F, G, P>
where
    R: ProcessRunner,
    F: FileSystem,
    G: RegistryReader,
    P: PlatformInfo,
{
    /// Engine with caller-supplied collaborators.
    pub fn with_collaborators(runner: R, fs: F, registry: G, platform: P) -> Self {
        Self {
            runner,
            fs,
            registry,
            platform,
        }
    }

    /// Ask a launch command for the absolute path of its own executable.
    ///
    /// Runs `<command> -c "import sys; print(sys.executable)"` with a short
    /// timeout and returns the trimmed output. Unlike probing, failures
    /// here propagate: the caller named a specific command and deserves to
    /// know why it did not answer.
    pub async fn resolve_path(
        &self,
        command: &str,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DiscoveryError> {
        let (program, mut args) = split_command(command);
        args.push("-c");
        args.push(EXECUTABLE_SCRIPT);

        let output = self
            .runner
            .run(program, &args, None, PROBE_TIMEOUT, cancel)
            .await?;
        Ok(PathBuf::from(output.trim()))
    }

    /// Locate an interpreter matching `version`, installing one first if
    /// permitted and none is present.
    ///
    /// `version` must be a dotted string with at least major and minor
    /// components ("3.11"); anything else fails before any probing starts.
    /// The returned path always comes from a locate pass over the real
    /// system, never from the installer's say-so.
    pub async fn ensure_installed(
        &self,
        version: &str,
        install_if_missing: bool,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, DiscoveryError> {
        let required: VersionRequest = version.parse()?;
        tracing::info!(version = %required, "ensuring python is installed");

        if let Some(path) = self.locate(&required, cancel).await? {
            tracing::info!(path = %path.display(), "python already present");
            return Ok(path);
        }

        if !install_if_missing {
            return Err(DiscoveryError::NotFound {
                requested: required,
            });
        }

        self.install(&required, cancel).await.map_err(|error| match error {
            InstallError::Cancelled => DiscoveryError::Cancelled,
            other => DiscoveryError::Install(other),
        })?;

        match self.locate(&required, cancel).await? {
            Some(path) => {
                tracing::info!(path = %path.display(), "python installed and verified");
                Ok(path)
            }
            None => Err(DiscoveryError::NotFoundAfterInstall {
                requested: required,
            }),
        }
    }

    /// Install the requested interpreter with the platform's native
    /// package manager, without locating it afterwards.
    pub async fn install(
        &self,
        required: &VersionRequest,
        cancel: &CancellationToken,
    ) -> Result<(), InstallError> {
        install_with(&self.runner, &self.platform, required, cancel).await
    }

    async fn locate(
        &self,
        required: &VersionRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, DiscoveryError> {
        locate(
            &self.runner,
            &self.fs,
            &self.registry,
            &self.platform,
            &tool_cache_root(),
            required,
            cancel,
        )
        .await
    }
}
