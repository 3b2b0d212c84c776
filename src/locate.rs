//! Ordered, short-circuiting interpreter search.

use crate::error::DiscoveryError;
use crate::fs::FileSystem;
use crate::platform::PlatformInfo;
use crate::probing::{
    candidate_commands, probe_command, scan_registry, scan_tool_cache, ProbeOutcome,
};
use crate::process::ProcessRunner;
use crate::registry::RegistryReader;
use crate::version::VersionRequest;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

/// Search the platform's candidate sources in priority order and return the
/// first matching interpreter path.
///
/// Priority is fixed and deterministic: the hosted tool cache (Windows
/// only), then the ordered launch-command candidates, then the installation
/// registry (Windows only). `Ok(None)` means nothing matched, which is a
/// recoverable outcome for the caller, not an error. Once cancellation is
/// requested the search unwinds instead of trying further candidates.
pub(crate) async fn locate<R, F, G, P>(
    runner: &R,
    fs: &F,
    registry: &G,
    platform: &P,
    cache_root: &Path,
    required: &VersionRequest,
    cancel: &CancellationToken,
) -> Result<Option<PathBuf>, DiscoveryError>
where
    R: ProcessRunner,
    F: FileSystem,
    G: RegistryReader,
    P: PlatformInfo,
{
    if cancel.is_cancelled() {
        return Err(DiscoveryError::Cancelled);
    }

    if platform.is_windows() {
        if let Some(cached) = scan_tool_cache(fs, cache_root, required) {
            tracing::debug!(path = %cached.display(), "found interpreter in hosted tool cache");
            return Ok(Some(cached));
        }
    }

    for command in candidate_commands(platform.family(), required) {
        if cancel.is_cancelled() {
            return Err(DiscoveryError::Cancelled);
        }
        match probe_command(runner, platform.is_windows(), &command, required, cancel).await {
            ProbeOutcome::Found { path, version } => {
                tracing::debug!(%command, %version, path = %path.display(), "candidate matched");
                return Ok(Some(path));
            }
            ProbeOutcome::NotFound | ProbeOutcome::Rejected => {}
        }
    }
    if cancel.is_cancelled() {
        return Err(DiscoveryError::Cancelled);
    }

    if platform.is_windows() {
        if let Some(installed) = scan_registry(registry, fs, required) {
            tracing::debug!(path = %installed.display(), "found interpreter via installation registry");
            return Ok(Some(installed));
        }
    }

    Ok(None)
}
