//! Single-candidate probing: run a launch command, classify the result.

use crate::process::ProcessRunner;
use crate::version::VersionRequest;
use regex::Regex;
use semver::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Per-probe invocation limit. A real interpreter answers well within this.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Introspection script handed to every candidate. Prints a two-element
/// JSON record: the interpreter's own executable path and its version.
pub(crate) const INTROSPECTION_SCRIPT: &str =
    "import json, sys, platform; print(json.dumps([sys.executable, platform.python_version()]))";

/// Per-user app-execution-alias directory fragment, lowercased. Paths under
/// it are store-install prompts, not interpreters.
const STORE_ALIAS_FRAGMENT: &str = r"\appdata\local\microsoft\windowsapps\";

/// Outcome of probing one candidate command.
///
/// `NotFound` and `Rejected` both mean "keep looking", but they are kept
/// distinct: a rejected candidate did answer, with the wrong version or
/// from a known-bad path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProbeOutcome {
    /// The candidate answered with a matching interpreter.
    Found {
        /// Absolute path the interpreter reported for itself.
        path: PathBuf,
        /// The full version it reported.
        version: Version,
    },
    /// The candidate failed to launch, timed out, or answered garbage.
    NotFound,
    /// The candidate answered but is unusable: wrong major.minor, or a
    /// Windows app-execution-alias stub.
    Rejected,
}

/// The two-element record printed by [`INTROSPECTION_SCRIPT`].
#[derive(Debug, Deserialize)]
struct ProbeRecord(String, String);

/// Split a launch command into its executable and trailing arguments on
/// the first space, so forms like `py -3` stay invocable.
pub(crate) fn split_command(command: &str) -> (&str, Vec<&str>) {
    match command.split_once(' ') {
        Some((program, extra)) => (program, extra.split_whitespace().collect()),
        None => (command, Vec::new()),
    }
}

/// Probe one candidate command against a required version.
///
/// Every failure mode of the candidate itself is non-fatal and maps to
/// `NotFound`; the caller moves on to the next candidate.
pub(crate) async fn probe_command<R: ProcessRunner>(
    runner: &R,
    on_windows: bool,
    command: &str,
    required: &VersionRequest,
    cancel: &CancellationToken,
) -> ProbeOutcome {
    let (program, mut args) = split_command(command);
    args.push("-c");
    args.push(INTROSPECTION_SCRIPT);

    let raw = match runner.run(program, &args, None, PROBE_TIMEOUT, cancel).await {
        Ok(raw) => raw,
        Err(error) => {
            tracing::debug!(command, %error, "candidate did not answer");
            return ProbeOutcome::NotFound;
        }
    };

    let Some((path, version)) = parse_probe_record(&raw) else {
        tracing::debug!(command, "candidate output was not an interpreter record");
        return ProbeOutcome::NotFound;
    };

    if on_windows && is_store_alias(&path) {
        tracing::debug!(command, path = %path.display(), "rejecting app-execution-alias stub");
        return ProbeOutcome::Rejected;
    }

    if required.matches(&version) {
        ProbeOutcome::Found { path, version }
    } else {
        ProbeOutcome::Rejected
    }
}

fn parse_probe_record(raw: &str) -> Option<(PathBuf, Version)> {
    let ProbeRecord(path, reported) = serde_json::from_str(raw.trim()).ok()?;
    let version = parse_reported_version(&reported)?;
    Some((PathBuf::from(path), version))
}

/// Extract a three-component version from whatever the interpreter printed.
/// Tolerates suffixes such as release-candidate tags ("3.13.0rc1").
fn parse_reported_version(reported: &str) -> Option<Version> {
    let re = Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("version pattern is valid");
    let matched = re.captures(reported)?.get(0)?.as_str();
    Version::parse(matched).ok()
}

fn is_store_alias(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().contains(STORE_ALIAS_FRAGMENT)
}
