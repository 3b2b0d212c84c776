//! Subprocess execution collaborator with timeout and cancellation.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Ways a subprocess invocation can fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RunError {
    /// The executable could not be started at all.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program that failed to launch.
        program: String,
        /// Underlying launch error.
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within its allotted time.
    #[error("{program} did not finish within {timeout:?}")]
    Timeout {
        /// Program that overran.
        program: String,
        /// The per-invocation limit that elapsed.
        timeout: Duration,
    },

    /// The caller's cancellation token fired while the process was running.
    #[error("operation cancelled")]
    Cancelled,

    /// The process ran but exited with a failure status.
    #[error("{program} exited with status {code:?}")]
    ExitFailure {
        /// Program that failed.
        program: String,
        /// Exit code, when the platform reports one.
        code: Option<i32>,
        /// Captured standard error, for diagnostics.
        stderr: String,
    },

    /// The process produced output that was not valid UTF-8.
    #[error("{program} produced non-UTF-8 output")]
    NonUtf8 {
        /// Program whose output could not be decoded.
        program: String,
    },
}

/// Capability to run external commands and capture their text output.
///
/// Every invocation is bounded by a per-call timeout and a cancellation
/// token; whichever fires first aborts that invocation. Implementations
/// must release the child process on every exit path.
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args`, returning captured output on success.
    ///
    /// Standard output is preferred; standard error is returned when stdout
    /// is empty, since some tools report there.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: Option<&Path>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, RunError>> + Send;

    /// Run a shell script body, used for package-manager sequences such as
    /// update-then-install.
    fn run_shell(
        &self,
        script: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<String, RunError>> + Send {
        async move { self.run("bash", &["-c", script], None, timeout, cancel).await }
    }

    /// Lightweight probe: does `program` exist and respond to `arg`?
    fn command_responds(
        &self,
        program: &str,
        arg: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> impl Future<Output = bool> + Send {
        async move { self.run(program, &[arg], None, timeout, cancel).await.is_ok() }
    }
}

/// Production runner backed by `tokio::process`.
///
/// Children are spawned with piped output and `kill_on_drop`, so a timeout,
/// cancellation or caller panic never leaks a process.
pub struct TokioRunner;

impl ProcessRunner for TokioRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        working_dir: Option<&Path>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<String, RunError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .kill_on_drop(true)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let output = tokio::select! {
            _ = cancel.cancelled() => return Err(RunError::Cancelled),
            result = tokio::time::timeout(timeout, command.output()) => match result {
                Ok(Ok(output)) => output,
                Ok(Err(source)) => {
                    return Err(RunError::Spawn {
                        program: program.to_string(),
                        source,
                    })
                }
                Err(_) => {
                    return Err(RunError::Timeout {
                        program: program.to_string(),
                        timeout,
                    })
                }
            },
        };

        if !output.status.success() {
            return Err(RunError::ExitFailure {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let raw = if output.stdout.is_empty() {
            output.stderr
        } else {
            output.stdout
        };

        String::from_utf8(raw).map_err(|_| RunError::NonUtf8 {
            program: program.to_string(),
        })
    }

    async fn command_responds(
        &self,
        program: &str,
        arg: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> bool {
        // PATH lookup first; a missing command never needs a spawn attempt.
        if which::which(program).is_err() {
            return false;
        }
        self.run(program, &[arg], None, timeout, cancel).await.is_ok()
    }
}
