//! Scripted collaborator fakes shared across the unit tests.

use crate::fs::FileSystem;
use crate::platform::{OsFamily, PlatformInfo};
use crate::probing::{split_command, INTROSPECTION_SCRIPT};
use crate::process::{ProcessRunner, RunError};
use crate::registry::{RegistryHive, RegistryReader};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How a scripted invocation should behave.
#[derive(Debug, Clone)]
pub(crate) enum ScriptedResponse {
    /// Succeed with this output.
    Output(String),
    /// Fail as if the executable was missing.
    Spawn,
    /// Fail as if the invocation timed out.
    Timeout,
    /// Fail with a non-zero exit status.
    ExitFailure,
}

/// A [`ProcessRunner`] that replays scripted responses keyed by the full
/// invocation line (`program arg1 arg2 ...`). Unknown invocations behave
/// like a missing executable. Responses queue per key: each call consumes
/// one until a single response remains, which then repeats, so a command
/// can change behavior across passes (absent before install, present
/// after).
pub(crate) struct ScriptedRunner {
    responses: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    shell: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    responders: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

pub(crate) fn invocation_key(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

/// The invocation line the prober produces for a candidate command.
pub(crate) fn probe_invocation(command: &str) -> String {
    let (program, mut args) = split_command(command);
    args.push("-c");
    args.push(INTROSPECTION_SCRIPT);
    invocation_key(program, &args)
}

/// A serialized two-element probe record.
pub(crate) fn probe_record(path: &str, version: &str) -> String {
    serde_json::json!([path, version]).to_string()
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            shell: Mutex::new(HashMap::new()),
            responders: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response for an exact invocation line.
    pub(crate) fn respond(self, invocation: impl Into<String>, output: impl Into<String>) -> Self {
        self.queue(invocation.into(), ScriptedResponse::Output(output.into()))
    }

    /// Queue a successful probe answer for a candidate command.
    pub(crate) fn respond_to_probe(
        self,
        command: &str,
        output: impl Into<String>,
    ) -> Self {
        self.queue(
            probe_invocation(command),
            ScriptedResponse::Output(output.into()),
        )
    }

    /// Queue a probe failure for a candidate command.
    pub(crate) fn fail_probe(self, command: &str, response: ScriptedResponse) -> Self {
        self.queue(probe_invocation(command), response)
    }

    /// Queue a successful response for a shell script body.
    pub(crate) fn respond_shell(self, script: impl Into<String>, output: impl Into<String>) -> Self {
        self.shell
            .lock()
            .unwrap()
            .entry(script.into())
            .or_default()
            .push_back(ScriptedResponse::Output(output.into()));
        self
    }

    /// Queue a failure for a shell script body.
    pub(crate) fn fail_shell(self, script: impl Into<String>, response: ScriptedResponse) -> Self {
        self.shell
            .lock()
            .unwrap()
            .entry(script.into())
            .or_default()
            .push_back(response);
        self
    }

    /// Mark a program as answering availability probes.
    pub(crate) fn responds_to(mut self, program: impl Into<String>) -> Self {
        self.responders.insert(program.into());
        self
    }

    /// Recorded `run`/`run_shell` invocation lines, in call order.
    /// Shell invocations are prefixed with `shell:`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn queue(self, key: String, response: ScriptedResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push_back(response);
        self
    }

    fn next_response(
        table: &Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
        key: &str,
    ) -> Option<ScriptedResponse> {
        let mut table = table.lock().unwrap();
        let queue = table.get_mut(key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn realize(
        response: Option<ScriptedResponse>,
        program: &str,
        timeout: Duration,
    ) -> Result<String, RunError> {
        match response {
            Some(ScriptedResponse::Output(output)) => Ok(output),
            Some(ScriptedResponse::Timeout) => Err(RunError::Timeout {
                program: program.to_string(),
                timeout,
            }),
            Some(ScriptedResponse::ExitFailure) => Err(RunError::ExitFailure {
                program: program.to_string(),
                code: Some(1),
                stderr: String::new(),
            }),
            Some(ScriptedResponse::Spawn) | None => Err(RunError::Spawn {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted miss"),
            }),
        }
    }
}

impl ProcessRunner for ScriptedRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        _working_dir: Option<&Path>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<String, RunError> {
        if cancel.is_cancelled() {
            return Err(RunError::Cancelled);
        }
        let key = invocation_key(program, args);
        self.calls.lock().unwrap().push(key.clone());
        Self::realize(Self::next_response(&self.responses, &key), program, timeout)
    }

    async fn run_shell(
        &self,
        script: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<String, RunError> {
        if cancel.is_cancelled() {
            return Err(RunError::Cancelled);
        }
        self.calls.lock().unwrap().push(format!("shell:{script}"));
        Self::realize(Self::next_response(&self.shell, script), "bash", timeout)
    }

    async fn command_responds(
        &self,
        program: &str,
        _arg: &str,
        _timeout: Duration,
        cancel: &CancellationToken,
    ) -> bool {
        !cancel.is_cancelled() && self.responders.contains(program)
    }
}

/// An in-memory [`FileSystem`] built from explicit directory and file sets.
#[derive(Default)]
pub(crate) struct FakeFileSystem {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
}

impl FakeFileSystem {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a directory along with all of its ancestors.
    pub(crate) fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut current = Some(path.as_path());
        while let Some(dir) = current {
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
        self
    }

    /// Register a file; its parent directories are registered too.
    pub(crate) fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self = self.with_dir(parent);
        }
        self.files.insert(path);
        self
    }
}

impl FileSystem for FakeFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    fn subdirectories(&self, path: &Path) -> Vec<PathBuf> {
        let mut children: Vec<PathBuf> = self
            .dirs
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .cloned()
            .collect();
        children.sort();
        children
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

/// An in-memory [`RegistryReader`].
#[derive(Default)]
pub(crate) struct FakeRegistry {
    subkeys: HashMap<(RegistryHive, String), Vec<String>>,
    values: HashMap<(RegistryHive, String), String>,
}

impl FakeRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_subkeys<const N: usize>(
        mut self,
        hive: RegistryHive,
        path: &str,
        names: [&str; N],
    ) -> Self {
        self.subkeys.insert(
            (hive, path.to_string()),
            names.iter().map(|name| name.to_string()).collect(),
        );
        self
    }

    pub(crate) fn with_default_value(
        mut self,
        hive: RegistryHive,
        path: &str,
        value: &str,
    ) -> Self {
        self.values.insert((hive, path.to_string()), value.to_string());
        self
    }
}

impl RegistryReader for FakeRegistry {
    fn subkey_names(&self, hive: RegistryHive, path: &str) -> Vec<String> {
        self.subkeys
            .get(&(hive, path.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn read_default_value(&self, hive: RegistryHive, path: &str) -> Option<String> {
        self.values.get(&(hive, path.to_string())).cloned()
    }
}

/// A [`PlatformInfo`] pinned to one family.
pub(crate) struct FixedPlatform(pub(crate) OsFamily);

impl PlatformInfo for FixedPlatform {
    fn family(&self) -> OsFamily {
        self.0
    }
}
