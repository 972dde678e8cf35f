// Dweve cmdtree - Hierarchical Command Tree Shell
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Boundary to the external process runner.
//!
//! The engines hand over a fully interpolated command string (or a script
//! path) and get back the exit status and captured output once the process
//! has terminated. Output is never parsed.

use crate::error::RunError;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Exit code for reporting, `-1` for signal termination.
    pub fn exit_code(&self) -> i32 {
        self.status.unwrap_or(-1)
    }
}

/// Runs operator commands and commit scripts to completion.
pub trait ProcessRunner {
    /// Run a command line as authored in the tree.
    fn run_command(&self, command: &str) -> Result<CommandOutput, RunError>;

    /// Run an executable by path with no arguments.
    fn run_script(&self, script: &Path) -> Result<CommandOutput, RunError>;
}

/// [`ProcessRunner`] backed by `std::process`.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    shell: String,
    timeout: Option<Duration>,
    env: BTreeMap<String, String>,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            timeout: None,
            env: BTreeMap::new(),
        }
    }
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill processes that run longer than `timeout`.
    ///
    /// Only the direct child is killed. Descendants started by the shell
    /// (`sleep 5 &`) are not reaped; if they hold the output pipes open,
    /// the output readers are detached after [`READER_GRACE`].
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add an environment variable for every child process.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Use a different shell for `run_command` (it is passed `-c`).
    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    fn execute(&self, label: &str, mut command: Command) -> Result<CommandOutput, RunError> {
        debug!(command = label, timeout = ?self.timeout, "spawning");
        let mut child = command
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RunError::Spawn {
                command: label.to_string(),
                message: e.to_string(),
            })?;

        // Pipes are drained while waiting; a full pipe would stall the child.
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let status = match self.wait(&mut child, label) {
            Ok(status) => status,
            Err(err) => {
                settle_readers([stdout, stderr], label);
                return Err(err);
            }
        };

        Ok(CommandOutput {
            status: status.code(),
            stdout: join_reader(stdout, label)?,
            stderr: join_reader(stderr, label)?,
        })
    }

    fn wait(&self, child: &mut Child, label: &str) -> Result<ExitStatus, RunError> {
        let io_err = |e: std::io::Error| RunError::Io {
            command: label.to_string(),
            message: e.to_string(),
        };

        let Some(limit) = self.timeout else {
            return child.wait().map_err(io_err);
        };

        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(io_err)? {
                return Ok(status);
            }
            if started.elapsed() >= limit {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RunError::TimedOut {
                    command: label.to_string(),
                    timeout: limit,
                });
            }
            thread::sleep(Duration::from_millis(10));
        }
    }
}

/// How long a killed command's output readers get to reach end of file.
pub const READER_GRACE: Duration = Duration::from_millis(200);

type Reader = Option<thread::JoinHandle<std::io::Result<Vec<u8>>>>;

/// Join readers that finish within [`READER_GRACE`], detach the rest.
/// Returns the number detached.
fn settle_readers(readers: [Reader; 2], label: &str) -> usize {
    let deadline = Instant::now() + READER_GRACE;
    let mut detached = 0;
    for handle in readers.into_iter().flatten() {
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        if handle.is_finished() {
            let _ = handle.join();
        } else {
            debug!(command = label, "output pipe still open after kill; reader detached");
            detached += 1;
        }
    }
    detached
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Reader {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).map(|_| buf)
        })
    })
}

fn join_reader(reader: Reader, label: &str) -> Result<String, RunError> {
    let Some(handle) = reader else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| RunError::Io {
            command: label.to_string(),
            message: "output reader panicked".to_string(),
        })?
        .map_err(|e| RunError::Io {
            command: label.to_string(),
            message: e.to_string(),
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

impl ProcessRunner for SystemRunner {
    fn run_command(&self, command: &str) -> Result<CommandOutput, RunError> {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command);
        self.execute(command, cmd)
    }

    fn run_script(&self, script: &Path) -> Result<CommandOutput, RunError> {
        let label = script.display().to_string();
        self.execute(&label, Command::new(script_program(script)))
    }
}

/// Relative script paths name files under the working directory, never a
/// `PATH` lookup.
fn script_program(script: &Path) -> PathBuf {
    if script.is_relative() {
        Path::new(".").join(script)
    } else {
        script.to_path_buf()
    }
}
