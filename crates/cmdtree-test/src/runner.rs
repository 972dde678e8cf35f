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

//! A process runner that records instead of spawning.

use cmdtree_core::{CommandOutput, ProcessRunner, RunError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One call made through a [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Command(String),
    Script(PathBuf),
}

/// [`ProcessRunner`] that records every call and answers from canned
/// results. Unknown commands succeed with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<Invocation>>,
    canned: HashMap<String, Result<CommandOutput, RunError>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` (or a script path) with `output`.
    pub fn with_output(mut self, command: impl Into<String>, output: CommandOutput) -> Self {
        self.canned.insert(command.into(), Ok(output));
        self
    }

    /// Answer `command` (or a script path) with an error.
    pub fn with_error(mut self, command: impl Into<String>, error: RunError) -> Self {
        self.canned.insert(command.into(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Invocation::Command(c) => Some(c.clone()),
                Invocation::Script(_) => None,
            })
            .collect()
    }

    pub fn scripts(&self) -> Vec<PathBuf> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Invocation::Script(p) => Some(p.clone()),
                Invocation::Command(_) => None,
            })
            .collect()
    }

    fn answer(&self, key: &str) -> Result<CommandOutput, RunError> {
        self.canned
            .get(key)
            .cloned()
            .unwrap_or_else(|| Ok(CommandOutput::ok("")))
    }
}

impl ProcessRunner for RecordingRunner {
    fn run_command(&self, command: &str) -> Result<CommandOutput, RunError> {
        self.calls
            .borrow_mut()
            .push(Invocation::Command(command.to_string()));
        self.answer(command)
    }

    fn run_script(&self, script: &Path) -> Result<CommandOutput, RunError> {
        self.calls
            .borrow_mut()
            .push(Invocation::Script(script.to_path_buf()));
        self.answer(&script.display().to_string())
    }
}
