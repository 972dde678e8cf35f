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

//! Line dispatch for the operational shell.

use crate::error::{LineError, RunError};
use crate::process::{CommandOutput, ProcessRunner};
use crate::resolve::resolve;
use crate::tags::{extract_tag_values, value_entered};
use crate::template::format_command;
use crate::tokenize::split_tokens;
use crate::tree::TreeNode;

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line.
    Skipped,
    /// `exit` was typed.
    Exit,
    /// The bound command ran to completion.
    Ran {
        command: String,
        output: CommandOutput,
    },
    /// The line did not name a runnable command.
    Rejected(LineError),
    /// The runner could not run the command.
    RunFailed { command: String, error: RunError },
}

/// Operational shell over one command tree.
#[derive(Debug, Clone)]
pub struct OperationalShell {
    tree: TreeNode,
}

impl OperationalShell {
    pub fn new(tree: TreeNode) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    /// The interpolated command a line selects.
    ///
    /// A tag node with its value entered runs `tagCommand`; otherwise the
    /// node's `command` runs.
    pub fn command_for_line(&self, line: &str) -> Result<String, LineError> {
        let tokens = split_tokens(line);
        let (node, consumed) = resolve(&self.tree, &tokens).into_result()?;
        let values = extract_tag_values(&self.tree, &tokens);

        let meta = node.meta();
        if node.is_tag() && value_entered(&self.tree, node, &tokens) {
            if let Some(template) = &meta.tag_command {
                return Ok(format_command(template, &values));
            }
        }
        match &meta.command {
            Some(template) => Ok(format_command(template, &values)),
            None => Err(LineError::IncompleteCommand { path: consumed }),
        }
    }

    /// Resolve and run one line.
    pub fn dispatch_line(&self, line: &str, runner: &dyn ProcessRunner) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Skipped;
        }
        if is_exit(line) {
            return LineOutcome::Exit;
        }

        let command = match self.command_for_line(line) {
            Ok(command) => command,
            Err(err) => return LineOutcome::Rejected(err),
        };
        match runner.run_command(&command) {
            Ok(output) => LineOutcome::Ran { command, output },
            Err(error) => LineOutcome::RunFailed { command, error },
        }
    }
}

/// Whether the first token of a line is `exit`, in any case.
pub fn is_exit(line: &str) -> bool {
    line.split_whitespace()
        .next()
        .is_some_and(|head| head.eq_ignore_ascii_case("exit"))
}
