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

use super::{echo, load_tree, say, say_end_of_input, system_runner};
use crate::editor::{open_source, LineSource};
use crate::error::CliResult;
use cmdtree_core::{LineOutcome, OperationalShell, ProcessRunner};
use std::io::{self, Write};
use std::path::PathBuf;

pub const OP_PROMPT: &str = "router> ";

pub struct OpShellOptions {
    pub tree: PathBuf,
    pub batch: bool,
    pub timeout: Option<u64>,
}

/// Run the operational shell until `exit` or end of input.
pub fn run_op_shell(options: &OpShellOptions) -> CliResult<()> {
    let shell = OperationalShell::new(load_tree(&options.tree)?);
    let runner = system_runner(options.timeout)?;
    let mut source = open_source(options.batch, shell.tree(), None)?;
    let stdout = io::stdout();
    op_loop(&shell, source.as_mut(), &runner, &mut stdout.lock())
}

pub(crate) fn op_loop(
    shell: &OperationalShell,
    source: &mut dyn LineSource,
    runner: &dyn ProcessRunner,
    out: &mut dyn Write,
) -> CliResult<()> {
    loop {
        let Some(input) = source.read(OP_PROMPT, "")? else {
            return say_end_of_input(out, source.is_interactive());
        };
        for line in input.lines() {
            match shell.dispatch_line(line, runner) {
                LineOutcome::Skipped => {}
                LineOutcome::Exit => return say(out, "Goodbye"),
                LineOutcome::Ran { output, .. } => {
                    echo(out, &output.stdout)?;
                    if !output.success() {
                        echo(out, &output.stderr)?;
                    }
                }
                LineOutcome::Rejected(err) => say(out, err)?,
                LineOutcome::RunFailed { error, .. } => say(out, error)?,
            }
        }
    }
}
