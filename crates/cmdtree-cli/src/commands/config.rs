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

use super::{check_file_size, echo, load_tree, say, say_end_of_input, system_runner};
use crate::editor::{open_source, LineSource};
use crate::error::CliResult;
use cmdtree_config::{ConfigOutcome, ConfigPersistence, ConfigSession, JsonFileStore, ScriptReport};
use cmdtree_core::ProcessRunner;
use std::io::{self, Write};
use std::path::PathBuf;

pub const CONFIG_PROMPT: &str = "config> ";

pub struct ConfigShellOptions {
    pub schema: PathBuf,
    pub committed: PathBuf,
    pub history: PathBuf,
    pub batch: bool,
    pub timeout: Option<u64>,
}

/// Run the configuration shell until `exit` or end of input.
pub fn run_config_shell(options: &ConfigShellOptions) -> CliResult<()> {
    let schema = load_tree(&options.schema)?;
    if options.committed.exists() {
        check_file_size(&options.committed)?;
    }
    let mut session = ConfigSession::new(schema, JsonFileStore::new(&options.committed))?;
    let runner = system_runner(options.timeout)?;
    let mut source = open_source(options.batch, session.tree(), Some(options.history.clone()))?;
    let stdout = io::stdout();
    config_loop(&mut session, source.as_mut(), &runner, &mut stdout.lock())
}

pub(crate) fn config_loop<P: ConfigPersistence>(
    session: &mut ConfigSession<P>,
    source: &mut dyn LineSource,
    runner: &dyn ProcessRunner,
    out: &mut dyn Write,
) -> CliResult<()> {
    // A line a validator refused, offered again for editing.
    let mut retry = String::new();
    loop {
        source.set_tree(session.tree());
        let Some(input) = source.read(CONFIG_PROMPT, &retry)? else {
            return say_end_of_input(out, source.is_interactive());
        };
        retry.clear();

        for line in input.lines() {
            match session.process_line(line, runner) {
                ConfigOutcome::Skipped | ConfigOutcome::Applied => {}
                ConfigOutcome::Exit => return say(out, "Exiting..."),
                ConfigOutcome::Rejected { line, message } => {
                    say(out, message)?;
                    retry = line;
                    break;
                }
                ConfigOutcome::Committed {
                    location, reports, ..
                } => {
                    say(out, format!("Saved committed config to {location}"))?;
                    for report in &reports {
                        render_report(out, report)?;
                    }
                }
                ConfigOutcome::Show(value) => say(out, serde_json::to_string_pretty(&value)?)?,
                ConfigOutcome::Compare(lines) if lines.is_empty() => say(out, "No differences.")?,
                ConfigOutcome::Compare(lines) => {
                    for line in lines {
                        say(out, line)?;
                    }
                }
                ConfigOutcome::Discarded => say(out, "Uncommitted changes discarded.")?,
                ConfigOutcome::Failed(err) => say(out, err)?,
                ConfigOutcome::Error(err) => say(out, format!("Error: {err}"))?,
            }
        }
    }
}

fn render_report(out: &mut dyn Write, report: &ScriptReport) -> CliResult<()> {
    if let ScriptReport::Finished { output, .. } = report {
        echo(out, &output.stdout)?;
        echo(out, &output.stderr)?;
    }
    if let Some(summary) = report.summary() {
        say(out, summary)?;
    }
    Ok(())
}
