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

//! Command implementations behind the clap front end.

mod check;
mod completion;
mod config;
mod op;

pub use check::check;
pub use completion::{generate_completion_for_command, print_installation_instructions};
pub use config::{run_config_shell, ConfigShellOptions};
pub use op::{run_op_shell, OpShellOptions};

use crate::error::{CliError, CliResult};
use cmdtree_core::{SystemRunner, TreeNode};
use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Default bound on files read from disk (64 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

fn get_max_file_size() -> u64 {
    std::env::var("CMDTREE_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

fn check_file_size(path: &Path) -> CliResult<()> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }
    Ok(())
}

/// Read a UTF-8 file, refusing anything over `CMDTREE_MAX_FILE_SIZE`.
pub fn read_file(path: &Path) -> CliResult<String> {
    check_file_size(path)?;
    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Load a command tree or configuration schema document.
pub fn load_tree(path: &Path) -> CliResult<TreeNode> {
    let content = read_file(path)?;
    TreeNode::from_json_str(&content).map_err(|e| CliError::tree(path, e))
}

/// The command timeout: `--timeout` first, then `CMDTREE_COMMAND_TIMEOUT`.
pub fn command_timeout(flag: Option<u64>) -> CliResult<Option<Duration>> {
    if let Some(secs) = flag {
        return Ok(Some(Duration::from_secs(secs)));
    }
    match std::env::var("CMDTREE_COMMAND_TIMEOUT") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| {
                CliError::invalid_input(format!(
                    "CMDTREE_COMMAND_TIMEOUT must be a number of seconds, got '{raw}'"
                ))
            }),
        Err(_) => Ok(None),
    }
}

fn system_runner(timeout: Option<u64>) -> CliResult<SystemRunner> {
    Ok(SystemRunner::new().with_timeout(command_timeout(timeout)?))
}

/// Write one line of shell output.
fn say(out: &mut dyn Write, text: impl Display) -> CliResult<()> {
    writeln!(out, "{text}").map_err(|e| CliError::io_error("<stdout>", e))
}

/// Write process output as captured.
fn echo(out: &mut dyn Write, text: &str) -> CliResult<()> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| CliError::io_error("<stdout>", e))
}

/// Printed when input ends without `exit`.
fn say_end_of_input(out: &mut dyn Write, interactive: bool) -> CliResult<()> {
    if interactive {
        say(out, "")?;
    }
    say(out, "Exiting CLI...")
}
