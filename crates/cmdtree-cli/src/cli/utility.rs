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

use super::Cli;
use crate::commands;
use crate::error::{CliError, CliResult};
use clap::{CommandFactory, Subcommand};
use clap_complete::shells::*;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum UtilityCommands {
    /// Check a command tree or configuration schema
    ///
    /// Loads the tree, prints node counts and depth, and reports metadata
    /// that can never take effect, unknown validators and broken templates.
    Check {
        /// Tree file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Treat warnings as errors
        #[arg(short = 'W', long)]
        warn_error: bool,
    },

    /// Generate shell completion scripts
    ///
    /// Supported shells: bash, zsh, fish, powershell, elvish
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,

        /// Print installation instructions instead of generating script
        #[arg(short, long)]
        install: bool,
    },
}

impl UtilityCommands {
    pub fn execute(self) -> CliResult<()> {
        match self {
            UtilityCommands::Check {
                file,
                format,
                warn_error,
            } => commands::check(&file, &format, warn_error),
            UtilityCommands::Completion { shell, install } => {
                if install {
                    let text = commands::print_installation_instructions(&shell)
                        .ok_or_else(|| unsupported_shell(&shell))?;
                    println!("{text}");
                    Ok(())
                } else {
                    generate_completion(&shell)
                }
            }
        }
    }
}

fn unsupported_shell(shell: &str) -> CliError {
    CliError::invalid_input(format!(
        "Unsupported shell: '{shell}'. Supported shells: bash, zsh, fish, powershell, elvish"
    ))
}

fn generate_completion(shell: &str) -> CliResult<()> {
    let mut cmd = Cli::command();
    match shell.to_lowercase().as_str() {
        "bash" => commands::generate_completion_for_command(Bash, &mut cmd),
        "zsh" => commands::generate_completion_for_command(Zsh, &mut cmd),
        "fish" => commands::generate_completion_for_command(Fish, &mut cmd),
        "powershell" | "pwsh" => commands::generate_completion_for_command(PowerShell, &mut cmd),
        "elvish" => commands::generate_completion_for_command(Elvish, &mut cmd),
        _ => Err(unsupported_shell(shell)),
    }
}
