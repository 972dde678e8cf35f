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

use crate::commands::{self, ConfigShellOptions, OpShellOptions};
use crate::error::CliResult;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ShellCommands {
    /// Operational shell
    ///
    /// Runs the commands bound in an operational command tree. Tab completes,
    /// `?` lists what can follow, and the greyed suggestion is accepted with
    /// the right arrow key.
    Op {
        /// Operational command tree
        #[arg(short, long, value_name = "FILE", default_value = "op.json")]
        tree: PathBuf,

        /// Read lines from stdin without line editing
        #[arg(long)]
        batch: bool,

        /// Kill commands that run longer than this (overrides CMDTREE_COMMAND_TIMEOUT)
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },

    /// Configuration shell
    ///
    /// Edits a candidate configuration with `set` and `delete`, shows it with
    /// `show` and `compare`, and applies it with `commit`.
    Config {
        /// Configuration schema tree
        #[arg(short, long, value_name = "FILE", default_value = "config.json")]
        schema: PathBuf,

        /// Committed configuration document
        #[arg(short, long, value_name = "FILE", default_value = "committed_config.json")]
        committed: PathBuf,

        /// Line history file
        #[arg(long, value_name = "FILE", default_value = ".config_history")]
        history: PathBuf,

        /// Read lines from stdin without line editing
        #[arg(long)]
        batch: bool,

        /// Kill commit scripts that run longer than this (overrides CMDTREE_COMMAND_TIMEOUT)
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },
}

impl ShellCommands {
    pub fn execute(self) -> CliResult<()> {
        match self {
            ShellCommands::Op {
                tree,
                batch,
                timeout,
            } => commands::run_op_shell(&OpShellOptions {
                tree,
                batch,
                timeout,
            }),
            ShellCommands::Config {
                schema,
                committed,
                history,
                batch,
                timeout,
            } => commands::run_config_shell(&ConfigShellOptions {
                schema,
                committed,
                history,
                batch,
                timeout,
            }),
        }
    }
}
