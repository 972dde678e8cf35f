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

//! Command-line definition.

mod shell;
mod utility;

use crate::error::CliResult;
use clap::{Parser, Subcommand};

pub use shell::ShellCommands;
pub use utility::UtilityCommands;

#[derive(Parser)]
#[command(name = "cmdtree")]
#[command(author, version, about = "cmdtree - hierarchical command tree shell", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    // Interactive shells - flattened to appear at top level
    #[command(flatten)]
    Shell(ShellCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Run the selected command.
    ///
    /// # Errors
    ///
    /// Returns `Err` when a tree or configuration file cannot be loaded, the
    /// terminal fails, or `check` finds error-level issues. Per-line errors
    /// inside a shell are printed and never end up here.
    pub fn execute(self) -> CliResult<()> {
        match self {
            Commands::Shell(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
