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

use crate::error::CliResult;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

pub fn generate_completion_for_command<G: Generator>(generator: G, cmd: &mut Command) -> CliResult<()> {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
    Ok(())
}

pub fn print_installation_instructions(shell: &str) -> Option<&'static str> {
    let text = match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash completion installation:

# For current session only:
eval "$(cmdtree completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(cmdtree completion bash)"' >> ~/.bashrc
"#
        }
        "zsh" => {
            r#"# Zsh completion installation:

# Save to a directory in $fpath:
cmdtree completion zsh > ~/.zsh/completions/_cmdtree
"#
        }
        "fish" => {
            r#"# Fish completion installation:

cmdtree completion fish > ~/.config/fish/completions/cmdtree.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell completion installation:

# Add this line to the file named by $PROFILE:
cmdtree completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish completion installation:

# Add to ~/.elvish/rc.elv:
eval (cmdtree completion elvish)
"#
        }
        _ => return None,
    };
    Some(text)
}
