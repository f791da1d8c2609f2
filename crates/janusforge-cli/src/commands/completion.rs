// Janusforge - JanusGraph Schema and Sample Data Engineering
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

//! `completion`: shell completion scripts.

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Write the completion script for `shell` to stdout.
pub fn generate_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Installation instructions for the completion script of `shell`.
pub fn print_installation_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => {
            r#"# Bash completion installation:

# For current session only:
eval "$(janusforge completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(janusforge completion bash)"' >> ~/.bashrc
"#
        }
        Shell::Zsh => {
            r#"# Zsh completion installation:

# Save to a completions directory (ensure directory is in $fpath):
janusforge completion zsh > ~/.zsh/completions/_janusforge
"#
        }
        Shell::Fish => {
            r#"# Fish completion installation:

janusforge completion fish > ~/.config/fish/completions/janusforge.fish
"#
        }
        Shell::PowerShell => {
            r#"# PowerShell completion installation:

# Add this line to your PowerShell profile ($PROFILE):
janusforge completion powershell | Out-String | Invoke-Expression
"#
        }
        Shell::Elvish => {
            r#"# Elvish completion installation:

# Add to your ~/.elvish/rc.elv:
eval (janusforge completion elvish | slurp)
"#
        }
        _ => "# No installation instructions for this shell\n",
    }
    .to_string()
}
