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

//! Command-line definitions.
//!
//! Commands are grouped by category and flattened to the top level.

mod script;
mod utility;

use crate::error::Result;
use clap::{Parser, Subcommand};

pub use script::ScriptCommands;
pub use utility::UtilityCommands;

/// The `janusforge` command line.
#[derive(Parser)]
#[command(name = "janusforge")]
#[command(author, version, about = "Janusforge - JanusGraph schema and sample data scripts", long_about = None)]
pub struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Every top-level command.
#[derive(Subcommand)]
pub enum Commands {
    // Script commands - flattened to appear at top level
    #[command(flatten)]
    Script(ScriptCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` when an input file cannot be read or parsed, when the
    /// conversion fails, or when the output cannot be written.
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Script(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
