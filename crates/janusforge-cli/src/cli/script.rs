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


use crate::commands::{self, GenerateOptions, Profile};
use crate::error::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ScriptCommands {
    /// Generate Gremlin scripts from a model file
    ///
    /// Writes the JanusGraph schema script and the sample data script for a
    /// model document, as titled sections or as one combined script.
    Generate {
        /// Model file (JSON)
        #[arg(value_name = "MODEL")]
        file: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Conversion config file (JSON); flags override it
        #[arg(long, value_name = "FILE")]
        config: Option<String>,

        /// Script profile
        #[arg(long, value_enum)]
        profile: Option<Profile>,

        /// Open the existing graph instead of creating it
        #[arg(long)]
        update: bool,

        /// Write one combined script instead of titled sections
        #[arg(long)]
        combined: bool,

        /// Only the schema script
        #[arg(long, conflicts_with = "sample_only")]
        schema_only: bool,

        /// Only the sample data script
        #[arg(long)]
        sample_only: bool,

        /// Fail on unresolved edge endpoints and index edges
        #[arg(short, long)]
        strict: bool,
    },

    /// Infer a property schema from captured GraphSON
    ///
    /// Reads the GraphSON result of a `valueMap()` query and prints the
    /// schema merged over all rows as JSON.
    Infer {
        /// GraphSON file (JSON)
        #[arg(value_name = "GRAPHSON")]
        file: String,

        /// Property-key rows (JSON array) to merge with the observations
        #[arg(long, value_name = "FILE")]
        property_keys: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl ScriptCommands {
    /// Execute the script command.
    pub fn execute(self) -> Result<()> {
        match self {
            ScriptCommands::Generate {
                file,
                output,
                config,
                profile,
                update,
                combined,
                schema_only,
                sample_only,
                strict,
            } => {
                let options = GenerateOptions {
                    config,
                    profile,
                    update,
                    combined,
                    schema_only,
                    sample_only,
                    strict,
                };
                commands::generate(&file, output.as_deref(), &options)
            }
            ScriptCommands::Infer {
                file,
                property_keys,
                output,
            } => commands::infer(&file, property_keys.as_deref(), output.as_deref()),
        }
    }
}
