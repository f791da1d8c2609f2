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

//! `generate`: model document to Gremlin scripts.

use super::{read_file, write_output};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use colored::Colorize;
use janusforge_core::GraphModel;
use janusforge_gremlin::{
    to_gremlin, GraphBootstrap, GremlinOutput, OutputMode, ScriptProfile, ToGremlinConfig,
};
use tracing::info;

/// Script profile selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// A script for review, indexes built in the main block
    File,
    /// A script for a live server, each index awaited and reindexed
    Live,
}

impl From<Profile> for ScriptProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::File => ScriptProfile::FileExport,
            Profile::Live => ScriptProfile::ApplyToLive,
        }
    }
}

/// Options of the `generate` command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Configuration file read before the flags are applied.
    pub config: Option<String>,
    /// Script profile override.
    pub profile: Option<Profile>,
    /// Open the existing graph instead of creating it.
    pub update: bool,
    /// One script instead of titled sections.
    pub combined: bool,
    /// Only the schema section.
    pub schema_only: bool,
    /// Only the sample data section.
    pub sample_only: bool,
    /// Fail on unresolved references.
    pub strict: bool,
}

impl GenerateOptions {
    /// The conversion config: the config file (or the default), then the flags.
    pub fn to_config(&self) -> Result<ToGremlinConfig> {
        if self.schema_only && self.sample_only {
            return Err(CliError::invalid_input(
                "--schema-only and --sample-only cannot be combined",
            ));
        }

        let mut config = match &self.config {
            Some(path) => {
                let content = read_file(path)?;
                serde_json::from_str(&content).map_err(|e| CliError::json(path, e))?
            }
            None => ToGremlinConfig::default(),
        };
        if let Some(profile) = self.profile {
            config.profile = profile.into();
        }
        if self.update {
            config.bootstrap = GraphBootstrap::OpenExisting;
        }
        if self.combined {
            config.output = OutputMode::Combined;
        }
        if self.schema_only {
            config.include_sample_data = false;
        }
        if self.sample_only {
            config.include_schema = false;
        }
        if self.strict {
            config.strict_references = true;
        }
        Ok(config)
    }
}

fn render(output: GremlinOutput) -> String {
    match output {
        GremlinOutput::Combined(script) => script,
        GremlinOutput::Sections(sections) => sections
            .into_iter()
            .map(|section| format!("// {}\n{}", section.title, section.script))
            .collect::<Vec<_>>()
            .join("\n\n\n"),
    }
}

/// Generate scripts for the model in `file`.
pub fn generate(file: &str, output: Option<&str>, options: &GenerateOptions) -> Result<()> {
    let config = options.to_config()?;
    let model = GraphModel::from_json(&read_file(file)?)?;
    info!(
        vertices = model.vertices.len(),
        relationships = model.relationships.len(),
        profile = ?config.profile,
        "generating scripts"
    );

    let script = render(to_gremlin(&model, &config)?);
    write_output(&script, output)?;

    if let Some(path) = output {
        eprintln!("{} {}", "✓".green().bold(), path);
    }
    Ok(())
}
