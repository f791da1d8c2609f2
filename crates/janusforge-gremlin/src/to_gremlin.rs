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


//! Convert a graph model to JanusGraph Gremlin scripts.
//!
//! The schema script has up to four sections, separated by two blank lines:
//!
//! 1. graph bootstrap (create or open)
//! 2. rollback of any open transaction
//! 3. one management block creating property keys, vertex labels and edge
//!    labels, plus every index for [`ScriptProfile::FileExport`]
//! 4. for [`ScriptProfile::ApplyToLive`], one rollback/build/await/reindex
//!    group per index
//!
//! The sample data script is produced by [`crate::sample_data`].

use crate::config::{OutputMode, ScriptProfile, ToGremlinConfig};
use crate::error::{GremlinError, Result};
use crate::sample_data::sample_data_script;
use crate::schema::{
    bootstrap_statement, edge_label_script, index_creation_script, live_index_script,
    management_block, property_key_script, rollback, vertex_label_script,
};
use crate::script::{join_sections, ScriptSection};
use janusforge_core::{GraphModel, ResolvedSchema};
use serde::{Deserialize, Serialize};

/// Title of the schema section.
pub const SCHEMA_TITLE: &str = "JanusGraph schema";

/// Title of the sample data section.
pub const SAMPLE_DATA_TITLE: &str = "Sample data";

/// Generated scripts in the requested output shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GremlinOutput {
    /// Titled sections.
    Sections(Vec<ScriptSection>),
    /// One script.
    Combined(String),
}

impl GremlinOutput {
    /// The full script text, sections joined by two blank lines.
    pub fn into_script(self) -> String {
        match self {
            GremlinOutput::Sections(sections) => {
                join_sections(sections.into_iter().map(|s| s.script))
            }
            GremlinOutput::Combined(script) => script,
        }
    }
}

fn check_references(schema: &ResolvedSchema, config: &ToGremlinConfig) -> Result<()> {
    match schema.skipped.first() {
        Some(reference) if config.strict_references => Err(GremlinError::from(reference.clone())),
        _ => Ok(()),
    }
}

/// Render the schema script for already resolved definitions.
pub fn render_schema(model: &GraphModel, schema: &ResolvedSchema, config: &ToGremlinConfig) -> String {
    let traversal_source = model.graph.traversal_source();

    let file_indexes = match config.profile {
        ScriptProfile::FileExport => index_creation_script(schema).render(),
        ScriptProfile::ApplyToLive => String::new(),
    };
    let body = join_sections([
        property_key_script(&schema.property_keys).render(),
        vertex_label_script(&schema.vertex_labels).render(),
        edge_label_script(&schema.edge_labels).render(),
        file_indexes,
    ]);
    let live_indexes = match config.profile {
        ScriptProfile::FileExport => String::new(),
        ScriptProfile::ApplyToLive => live_index_script(schema, &traversal_source).render(),
    };

    join_sections([
        bootstrap_statement(&model.graph, config.bootstrap).render(),
        rollback(&traversal_source),
        management_block(&traversal_source, &body),
        live_indexes,
    ])
}

/// Resolve a model and render its schema script.
///
/// # Errors
///
/// Fails when an `indexOnly` composite index names an unknown label, and
/// with strict references on when any edge endpoint or vertex-centric
/// index edge cannot be resolved.
pub fn schema_script(model: &GraphModel, config: &ToGremlinConfig) -> Result<String> {
    let schema = ResolvedSchema::resolve(model)?;
    check_references(&schema, config)?;
    tracing::debug!(
        property_keys = schema.property_keys.len(),
        vertex_labels = schema.vertex_labels.len(),
        edge_labels = schema.edge_labels.len(),
        skipped = schema.skipped.len(),
        "rendering schema script"
    );
    Ok(render_schema(model, &schema, config))
}

/// Generate the titled script sections enabled by the config.
pub fn to_gremlin_sections(model: &GraphModel, config: &ToGremlinConfig) -> Result<Vec<ScriptSection>> {
    let mut sections = Vec::new();
    if config.include_schema {
        sections.push(ScriptSection::new(SCHEMA_TITLE, schema_script(model, config)?));
    }
    if config.include_sample_data {
        sections.push(ScriptSection::new(SAMPLE_DATA_TITLE, sample_data_script(model)?));
    }
    Ok(sections)
}

/// Generate scripts in the output shape selected by the config.
///
/// # Examples
///
/// ```
/// use janusforge_core::GraphModel;
/// use janusforge_gremlin::{to_gremlin, GremlinOutput, ToGremlinConfig};
///
/// let model = GraphModel::from_json(r#"{
///     "collections": [{"GUID": "p", "collectionName": "Person",
///                      "properties": {"name": {"type": "string"}}}]
/// }"#).unwrap();
///
/// let output = to_gremlin(&model, &ToGremlinConfig::default()).unwrap();
/// match output {
///     GremlinOutput::Sections(sections) => {
///         assert_eq!(sections[0].title, "JanusGraph schema");
///         assert!(sections[0].script.contains("makeVertexLabel('Person')"));
///     }
///     GremlinOutput::Combined(_) => unreachable!(),
/// }
/// ```
pub fn to_gremlin(model: &GraphModel, config: &ToGremlinConfig) -> Result<GremlinOutput> {
    let sections = to_gremlin_sections(model, config)?;
    Ok(match config.output {
        OutputMode::Sections => GremlinOutput::Sections(sections),
        OutputMode::Combined => {
            GremlinOutput::Combined(GremlinOutput::Sections(sections).into_script())
        }
    })
}

/// Generate one combined script regardless of the configured output shape.
pub fn to_gremlin_string(model: &GraphModel, config: &ToGremlinConfig) -> Result<String> {
    Ok(GremlinOutput::Sections(to_gremlin_sections(model, config)?).into_script())
}
