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


//! JanusGraph Groovy scripts from property-graph models, and models back
//! from a live JanusGraph server.
//!
//! # Forward
//!
//! A [`GraphModel`](janusforge_core::GraphModel) renders to a schema script
//! (property keys, vertex labels, edge labels, indexes) and a sample-data
//! script:
//!
//! | Model concept | Script |
//! |---------------|--------|
//! | Top-level property | `mgmt.makePropertyKey(...)` |
//! | Vertex entity | `mgmt.makeVertexLabel(...)` |
//! | Relationship | `mgmt.makeEdgeLabel(...)` plus `addConnection` |
//! | Composite / mixed index | `mgmt.buildIndex(...)` |
//! | Vertex-centric index | `mgmt.buildEdgeIndex(...)` |
//! | Sample document | `addVertex` / `addEdge` with `.property(...)` |
//!
//! Two profiles exist. [`ScriptProfile::FileExport`] emits one script with
//! indexes inside the management block. [`ScriptProfile::ApplyToLive`]
//! builds each index in its own transaction and waits for it to register
//! before reindexing.
//!
//! ```rust
//! use janusforge_core::GraphModel;
//! use janusforge_gremlin::{to_gremlin_string, ToGremlinConfig};
//!
//! let model = GraphModel::from_json(r#"{
//!     "collections": [{"GUID": "p", "collectionName": "Person",
//!                      "properties": {"name": {"type": "string"}}}]
//! }"#).unwrap();
//!
//! let script = to_gremlin_string(&model, &ToGremlinConfig::new().without_sample_data()).unwrap();
//! assert!(script.contains("mgmt.makeVertexLabel('Person').make()"));
//! ```
//!
//! # Reverse
//!
//! A [`Session`] over any [`GraphClient`] samples labels and edge
//! connections into [`LabelPackage`]s and [`RelationshipPackage`]. GraphSON
//! results are interpreted by [`mapping::schema_from_graphson`] and merged
//! with [`mapping::merge_schemas`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod from_gremlin;
pub mod mapping;
pub mod sample_data;
pub mod schema;
pub mod script;
pub mod to_gremlin;

pub use config::{
    GraphBootstrap, OutputMode, RecordSampling, SamplingConfig, SamplingConfigBuilder,
    ScriptProfile, ToGremlinConfig, ToGremlinConfigBuilder, DEFAULT_RELATIONSHIP_PROBE_BASE,
};
pub use error::{GremlinError, Result};
pub use from_gremlin::{
    reverse_engineer, DatabaseRequest, GraphClient, LabelPackage, Progress, ProgressSink,
    RelationshipPackage, ResultSet, ReverseResult, Sampler, Session, TracingProgress,
    TraversalLookup,
};
pub use mapping::{merge_schemas, schema_from_graphson};
pub use sample_data::sample_data_script;
pub use script::{GremlinScript, GremlinStatement, ScriptSection};
pub use to_gremlin::{
    schema_script, to_gremlin, to_gremlin_sections, to_gremlin_string, GremlinOutput,
};

use janusforge_core::GraphModel;
use tracing::{error, info};

/// Render the schema of `model` for a live server and submit it.
///
/// The script uses the [`ScriptProfile::ApplyToLive`] profile and opens
/// the existing graph. Script failures reported by the server surface as
/// [`GremlinError::Engine`].
pub async fn apply_schema(session: &Session, model: &GraphModel) -> Result<ResultSet> {
    apply_schema_with(session, model, &ToGremlinConfig::for_live_apply()).await
}

/// Render `model` with `config` and submit the script through `session`.
pub async fn apply_schema_with(
    session: &Session,
    model: &GraphModel,
    config: &ToGremlinConfig,
) -> Result<ResultSet> {
    let script = to_gremlin_string(model, config)?;
    info!(statements = script.lines().count(), "applying schema script");
    session.submit(&script).await.map_err(|err| {
        error!(error = %err, "schema script failed");
        err
    })
}
