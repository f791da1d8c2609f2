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


//! Index creation for both script profiles.
//!
//! For file export each index is a group of key lookups followed by its
//! build call, placed inside the main management block. For live apply each
//! index runs in its own transaction:
//!
//! ```text
//! g.tx().rollback()
//! mgmt = g.getGraph().openManagement()
//! name = mgmt.getPropertyKey('name')
//! mgmt.buildIndex('byName', Vertex.class).addKey(name).buildCompositeIndex()
//! mgmt.commit()
//! ManagementSystem.awaitGraphIndexStatus(g.getGraph(), 'byName').call()
//!
//! mgmt = g.getGraph().openManagement()
//! mgmt.updateIndex(mgmt.getGraphIndex("byName"), SchemaAction.REINDEX).get()
//! mgmt.commit()
//! ```

use super::{
    commit_management, get_edge_label, get_property_key, get_vertex_label, open_management,
    rollback, MANAGEMENT,
};
use crate::script::{quote_double, quote_single, GremlinScript, GremlinStatement, StatementKind};
use janusforge_core::{ElementScope, IndexDefinition, ResolvedSchema};

fn lookups(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| get_property_key(k)).collect()
}

/// Lookup and build lines for one index.
fn creation_lines(index: &IndexDefinition) -> Vec<String> {
    match index {
        IndexDefinition::Composite {
            name,
            scope,
            keys,
            unique,
            index_only,
        } => {
            let mut lines = lookups(&index.key_names());
            if let Some(label) = index_only {
                lines.push(match scope {
                    ElementScope::Vertex => get_vertex_label(label),
                    ElementScope::Edge => get_edge_label(label),
                });
            }

            let mut build = format!(
                "{}.buildIndex({}, {})",
                MANAGEMENT,
                quote_single(name),
                scope.class_literal()
            );
            for key in keys {
                build.push_str(&format!(".addKey({})", key));
            }
            if *unique {
                build.push_str(".unique()");
            }
            if let Some(label) = index_only {
                build.push_str(&format!(".indexOnly({})", label));
            }
            build.push_str(".buildCompositeIndex()");
            lines.push(build);
            lines
        }
        IndexDefinition::Mixed {
            name,
            scope,
            keys,
            backend,
        } => {
            let mut lines = lookups(&index.key_names());
            let mut build = format!(
                "{}.buildIndex({}, {})",
                MANAGEMENT,
                quote_single(name),
                scope.class_literal()
            );
            for key in keys {
                if key.is_text() {
                    build.push_str(&format!(".addKey({})", key.name));
                } else {
                    build.push_str(&format!(
                        ".addKey({}, Mapping.{}.asParameter())",
                        key.name, key.mapping
                    ));
                }
            }
            build.push_str(&format!(".buildMixedIndex({})", quote_double(backend)));
            lines.push(build);
            lines
        }
        IndexDefinition::VertexCentric {
            name,
            edge_label,
            keys,
            direction,
            order,
        } => {
            let mut lines = lookups(&index.key_names());
            lines.push(get_edge_label(edge_label));
            let mut arguments = vec![
                edge_label.clone(),
                quote_single(name),
                format!("Direction.{}", direction.as_str()),
                format!("Order.{}", order.as_str()),
            ];
            arguments.extend(keys.iter().cloned());
            lines.push(format!(
                "{}.buildEdgeIndex({})",
                MANAGEMENT,
                arguments.join(", ")
            ));
            lines
        }
    }
}

fn all_indexes(schema: &ResolvedSchema) -> impl Iterator<Item = &IndexDefinition> {
    schema
        .composite_indexes
        .iter()
        .chain(schema.mixed_indexes.iter())
        .chain(schema.vertex_centric_indexes.iter())
}

/// Index creation groups for the file-export profile.
///
/// Composite indexes come first, then mixed, then vertex-centric.
pub fn index_creation_script(schema: &ResolvedSchema) -> GremlinScript {
    all_indexes(schema)
        .map(|index| GremlinStatement {
            kind: StatementKind::Index,
            lines: creation_lines(index),
        })
        .collect()
}

fn await_line(traversal_source: &str, index: &IndexDefinition) -> String {
    match index {
        IndexDefinition::VertexCentric {
            name, edge_label, ..
        } => format!(
            "ManagementSystem.awaitRelationIndexStatus({}.getGraph(), {}, {}).call()",
            traversal_source,
            quote_single(name),
            quote_single(edge_label)
        ),
        other => format!(
            "ManagementSystem.awaitGraphIndexStatus({}.getGraph(), {}).call()",
            traversal_source,
            quote_single(other.name())
        ),
    }
}

fn reindex_lines(traversal_source: &str, index: &IndexDefinition) -> Vec<String> {
    let mut lines = vec![String::new(), open_management(traversal_source)];
    match index {
        IndexDefinition::VertexCentric {
            name, edge_label, ..
        } => {
            lines.push(get_edge_label(edge_label));
            lines.push(format!(
                "{m}.updateIndex({m}.getRelationIndex({}, {}), SchemaAction.REINDEX).get()",
                edge_label,
                quote_single(name),
                m = MANAGEMENT
            ));
        }
        other => lines.push(format!(
            "{m}.updateIndex({m}.getGraphIndex({}), SchemaAction.REINDEX).get()",
            quote_double(other.name()),
            m = MANAGEMENT
        )),
    }
    lines.push(commit_management());
    lines
}

fn live_statement(traversal_source: &str, index: &IndexDefinition) -> GremlinStatement {
    let mut lines = vec![rollback(traversal_source), open_management(traversal_source)];
    lines.extend(creation_lines(index));
    lines.push(commit_management());
    lines.push(await_line(traversal_source, index));
    lines.extend(reindex_lines(traversal_source, index));
    GremlinStatement {
        kind: StatementKind::Index,
        lines,
    }
}

/// Index creation for the apply-to-live profile, one transaction per index.
pub fn live_index_script(schema: &ResolvedSchema, traversal_source: &str) -> GremlinScript {
    all_indexes(schema)
        .map(|index| live_statement(traversal_source, index))
        .collect()
}
