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


//! Vertex and edge label creation.

use super::{add_properties_line, ttl_line, MANAGEMENT};
use crate::script::{quote_single, GremlinScript, GremlinStatement, StatementKind};
use janusforge_core::{EdgeLabelDefinition, VertexLabelDefinition};

/// `makeVertexLabel` with its TTL and property association.
pub fn vertex_label_statement(label: &VertexLabelDefinition) -> GremlinStatement {
    let modifier = if label.static_vertex { ".setStatic()" } else { "" };
    let make = format!(
        "{} = {}.makeVertexLabel({}){}.make()",
        label.name,
        MANAGEMENT,
        quote_single(&label.name),
        modifier
    );
    let ttl = if label.static_vertex {
        ttl_line(&label.name, label.ttl)
    } else {
        None
    };

    GremlinStatement::new(StatementKind::VertexLabel)
        .with_line(make)
        .with_optional(ttl)
        .with_optional(add_properties_line(&label.name, &label.properties))
}

/// All vertex labels.
pub fn vertex_label_script(labels: &[VertexLabelDefinition]) -> GremlinScript {
    labels.iter().map(vertex_label_statement).collect()
}

/// `makeEdgeLabel` with its TTL, property association and connection.
pub fn edge_label_statement(label: &EdgeLabelDefinition) -> GremlinStatement {
    let modifier = if label.bi_directional { "" } else { ".unidirected()" };
    let make = format!(
        "{} = {}.makeEdgeLabel({}).multiplicity({}){}.make()",
        label.name,
        MANAGEMENT,
        quote_single(&label.name),
        label.multiplicity.as_str(),
        modifier
    );
    let (from, to) = &label.connection;

    GremlinStatement::new(StatementKind::EdgeLabel)
        .with_line(make)
        .with_optional(ttl_line(&label.name, label.ttl))
        .with_optional(add_properties_line(&label.name, &label.properties))
        .with_line(format!(
            "{}.addConnection({}, {}, {})",
            MANAGEMENT, label.name, from, to
        ))
}

/// All edge labels.
pub fn edge_label_script(labels: &[EdgeLabelDefinition]) -> GremlinScript {
    labels.iter().map(edge_label_statement).collect()
}
