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


//! Sample data script generation.
//!
//! The sample data script creates one vertex per collection and one edge per
//! relationship, filled from the entity's sample document. It has four
//! sections: graph variables, vertices, edges, and the final commit.

use crate::error::Result;
use crate::mapping::{meta_property_arguments, sample_literal, BASE_DEPTH};
use crate::script::{join_sections, quote_double, GremlinScript, GremlinStatement, StatementKind};
use janusforge_core::{
    resolve_properties, sanitize, GraphModel, GraphVariable, PropertySchema, RelationshipEntity,
    VertexEntity,
};
use serde_json::Value;

const PROPERTY_INDENT: &str = "    ";

/// The literal for a graph variable value.
///
/// Text that parses as a JSON number, boolean or structure is emitted raw;
/// anything else is quoted.
pub fn variable_literal(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(_)) | Err(_) => quote_double(text),
        Ok(_) => text.to_string(),
    }
}

/// Render the graph variable assignments.
///
/// Variables without a key are skipped.
pub fn variables_statement(variables: &[GraphVariable], traversal_source: &str) -> GremlinStatement {
    variables
        .iter()
        .filter_map(|variable| {
            let key = variable.key.as_deref().filter(|k| !k.is_empty())?;
            Some(format!(
                "{}.getGraph().variables().set({}, {});",
                traversal_source,
                quote_double(key),
                variable_literal(&variable.value_text())
            ))
        })
        .fold(GremlinStatement::new(StatementKind::Variable), |statement, line| {
            statement.with_line(line)
        })
}

fn property_lines(schema: &PropertySchema, owner: &str, sample: &Value) -> Vec<String> {
    resolve_properties(schema)
        .iter()
        .map(|(name, property)| {
            let literal = sample_literal(property, sample.get(name), BASE_DEPTH);
            let mut arguments = vec![quote_double(&sanitize(name)), literal];
            arguments.extend(meta_property_arguments(&property.meta_properties));
            format!(
                "{}{}.property({});",
                PROPERTY_INDENT,
                owner,
                arguments.join(", ")
            )
        })
        .collect()
}

/// Render the statement creating one sample vertex.
pub fn vertex_statement(
    vertex: &VertexEntity,
    sample: &Value,
    traversal_source: &str,
) -> GremlinStatement {
    let name = vertex.label();
    let mut statement = GremlinStatement::line(
        StatementKind::Vertex,
        format!(
            "{} = {}.getGraph().addVertex({});",
            name,
            traversal_source,
            quote_double(&name)
        ),
    );
    for line in property_lines(&vertex.schema, &name, sample) {
        statement.push(line);
    }
    statement
}

/// Render the statement creating one sample edge between two vertex
/// variables.
pub fn edge_statement(
    relationship: &RelationshipEntity,
    from: &str,
    to: &str,
    sample: &Value,
) -> GremlinStatement {
    let name = relationship.label();
    let mut statement = GremlinStatement::new(StatementKind::Edge)
        .with_line(format!("{} = {}.", name, from))
        .with_line(format!("{}addEdge({}, {});", PROPERTY_INDENT, quote_double(&name), to));
    for line in property_lines(&relationship.schema, &name, sample) {
        statement.push(line);
    }
    statement
}

fn endpoint<'a>(model: &'a GraphModel, id: Option<&str>) -> Option<&'a VertexEntity> {
    id.and_then(|id| model.vertex(id))
}

/// Render all sample edges. Relationships with an endpoint outside the
/// model's vertices are skipped.
pub fn edges_script(model: &GraphModel) -> Result<GremlinScript> {
    let mut script = GremlinScript::new();
    for relationship in &model.relationships {
        let from = endpoint(model, relationship.parent_collection.as_deref());
        let to = endpoint(model, relationship.child_collection.as_deref());
        let (Some(from), Some(to)) = (from, to) else {
            tracing::warn!(
                relationship = %relationship.label(),
                "skipping sample edge with unresolved endpoint"
            );
            continue;
        };
        let sample = model.sample(&relationship.id)?;
        script.add(edge_statement(relationship, &from.label(), &to.label(), &sample));
    }
    Ok(script)
}

/// Render all sample vertices.
pub fn vertices_script(model: &GraphModel, traversal_source: &str) -> Result<GremlinScript> {
    let mut script = GremlinScript::new();
    for vertex in &model.vertices {
        let sample = model.sample(&vertex.id)?;
        script.add(vertex_statement(vertex, &sample, traversal_source));
    }
    Ok(script)
}

/// Render the complete sample data script.
pub fn sample_data_script(model: &GraphModel) -> Result<String> {
    let traversal_source = model.graph.traversal_source();
    let variables = variables_statement(&model.graph.graph_variables, &traversal_source).render();
    let vertices = vertices_script(model, &traversal_source)?.render();
    let edges = edges_script(model)?.render();
    let commit = format!("{}.tx().commit();", traversal_source);

    tracing::debug!(
        vertices = model.vertices.len(),
        relationships = model.relationships.len(),
        "rendered sample data"
    );
    Ok(join_sections([variables, vertices, edges, commit]))
}
