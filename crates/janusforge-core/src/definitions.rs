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

//! Schema definitions resolved against a [`GraphModel`].
//!
//! Resolution turns entity documents into label, key and index definitions
//! whose references have been looked up. References that cannot be resolved
//! are recorded in [`ResolvedSchema::skipped`] so the caller decides whether
//! they are fatal. An `indexOnly` composite index whose owner is unknown is
//! always an error.

use crate::choices::resolve_properties;
use crate::error::{ModelError, Result};
use crate::model::{
    GraphModel, IndexDeclaration, Multiplicity, DEFAULT_INDEXING_BACKEND,
};
use crate::name::sanitize;
use crate::schema::{Cardinality, PropertyMap, PropertySchema, Ttl};
use std::fmt;

/// A property key to create.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyKeyDefinition {
    /// Sanitized key name.
    pub name: String,
    /// Declared shape.
    pub schema: PropertySchema,
}

impl PropertyKeyDefinition {
    /// Declared cardinality, `SINGLE` when absent.
    pub fn cardinality(&self) -> Cardinality {
        self.schema.cardinality.unwrap_or_default()
    }

    /// Declared TTL, when positive.
    pub fn ttl(&self) -> Option<Ttl> {
        self.schema.ttl.filter(Ttl::is_active)
    }
}

/// A vertex label to create.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLabelDefinition {
    /// Sanitized label name.
    pub name: String,
    /// Sanitized property names in order.
    pub properties: Vec<String>,
    /// Static vertex flag.
    pub static_vertex: bool,
    /// Label TTL. Only kept for static vertices.
    pub ttl: Option<Ttl>,
}

/// An edge label to create.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabelDefinition {
    /// Sanitized label name.
    pub name: String,
    /// Edge multiplicity.
    pub multiplicity: Multiplicity,
    /// Emit `.unidirected()` when false.
    pub bi_directional: bool,
    /// Sanitized property names in order.
    pub properties: Vec<String>,
    /// Label TTL, when positive.
    pub ttl: Option<Ttl>,
    /// Resolved `(from, to)` vertex labels.
    pub connection: (String, String),
}

/// Whether a graph index targets vertices or edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementScope {
    /// `Vertex.class`
    Vertex,
    /// `Edge.class`
    Edge,
}

impl ElementScope {
    /// The class literal.
    pub fn class_literal(self) -> &'static str {
        match self {
            ElementScope::Vertex => "Vertex.class",
            ElementScope::Edge => "Edge.class",
        }
    }
}

/// Traversal direction of a vertex-centric index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Outgoing edges.
    Out,
    /// Incoming edges.
    In,
    /// Both directions.
    #[default]
    Both,
}

impl Direction {
    /// Parse a direction name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "OUT" => Some(Direction::Out),
            "IN" => Some(Direction::In),
            "BOTH" => Some(Direction::Both),
            _ => None,
        }
    }

    /// The constant name.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Out => "OUT",
            Direction::In => "IN",
            Direction::Both => "BOTH",
        }
    }
}

/// Sort order of a vertex-centric index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// `descending` (or any `desc` prefix) is descending, anything else ascending.
    pub fn parse(name: &str) -> Self {
        if name.to_ascii_lowercase().starts_with("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    /// The constant name.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A key of a mixed index with its text mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct MixedKey {
    /// Sanitized property name.
    pub name: String,
    /// Mapping constant, `TEXT` by default.
    pub mapping: String,
}

impl MixedKey {
    /// Whether the key uses the default mapping.
    pub fn is_text(&self) -> bool {
        self.mapping == "TEXT"
    }
}

/// A resolved index.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexDefinition {
    /// Exact-match graph index.
    Composite {
        /// Index name.
        name: String,
        /// Vertex or edge scope.
        scope: ElementScope,
        /// Sanitized key names.
        keys: Vec<String>,
        /// Uniqueness constraint.
        unique: bool,
        /// Label the index is restricted to.
        index_only: Option<String>,
    },
    /// Search-backend graph index.
    Mixed {
        /// Index name.
        name: String,
        /// Vertex or edge scope.
        scope: ElementScope,
        /// Keys with mappings.
        keys: Vec<MixedKey>,
        /// Backing index name.
        backend: String,
    },
    /// Relation index on one edge label.
    VertexCentric {
        /// Index name.
        name: String,
        /// Owning edge label.
        edge_label: String,
        /// Sanitized key names.
        keys: Vec<String>,
        /// Direction.
        direction: Direction,
        /// Sort order.
        order: SortOrder,
    },
}

impl IndexDefinition {
    /// The index name.
    pub fn name(&self) -> &str {
        match self {
            IndexDefinition::Composite { name, .. }
            | IndexDefinition::Mixed { name, .. }
            | IndexDefinition::VertexCentric { name, .. } => name,
        }
    }

    /// Sanitized names of every key the index reads.
    pub fn key_names(&self) -> Vec<&str> {
        match self {
            IndexDefinition::Composite { keys, .. } | IndexDefinition::VertexCentric { keys, .. } => {
                keys.iter().map(String::as_str).collect()
            }
            IndexDefinition::Mixed { keys, .. } => keys.iter().map(|k| k.name.as_str()).collect(),
        }
    }
}

/// What kind of reference could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// An edge endpoint.
    EdgeEndpoint,
    /// The owning edge of a vertex-centric index.
    IndexEdge,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceKind::EdgeEndpoint => "edge endpoint",
            ReferenceKind::IndexEdge => "vertex-centric index edge",
        })
    }
}

/// A reference that was skipped during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    /// Reference kind.
    pub kind: ReferenceKind,
    /// Name of the element holding the reference.
    pub name: String,
    /// The id that could not be found.
    pub id: String,
}

/// All definitions of a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSchema {
    /// Property keys in first-seen order.
    pub property_keys: Vec<PropertyKeyDefinition>,
    /// Vertex labels in document order.
    pub vertex_labels: Vec<VertexLabelDefinition>,
    /// Edge labels, deduplicated by name.
    pub edge_labels: Vec<EdgeLabelDefinition>,
    /// Active composite indexes.
    pub composite_indexes: Vec<IndexDefinition>,
    /// Active mixed indexes.
    pub mixed_indexes: Vec<IndexDefinition>,
    /// Active vertex-centric indexes.
    pub vertex_centric_indexes: Vec<IndexDefinition>,
    /// References skipped during resolution.
    pub skipped: Vec<UnresolvedReference>,
}

fn same_shape(a: &PropertySchema, b: &PropertySchema) -> bool {
    a.kind == b.kind && a.subtype == b.subtype
}

/// Collect property keys across vertices, relationships and shared definitions.
///
/// A name seen twice keeps its first position and takes the last definition.
pub fn property_keys(model: &GraphModel) -> Vec<PropertyKeyDefinition> {
    let owners = model
        .vertices
        .iter()
        .map(|v| &v.schema)
        .chain(model.relationships.iter().map(|r| &r.schema))
        .chain(model.definitions.iter());

    let mut keys = PropertyMap::new();
    for owner in owners {
        for (raw_name, schema) in resolve_properties(owner) {
            let name = sanitize(&raw_name);
            if let Some(previous) = keys.get(&name) {
                if !same_shape(previous, &schema) {
                    tracing::warn!(
                        property = %name,
                        previous = ?previous.type_name(),
                        replacement = ?schema.type_name(),
                        "property key redefined with a different shape; the last definition wins"
                    );
                }
            }
            keys.insert(name, schema);
        }
    }

    keys.into_iter()
        .map(|(name, schema)| PropertyKeyDefinition { name, schema })
        .collect()
}

fn property_names(schema: &PropertySchema) -> Vec<String> {
    resolve_properties(schema).keys().map(sanitize).collect()
}

/// Build the vertex label definitions.
pub fn vertex_labels(model: &GraphModel) -> Vec<VertexLabelDefinition> {
    model
        .vertices
        .iter()
        .map(|vertex| VertexLabelDefinition {
            name: vertex.label(),
            properties: property_names(&vertex.schema),
            static_vertex: vertex.static_vertex,
            ttl: vertex
                .vertex_ttl
                .filter(|ttl| vertex.static_vertex && ttl.is_active()),
        })
        .collect()
}

/// Build the edge label definitions, skipping edges with unknown endpoints.
pub fn edge_labels(model: &GraphModel) -> (Vec<EdgeLabelDefinition>, Vec<UnresolvedReference>) {
    let mut labels: Vec<EdgeLabelDefinition> = Vec::new();
    let mut skipped = Vec::new();

    for relationship in &model.relationships {
        let name = relationship.label();
        if labels.iter().any(|l| l.name == name) {
            continue;
        }

        let endpoint = |id: &Option<String>| {
            id.as_deref()
                .and_then(|id| model.vertex(id))
                .map(|v| v.label())
                .ok_or_else(|| UnresolvedReference {
                    kind: ReferenceKind::EdgeEndpoint,
                    name: name.clone(),
                    id: id.clone().unwrap_or_default(),
                })
        };

        match (
            endpoint(&relationship.parent_collection),
            endpoint(&relationship.child_collection),
        ) {
            (Ok(from), Ok(to)) => labels.push(EdgeLabelDefinition {
                name,
                multiplicity: relationship.multiplicity,
                bi_directional: relationship.bi_directional,
                properties: property_names(&relationship.schema),
                ttl: relationship.edge_ttl.filter(Ttl::is_active),
                connection: (from, to),
            }),
            (Err(missing), _) | (_, Err(missing)) => {
                tracing::warn!(
                    edge = %missing.name,
                    id = %missing.id,
                    "skipping edge label with an unresolved endpoint"
                );
                skipped.push(missing);
            }
        }
    }

    (labels, skipped)
}

fn scope_of(model: &GraphModel, declaration: &IndexDeclaration) -> Option<ElementScope> {
    let first = declaration.index_key.first()?;
    Some(match first.owner() {
        Some(owner) if model.is_vertex_id(owner) => ElementScope::Vertex,
        _ => ElementScope::Edge,
    })
}

fn key_names(declaration: &IndexDeclaration) -> Vec<String> {
    declaration.index_key.iter().map(|k| sanitize(&k.name)).collect()
}

/// Resolve one composite index declaration.
///
/// Returns `Ok(None)` for declarations without keys.
pub fn composite_index(
    model: &GraphModel,
    declaration: &IndexDeclaration,
) -> Result<Option<IndexDefinition>> {
    let Some(scope) = scope_of(model, declaration) else {
        return Ok(None);
    };

    let index_only = if declaration.index_only {
        let owner = declaration
            .index_key
            .first()
            .and_then(|k| k.owner())
            .unwrap_or_default();
        let label = match scope {
            ElementScope::Vertex => model.vertex(owner).map(|v| v.label()),
            ElementScope::Edge => model.relationship(owner).map(|r| r.label()),
        };
        match label {
            Some(label) => Some(label),
            None => {
                return Err(ModelError::UnresolvedIndexTarget {
                    index: declaration.name.clone(),
                    owner: owner.to_string(),
                })
            }
        }
    } else {
        None
    };

    Ok(Some(IndexDefinition::Composite {
        name: declaration.name.clone(),
        scope,
        keys: key_names(declaration),
        unique: declaration.unique,
        index_only,
    }))
}

/// Resolve one mixed index declaration.
pub fn mixed_index(model: &GraphModel, declaration: &IndexDeclaration) -> Option<IndexDefinition> {
    let scope = scope_of(model, declaration)?;
    let keys = declaration
        .index_key
        .iter()
        .map(|k| MixedKey {
            name: sanitize(&k.name),
            mapping: k
                .mapping
                .as_deref()
                .filter(|m| !m.is_empty())
                .unwrap_or("TEXT")
                .to_string(),
        })
        .collect();
    let backend = declaration
        .indexing_backend
        .as_deref()
        .filter(|b| !b.is_empty())
        .unwrap_or(DEFAULT_INDEXING_BACKEND)
        .to_string();

    Some(IndexDefinition::Mixed {
        name: declaration.name.clone(),
        scope,
        keys,
        backend,
    })
}

/// Resolve one vertex-centric index declaration.
pub fn vertex_centric_index(
    model: &GraphModel,
    declaration: &IndexDeclaration,
) -> std::result::Result<Option<IndexDefinition>, UnresolvedReference> {
    let Some(first) = declaration.index_key.first() else {
        return Ok(None);
    };
    let owner = first.owner().unwrap_or_default();
    let edge = model.relationship(owner).ok_or_else(|| UnresolvedReference {
        kind: ReferenceKind::IndexEdge,
        name: declaration.name.clone(),
        id: owner.to_string(),
    })?;

    Ok(Some(IndexDefinition::VertexCentric {
        name: declaration.name.clone(),
        edge_label: edge.label(),
        keys: key_names(declaration),
        direction: declaration
            .direction
            .as_deref()
            .and_then(Direction::parse)
            .unwrap_or_default(),
        order: declaration
            .order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default(),
    }))
}

impl ResolvedSchema {
    /// Resolve every definition of a model.
    pub fn resolve(model: &GraphModel) -> Result<Self> {
        let (edge_labels, mut skipped) = edge_labels(model);

        let mut composite_indexes = Vec::new();
        for declaration in model.indexes.composite_indexes.iter().filter(|d| d.is_active()) {
            if let Some(index) = composite_index(model, declaration)? {
                composite_indexes.push(index);
            }
        }

        let mixed_indexes = model
            .indexes
            .mixed_indexes
            .iter()
            .filter(|d| d.is_active())
            .filter_map(|d| mixed_index(model, d))
            .collect();

        let mut vertex_centric_indexes = Vec::new();
        for declaration in model
            .indexes
            .vertex_centric_indexes
            .iter()
            .filter(|d| d.is_active())
        {
            match vertex_centric_index(model, declaration) {
                Ok(Some(index)) => vertex_centric_indexes.push(index),
                Ok(None) => {}
                Err(missing) => {
                    tracing::warn!(
                        index = %missing.name,
                        id = %missing.id,
                        "skipping vertex-centric index with an unresolved edge label"
                    );
                    skipped.push(missing);
                }
            }
        }

        Ok(Self {
            property_keys: property_keys(model),
            vertex_labels: vertex_labels(model),
            edge_labels,
            composite_indexes,
            mixed_indexes,
            vertex_centric_indexes,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelInput;
    use crate::schema::PropertyKind;
    use serde_json::json;

    fn model(value: serde_json::Value) -> GraphModel {
        let input: ModelInput = serde_json::from_value(value).unwrap();
        GraphModel::from_input(input).unwrap()
    }

    fn person_model() -> GraphModel {
        model(json!({
            "collections": [{
                "GUID": "v1",
                "collectionName": "Person",
                "properties": {"name": {"type": "string"}, "age": {"type": "number", "mode": "integer"}}
            }],
            "relationships": [
                {"GUID": "e1", "name": "knows", "parentCollection": "v1", "childCollection": "v1",
                 "properties": {"since": {"type": "date"}}},
                {"GUID": "e2", "name": "hates", "parentCollection": "v1", "childCollection": "ghost"}
            ],
            "containerData": [{}, {
                "compositeIndexes": [
                    {"name": "byName", "indexKey": [{"name": "name", "path": ["v1"]}], "unique": true},
                    {"name": "off", "indexKey": [{"name": "name", "path": ["v1"]}], "isActivated": false}
                ],
                "vertexCentricIndexes": [
                    {"name": "bySince", "indexKey": [{"name": "since", "path": ["e1"]}], "order": "descending"},
                    {"name": "orphan", "indexKey": [{"name": "since", "path": ["nope"]}]}
                ]
            }]
        }))
    }

    #[test]
    fn test_property_keys_last_wins_first_position() {
        let m = model(json!({
            "collections": [
                {"GUID": "a", "properties": {"x": {"type": "string"}, "y": {"type": "date"}}},
                {"GUID": "b", "properties": {"x": {"type": "number"}}}
            ]
        }));
        let keys = property_keys(&m);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].name, "x");
        assert_eq!(keys[0].schema.kind, Some(PropertyKind::Number(None)));
        assert_eq!(keys[1].name, "y");
    }

    #[test]
    fn test_property_keys_include_choice_properties() {
        let m = model(json!({
            "collections": [{"GUID": "a", "properties": {"x": {"type": "string"}},
                "oneOf": [{"properties": {"picked": {"type": "boolean"}}}]}]
        }));
        let names: Vec<_> = property_keys(&m).into_iter().map(|k| k.name).collect();
        assert_eq!(names, vec!["x", "picked"]);
    }

    #[test]
    fn test_vertex_ttl_only_for_static() {
        let m = model(json!({
            "collections": [
                {"GUID": "a", "collectionName": "A", "vertexTTL": {"TTLValue": 5}},
                {"GUID": "b", "collectionName": "B", "staticVertex": true, "vertexTTL": {"TTLValue": 5}}
            ]
        }));
        let labels = vertex_labels(&m);
        assert_eq!(labels[0].ttl, None);
        assert_eq!(labels[1].ttl, Some(Ttl::seconds(5)));
    }

    #[test]
    fn test_edge_with_unknown_endpoint_skipped() {
        let resolved = ResolvedSchema::resolve(&person_model()).unwrap();
        assert_eq!(resolved.edge_labels.len(), 1);
        assert_eq!(resolved.edge_labels[0].connection, ("Person".into(), "Person".into()));
        assert!(resolved
            .skipped
            .iter()
            .any(|s| s.kind == ReferenceKind::EdgeEndpoint && s.id == "ghost"));
    }

    #[test]
    fn test_indexes_resolved() {
        let resolved = ResolvedSchema::resolve(&person_model()).unwrap();
        assert_eq!(resolved.composite_indexes.len(), 1);
        match &resolved.composite_indexes[0] {
            IndexDefinition::Composite { scope, unique, keys, .. } => {
                assert_eq!(*scope, ElementScope::Vertex);
                assert!(*unique);
                assert_eq!(keys, &vec!["name".to_string()]);
            }
            other => panic!("unexpected index {:?}", other),
        }

        assert_eq!(resolved.vertex_centric_indexes.len(), 1);
        match &resolved.vertex_centric_indexes[0] {
            IndexDefinition::VertexCentric { edge_label, order, direction, .. } => {
                assert_eq!(edge_label, "knows");
                assert_eq!(*order, SortOrder::Desc);
                assert_eq!(*direction, Direction::Both);
            }
            other => panic!("unexpected index {:?}", other),
        }
        assert!(resolved.skipped.iter().any(|s| s.kind == ReferenceKind::IndexEdge));
    }

    #[test]
    fn test_index_only_unknown_owner_fails() {
        let m = model(json!({
            "containerData": [{}, {"compositeIndexes": [
                {"name": "broken", "indexOnly": true, "indexKey": [{"name": "x", "path": ["missing"]}]}
            ]}]
        }));
        let err = ResolvedSchema::resolve(&m).unwrap_err();
        assert!(matches!(err, ModelError::UnresolvedIndexTarget { .. }));
    }

    #[test]
    fn test_mixed_index_defaults() {
        let m = model(json!({
            "collections": [{"GUID": "v1", "collectionName": "P"}],
            "containerData": [{}, {"mixedIndexes": [
                {"name": "text", "indexKey": [
                    {"name": "bio", "path": ["v1"]},
                    {"name": "tag", "path": ["v1"], "type": "STRING"}
                ]}
            ]}]
        }));
        let resolved = ResolvedSchema::resolve(&m).unwrap();
        match &resolved.mixed_indexes[0] {
            IndexDefinition::Mixed { backend, keys, scope, .. } => {
                assert_eq!(backend, "search");
                assert!(keys[0].is_text());
                assert_eq!(keys[1].mapping, "STRING");
                assert_eq!(*scope, ElementScope::Vertex);
            }
            other => panic!("unexpected index {:?}", other),
        }
    }
}
