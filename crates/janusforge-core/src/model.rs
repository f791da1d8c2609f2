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

//! Parsed model documents.
//!
//! [`ModelInput`] is the payload handed over by the modeling tool. Each
//! collection, relationship and sample document in it may be inline JSON or a
//! JSON-encoded string; [`GraphModel::from_input`] decodes both forms and
//! reports the offending document when one does not parse.

use crate::error::{ModelError, Result};
use crate::name::sanitize;
use crate::schema::{PropertySchema, Ttl};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Default graph name when the container declares none.
pub const DEFAULT_GRAPH_NAME: &str = "graph";

/// Default traversal source alias.
pub const DEFAULT_TRAVERSAL_SOURCE: &str = "g";

/// Default backing index of mixed indexes.
pub const DEFAULT_INDEXING_BACKEND: &str = "search";

/// Raw model payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelInput {
    /// Vertex documents, inline or JSON-encoded.
    pub collections: Vec<Value>,
    /// Edge documents, inline or JSON-encoded.
    pub relationships: Vec<Value>,
    /// Shared definitions fragment.
    pub model_definitions: Option<Value>,
    /// `[graphMetadata, indexMetadata]`.
    pub container_data: Value,
    /// Sample documents keyed by entity id.
    pub json_data: Map<String, Value>,
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => !s.is_empty() && s != "false",
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A vertex collection.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VertexEntity {
    /// Entity identifier.
    #[serde(rename = "GUID", default)]
    pub id: String,
    /// Display name.
    #[serde(rename = "collectionName", default)]
    pub collection_name: Option<String>,
    /// Technical name, used when the display name is empty.
    #[serde(default)]
    pub code: Option<String>,
    /// Whether the label is static.
    #[serde(rename = "staticVertex", default, deserialize_with = "truthy")]
    pub static_vertex: bool,
    /// Label TTL, honored only for static vertices.
    #[serde(rename = "vertexTTL", default)]
    pub vertex_ttl: Option<Ttl>,
    /// Properties and choice groups.
    #[serde(flatten)]
    pub schema: PropertySchema,
}

impl VertexEntity {
    /// The sanitized vertex label.
    pub fn label(&self) -> String {
        sanitize(non_empty(&self.collection_name).or(non_empty(&self.code)).unwrap_or_default())
    }
}

/// Edge multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Multiplicity {
    /// Any number of parallel edges.
    #[default]
    Multi,
    /// At most one edge between a pair of vertices.
    Simple,
    /// At most one outgoing edge.
    Many2One,
    /// At most one incoming edge.
    One2Many,
    /// At most one edge in each direction.
    One2One,
}

impl Multiplicity {
    /// Parse a multiplicity name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "MULTI" => Some(Multiplicity::Multi),
            "SIMPLE" => Some(Multiplicity::Simple),
            "MANY2ONE" => Some(Multiplicity::Many2One),
            "ONE2MANY" => Some(Multiplicity::One2Many),
            "ONE2ONE" => Some(Multiplicity::One2One),
            _ => None,
        }
    }

    /// The management API constant.
    pub fn as_str(self) -> &'static str {
        match self {
            Multiplicity::Multi => "MULTI",
            Multiplicity::Simple => "SIMPLE",
            Multiplicity::Many2One => "MANY2ONE",
            Multiplicity::One2Many => "ONE2MANY",
            Multiplicity::One2One => "ONE2ONE",
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Multiplicity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = Option::<String>::deserialize(deserializer)?;
        Ok(name.as_deref().and_then(Multiplicity::parse).unwrap_or_default())
    }
}

/// An edge relationship.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RelationshipEntity {
    /// Entity identifier.
    #[serde(rename = "GUID", default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Technical name, used when the display name is empty.
    #[serde(default)]
    pub code: Option<String>,
    /// Id of the source vertex collection.
    #[serde(rename = "parentCollection", default)]
    pub parent_collection: Option<String>,
    /// Id of the target vertex collection.
    #[serde(rename = "childCollection", default)]
    pub child_collection: Option<String>,
    /// Edge multiplicity.
    #[serde(default)]
    pub multiplicity: Multiplicity,
    /// Whether traversal is allowed in both directions.
    #[serde(rename = "biDirectional", default, deserialize_with = "truthy")]
    pub bi_directional: bool,
    /// Label TTL.
    #[serde(rename = "edgeTTL", default)]
    pub edge_ttl: Option<Ttl>,
    /// Properties and choice groups.
    #[serde(flatten)]
    pub schema: PropertySchema,
}

impl RelationshipEntity {
    /// The sanitized edge label.
    pub fn label(&self) -> String {
        sanitize(non_empty(&self.name).or(non_empty(&self.code)).unwrap_or_default())
    }
}

/// One `graph.*` configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfiguration {
    /// Configuration key, e.g. `storage.backend`.
    #[serde(rename = "graphConfigurationKey", default)]
    pub key: String,
    /// Configuration value.
    #[serde(rename = "graphConfigurationValue", default)]
    pub value: Value,
}

impl GraphConfiguration {
    /// Create an entry.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The value as script text.
    pub fn value_text(&self) -> String {
        value_text(&self.value)
    }
}

/// Render a scalar as plain text; strings are not quoted.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A graph-level variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphVariable {
    /// Variable key.
    #[serde(rename = "graphVariableKey", default)]
    pub key: Option<String>,
    /// String-encoded value.
    #[serde(rename = "GraphVariableValue", default)]
    pub value: Option<Value>,
}

impl GraphVariable {
    /// Create a variable.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(Value::String(value.into())),
        }
    }

    /// The encoded value text.
    pub fn value_text(&self) -> String {
        self.value.as_ref().map(value_text).unwrap_or_default()
    }
}

/// Graph-level container metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphMetadata {
    /// Technical graph name.
    pub code: Option<String>,
    /// Display graph name.
    pub name: Option<String>,
    /// Traversal source alias.
    pub traversal_source: Option<String>,
    /// Graph factory, `ConfiguredGraphFactory` or anything else.
    pub graph_factory: Option<String>,
    /// Value of `schema.default`.
    pub schema_default: Option<String>,
    /// Whether `schema.constraints` is enabled.
    #[serde(deserialize_with = "truthy")]
    pub schema_constraints: bool,
    /// Whether graph configurations are emitted.
    #[serde(deserialize_with = "truthy")]
    pub use_configuration: bool,
    /// Declared graph configurations.
    pub graph_configurations: Vec<GraphConfiguration>,
    /// Declared graph variables.
    pub graph_variables: Vec<GraphVariable>,
}

impl GraphMetadata {
    /// The sanitized graph name.
    pub fn graph_name(&self) -> String {
        sanitize(
            non_empty(&self.code)
                .or(non_empty(&self.name))
                .unwrap_or(DEFAULT_GRAPH_NAME),
        )
    }

    /// The sanitized traversal source alias.
    pub fn traversal_source(&self) -> String {
        sanitize(non_empty(&self.traversal_source).unwrap_or(DEFAULT_TRAVERSAL_SOURCE))
    }

    /// Whether `ConfiguredGraphFactory` is requested.
    pub fn uses_configured_factory(&self) -> bool {
        self.graph_factory.as_deref() == Some("ConfiguredGraphFactory")
    }
}

/// A property reference inside an index declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexKeyRef {
    /// Property name.
    #[serde(default)]
    pub name: String,
    /// Owner id path; the first element is the owning entity.
    #[serde(default)]
    pub path: Vec<String>,
    /// Mixed-index text mapping.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<String>,
}

impl IndexKeyRef {
    /// The id of the owning entity.
    pub fn owner(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

/// One index declaration, of any kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexDeclaration {
    /// Index name.
    pub name: String,
    /// Indexed keys.
    pub index_key: Vec<IndexKeyRef>,
    /// Composite uniqueness.
    #[serde(deserialize_with = "truthy")]
    pub unique: bool,
    /// Composite restriction to the first key's owner.
    #[serde(deserialize_with = "truthy")]
    pub index_only: bool,
    /// Mixed-index backend.
    pub indexing_backend: Option<String>,
    /// Vertex-centric direction.
    pub direction: Option<String>,
    /// Vertex-centric order.
    pub order: Option<String>,
    /// `false` disables the index.
    pub is_activated: Option<bool>,
}

impl IndexDeclaration {
    /// Whether the index takes part in generation.
    pub fn is_active(&self) -> bool {
        self.is_activated != Some(false)
    }
}

/// Index declarations grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexMetadata {
    /// Composite indexes.
    pub composite_indexes: Vec<IndexDeclaration>,
    /// Mixed indexes.
    pub mixed_indexes: Vec<IndexDeclaration>,
    /// Vertex-centric indexes.
    pub vertex_centric_indexes: Vec<IndexDeclaration>,
}

/// A fully parsed model.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// Vertex collections in document order.
    pub vertices: Vec<VertexEntity>,
    /// Relationships in document order.
    pub relationships: Vec<RelationshipEntity>,
    /// Shared definitions fragment.
    pub definitions: Option<PropertySchema>,
    /// Graph metadata.
    pub graph: GraphMetadata,
    /// Index declarations.
    pub indexes: IndexMetadata,
    samples: Map<String, Value>,
}

fn decode_embedded<T: DeserializeOwned>(value: &Value, kind: &'static str, index: usize) -> Result<T> {
    let decoded = match value {
        Value::String(text) => serde_json::from_str(text),
        other => T::deserialize(other),
    };
    decoded.map_err(|e| ModelError::MalformedDocument {
        kind,
        index,
        message: e.to_string(),
    })
}

impl GraphModel {
    /// Decode a raw model payload.
    pub fn from_input(input: ModelInput) -> Result<Self> {
        let vertices = input
            .collections
            .iter()
            .enumerate()
            .map(|(i, doc)| decode_embedded(doc, "collection", i))
            .collect::<Result<Vec<VertexEntity>>>()?;
        let relationships = input
            .relationships
            .iter()
            .enumerate()
            .map(|(i, doc)| decode_embedded(doc, "relationship", i))
            .collect::<Result<Vec<RelationshipEntity>>>()?;
        let definitions = input
            .model_definitions
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|doc| decode_embedded(doc, "modelDefinitions", 0))
            .transpose()?;

        let container = match &input.container_data {
            Value::Null => Vec::new(),
            Value::Array(blocks) => blocks.clone(),
            Value::Object(_) => vec![input.container_data.clone()],
            other => {
                return Err(ModelError::InvalidContainer(format!(
                    "expected an array of metadata blocks, found {}",
                    other
                )))
            }
        };
        let graph = match container.first() {
            Some(doc) if !doc.is_null() => decode_embedded(doc, "containerData", 0)?,
            _ => GraphMetadata::default(),
        };
        let indexes = match container.get(1) {
            Some(doc) if !doc.is_null() => decode_embedded(doc, "containerData", 1)?,
            _ => IndexMetadata::default(),
        };

        tracing::debug!(
            vertices = vertices.len(),
            relationships = relationships.len(),
            "decoded model"
        );

        Ok(Self {
            vertices,
            relationships,
            definitions,
            graph,
            indexes,
            samples: input.json_data,
        })
    }

    /// Decode a model payload from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let input: ModelInput = serde_json::from_str(text)?;
        Self::from_input(input)
    }

    /// Replace the sample document of an entity.
    pub fn set_sample(&mut self, entity_id: impl Into<String>, sample: Value) {
        self.samples.insert(entity_id.into(), sample);
    }

    /// Look up a vertex collection by id.
    pub fn vertex(&self, id: &str) -> Option<&VertexEntity> {
        self.vertices.iter().find(|v| v.id == id)
    }

    /// Look up a relationship by id.
    pub fn relationship(&self, id: &str) -> Option<&RelationshipEntity> {
        self.relationships.iter().find(|r| r.id == id)
    }

    /// Whether an id names a vertex collection.
    pub fn is_vertex_id(&self, id: &str) -> bool {
        self.vertex(id).is_some()
    }

    /// The sample document of an entity. A missing document is `{}`.
    pub fn sample(&self, entity_id: &str) -> Result<Value> {
        match self.samples.get(entity_id) {
            None | Some(Value::Null) => Ok(Value::Object(Map::new())),
            Some(Value::String(text)) => {
                serde_json::from_str(text).map_err(|e| ModelError::MalformedSample {
                    entity: entity_id.to_string(),
                    message: e.to_string(),
                })
            }
            Some(other) => Ok(other.clone()),
        }
    }
}
