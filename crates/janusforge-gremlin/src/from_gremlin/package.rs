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


//! Reverse-engineered packages, one per sampled label or connection.
//!
//! Packages serialize in camelCase and can be handed to a modeling tool
//! as they are. Validation blocks reference shared definitions by name:
//!
//! ```json
//! {"jsonSchema": {"properties": {"name": {"$ref": "#/definitions/name"}}}}
//! ```

use super::rows::{ConfigurationRow, GraphIndexRow, RelationIndexRow};
use crate::error::Result;
use janusforge_core::{
    GraphConfiguration, GraphVariable, Multiplicity, PropertyMap, PropertySchema, Ttl,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// A key of an index as reported in bucket information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexKeyInfo {
    /// Property key name.
    pub name: String,
    /// Mixed-index text mapping.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mapping: Option<String>,
    /// Edge label of a vertex-centric index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl IndexKeyInfo {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mapping: None,
            entity: None,
        }
    }
}

/// A composite index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeIndexInfo {
    /// Index name.
    pub name: String,
    /// Uniqueness.
    pub unique: bool,
    /// Indexed keys.
    pub index_key: Vec<IndexKeyInfo>,
}

/// A mixed index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedIndexInfo {
    /// Index name.
    pub name: String,
    /// Backing index name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indexing_backend: Option<String>,
    /// Indexed keys with their mappings.
    pub index_key: Vec<IndexKeyInfo>,
}

/// A vertex-centric index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexCentricIndexInfo {
    /// Index name.
    pub name: String,
    /// Sort keys, each tagged with the edge label.
    pub index_key: Vec<IndexKeyInfo>,
    /// `ascending` or `descending`.
    pub order: String,
    /// Traversal direction.
    pub direction: String,
}

/// Every index of a graph, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketIndexes {
    /// Composite indexes.
    pub composite_indexes: Vec<CompositeIndexInfo>,
    /// Mixed indexes.
    pub mixed_indexes: Vec<MixedIndexInfo>,
    /// Vertex-centric indexes.
    pub vertex_centric_indexes: Vec<VertexCentricIndexInfo>,
}

impl BucketIndexes {
    /// Split graph index rows by kind and convert relation index rows.
    pub fn from_rows(graph_indexes: Vec<GraphIndexRow>, relation_indexes: Vec<RelationIndexRow>) -> Self {
        let mut indexes = Self::default();
        for row in graph_indexes {
            if row.composite_index {
                indexes.composite_indexes.push(CompositeIndexInfo {
                    name: row.name.clone(),
                    unique: row.unique,
                    index_key: row.keys.iter().map(|k| IndexKeyInfo::named(&k.name)).collect(),
                });
            }
            if row.mixed_index {
                indexes.mixed_indexes.push(MixedIndexInfo {
                    name: row.name,
                    indexing_backend: row.backing_index,
                    index_key: row
                        .keys
                        .iter()
                        .map(|k| IndexKeyInfo {
                            mapping: k.mapping(),
                            ..IndexKeyInfo::named(&k.name)
                        })
                        .collect(),
                });
            }
        }
        indexes.vertex_centric_indexes = relation_indexes
            .into_iter()
            .map(|row| VertexCentricIndexInfo {
                order: row.order().to_string(),
                index_key: row
                    .sort_keys
                    .iter()
                    .map(|key| IndexKeyInfo {
                        entity: Some(row.edge_label.clone()),
                        ..IndexKeyInfo::named(key)
                    })
                    .collect(),
                name: row.name,
                direction: row.direction,
            })
            .collect();
        indexes
    }
}

/// Graph-level information shared by every label package of a database.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInfo {
    /// Indexes of all kinds.
    #[serde(flatten)]
    pub indexes: BucketIndexes,
    /// Feature printout without its `FEATURES ` prefix.
    pub features: String,
    /// Graph variables.
    pub graph_variables: Vec<GraphVariable>,
    /// Graph configuration entries.
    pub graph_configurations: Vec<GraphConfiguration>,
    /// Traversal source name.
    pub traversal_source: String,
}

const FEATURES_PREFIX: &str = "FEATURES ";

/// Strip the `FEATURES ` prefix of a feature printout.
///
/// Anything that is not a string yields an empty printout.
pub fn features_text(value: &Value) -> String {
    match value.as_str() {
        Some(text) => text.strip_prefix(FEATURES_PREFIX).unwrap_or(text).trim_end().to_string(),
        None => String::new(),
    }
}

/// Convert variable maps of the server into graph variables.
///
/// String values are kept; anything else is JSON-encoded.
pub fn graph_variables(items: &[Value]) -> Vec<GraphVariable> {
    items
        .iter()
        .filter_map(|item| {
            let plain = crate::mapping::untag(item);
            let (key, value) = plain.as_object()?.iter().next()?;
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(GraphVariable::new(key.clone(), text))
        })
        .collect()
}

/// Convert configuration rows, dropping entries without a key.
pub fn graph_configurations(rows: Vec<ConfigurationRow>) -> Vec<GraphConfiguration> {
    rows.into_iter()
        .filter(|row| !row.key.is_empty())
        .map(|row| GraphConfiguration::new(row.key, row.value))
        .collect()
}

/// Label-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityLevel {
    /// Whether vertices of the label are static.
    pub static_vertex: bool,
    /// Label TTL.
    #[serde(rename = "vertexTTL", skip_serializing_if = "Option::is_none")]
    pub vertex_ttl: Option<Ttl>,
}

/// A JSON-schema validation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    /// The schema, with properties replaced by references.
    pub json_schema: Value,
}

impl Validation {
    /// Build the block for a merged schema.
    pub fn for_schema(schema: &PropertySchema) -> Result<Self> {
        Ok(Self {
            json_schema: schema_with_refs(schema)?,
        })
    }
}

/// Serialize a schema with every top-level property replaced by a
/// `#/definitions/<name>` reference. Meta-properties stay on the reference.
pub fn schema_with_refs(schema: &PropertySchema) -> Result<Value> {
    let mut value = serde_json::to_value(schema)?;
    let mut refs = Map::new();
    for (name, property) in schema.properties.iter() {
        let mut reference = Map::new();
        reference.insert("$ref".into(), Value::String(format!("#/definitions/{}", name)));
        if !property.meta_properties.is_empty() {
            reference.insert("metaProperties".into(), serde_json::to_value(&property.meta_properties)?);
        }
        refs.insert(name.to_string(), Value::Object(reference));
    }
    match &mut value {
        Value::Object(map) => {
            map.insert("properties".into(), Value::Object(refs));
        }
        other => *other = serde_json::json!({ "properties": refs }),
    }
    Ok(value)
}

/// The definitions referenced by a validation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelDefinitions {
    /// Definitions by name.
    pub properties: PropertyMap,
}

impl ModelDefinitions {
    /// Property keys, then relationship definitions, then the label's own
    /// properties without meta-properties. Later entries replace earlier
    /// ones of the same name in place.
    pub fn new(property_keys: &PropertyMap, relationships: &PropertyMap, schema: &PropertySchema) -> Self {
        let mut properties = property_keys.clone();
        properties.extend_from(relationships.clone());
        for (name, property) in schema.properties.iter() {
            let mut property = property.clone();
            property.meta_properties.clear();
            properties.insert(name, property);
        }
        Self { properties }
    }
}

fn merge_value(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (i, value) in source.iter().enumerate() {
                match target.get_mut(i) {
                    Some(existing) => merge_value(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Deep-merge every document over an object holding `{}` for each key.
pub fn document_template(documents: &[Value], keys: &[String]) -> Value {
    let mut template = Value::Object(
        keys.iter()
            .map(|key| (key.clone(), Value::Object(Map::new())))
            .collect(),
    );
    for document in documents {
        merge_value(&mut template, document);
    }
    template
}

/// Whether no document carries any property.
pub fn is_empty_label(documents: &[Value]) -> bool {
    documents.iter().all(|doc| match doc {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Null => true,
        _ => false,
    })
}

/// The package of one vertex label.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPackage {
    /// Database name.
    pub db_name: String,
    /// Vertex label name.
    pub collection_name: String,
    /// Sampled documents.
    pub documents: Vec<Value>,
    /// Always empty.
    pub views: Vec<Value>,
    /// Always false.
    pub empty_bucket: bool,
    /// Label settings.
    pub entity_level: EntityLevel,
    /// Inferred schema.
    pub validation: Validation,
    /// Graph-level information.
    pub bucket_info: BucketInfo,
    /// Shared definitions.
    pub model_definitions: ModelDefinitions,
    /// Merged document template, with field inference only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_template: Option<Value>,
}

/// Edge label settings of a relationship package.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipInfo {
    /// Whether the label is directed both ways.
    pub bi_directional: bool,
    /// Multiplicity.
    pub multiplicity: Multiplicity,
    /// Label TTL.
    #[serde(rename = "edgeTTL", skip_serializing_if = "Option::is_none")]
    pub edge_ttl: Option<Ttl>,
}

/// The package of one edge label between two vertex labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipPackage {
    /// Database name.
    pub db_name: String,
    /// Outgoing vertex label.
    pub parent_collection: String,
    /// Edge label.
    pub relationship_name: String,
    /// Incoming vertex label.
    pub child_collection: String,
    /// Always `entity`.
    pub level: String,
    /// Sampled documents.
    pub documents: Vec<Value>,
    /// Inferred schema.
    pub validation: Validation,
    /// Label settings.
    pub relationship_info: RelationshipInfo,
    /// Merged document template, with field inference only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_template: Option<Value>,
}

/// Everything one reverse-engineering run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseResult {
    /// Label packages, database by database.
    pub labels: Vec<LabelPackage>,
    /// Relationship packages, database by database.
    pub relationships: Vec<RelationshipPackage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_gremlin::rows::IndexKeyRow;
    use janusforge_core::{MetaProperty, PropertyKind};
    use serde_json::json;

    #[test]
    fn test_bucket_indexes_from_rows() {
        let mut parameters = Map::new();
        parameters.insert("mapping".into(), json!("TEXT"));
        let rows = vec![
            GraphIndexRow {
                name: "byName".into(),
                unique: true,
                composite_index: true,
                keys: vec![IndexKeyRow {
                    name: "name".into(),
                    parameters: Map::new(),
                }],
                ..GraphIndexRow::default()
            },
            GraphIndexRow {
                name: "search".into(),
                backing_index: Some("search".into()),
                mixed_index: true,
                keys: vec![IndexKeyRow {
                    name: "bio".into(),
                    parameters,
                }],
                ..GraphIndexRow::default()
            },
        ];
        let relation = vec![RelationIndexRow {
            name: "bySince".into(),
            edge_label: "knows".into(),
            direction: "BOTH".into(),
            sort_order: "desc".into(),
            status: "ENABLED".into(),
            sort_keys: vec!["since".into()],
        }];

        let indexes = BucketIndexes::from_rows(rows, relation);
        assert_eq!(indexes.composite_indexes.len(), 1);
        assert!(indexes.composite_indexes[0].unique);
        assert_eq!(indexes.mixed_indexes[0].index_key[0].mapping.as_deref(), Some("TEXT"));
        assert_eq!(indexes.vertex_centric_indexes[0].order, "descending");
        assert_eq!(
            indexes.vertex_centric_indexes[0].index_key[0].entity.as_deref(),
            Some("knows")
        );

        let value = serde_json::to_value(&indexes).unwrap();
        assert_eq!(value["compositeIndexes"][0]["indexKey"], json!([{"name": "name"}]));
        assert_eq!(value["mixedIndexes"][0]["indexKey"][0]["type"], json!("TEXT"));
    }

    #[test]
    fn test_features_text() {
        assert_eq!(features_text(&json!("FEATURES > GraphFeatures\n")), "> GraphFeatures");
        assert_eq!(features_text(&json!(null)), "");
    }

    #[test]
    fn test_graph_variables() {
        let items = vec![json!({"owner": "ops"}), json!({"limits": {"max": 3}}), json!({})];
        let variables = graph_variables(&items);
        assert_eq!(variables.len(), 2);
        assert_eq!(variables[0].value_text(), "ops");
        assert_eq!(variables[1].value_text(), r#"{"max":3}"#);
    }

    #[test]
    fn test_schema_with_refs() {
        let schema = PropertySchema::default()
            .with_property(
                "name",
                PropertySchema::string().with_meta_property(MetaProperty::new(
                    "source",
                    Some(PropertyKind::String),
                    Some(json!("import")),
                )),
            )
            .with_property("age", PropertySchema::number(None));
        let value = schema_with_refs(&schema).unwrap();
        assert_eq!(value["properties"]["age"], json!({"$ref": "#/definitions/age"}));
        assert_eq!(value["properties"]["name"]["metaProperties"][0]["metaPropName"], json!("source"));

        let empty = schema_with_refs(&PropertySchema::default()).unwrap();
        assert_eq!(empty["properties"], json!({}));
    }

    #[test]
    fn test_model_definitions_order_and_meta() {
        let keys: PropertyMap = vec![
            ("name".to_string(), PropertySchema::string()),
            ("since".to_string(), PropertySchema::number(None)),
        ]
        .into_iter()
        .collect();
        let schema = PropertySchema::default().with_property(
            "name",
            PropertySchema::string()
                .with_sample("x")
                .with_meta_property(MetaProperty::new("m", None, None)),
        );
        let definitions = ModelDefinitions::new(&keys, &PropertyMap::new(), &schema);
        let names: Vec<&str> = definitions.properties.keys().collect();
        assert_eq!(names, vec!["name", "since"]);
        let name = definitions.properties.get("name").unwrap();
        assert!(name.meta_properties.is_empty());
        assert_eq!(name.sample, Some(json!("x")));
    }

    #[test]
    fn test_document_template() {
        let documents = vec![
            json!({"name": "marko", "address": {"city": "Santa Fe"}}),
            json!({"address": {"zip": "87501"}, "tags": ["a"]}),
        ];
        let template = document_template(&documents, &["nick".to_string(), "name".to_string()]);
        assert_eq!(
            template,
            json!({
                "nick": {},
                "name": "marko",
                "address": {"city": "Santa Fe", "zip": "87501"},
                "tags": ["a"]
            })
        );
    }

    #[test]
    fn test_is_empty_label() {
        assert!(is_empty_label(&[]));
        assert!(is_empty_label(&[json!({}), json!({})]));
        assert!(!is_empty_label(&[json!({}), json!({"a": 1})]));
    }
}
