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


//! Named result rows of the management queries.
//!
//! Management queries return lists of maps, decoded into the structs below.
//! TTLs arrive either as whole seconds or as ISO-8601 durations (`PT1H`);
//! zero means none.

use crate::error::{GremlinError, Result};
use janusforge_core::{Cardinality, MetaProperty, Multiplicity, NativeType, PropertySchema, Ttl};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

fn duration_seconds(text: &str) -> Option<f64> {
    let rest = text.trim().strip_prefix('P')?;
    let (date, time) = match rest.split_once('T') {
        Some((date, time)) => (date, time),
        None => (rest, ""),
    };

    let mut total = 0.0;
    let mut number = String::new();
    for (part, is_time) in [(date, false), (time, true)] {
        for c in part.chars() {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                number.push(c);
                continue;
            }
            let amount: f64 = number.parse().ok()?;
            number.clear();
            total += amount
                * match (c, is_time) {
                    ('D', false) => 86_400.0,
                    ('H', true) => 3_600.0,
                    ('M', true) => 60.0,
                    ('S', true) => 1.0,
                    _ => return None,
                };
        }
    }
    number.is_empty().then_some(total)
}

/// Interpret a TTL value returned by the server.
pub fn ttl_from_value(value: &Value) -> Option<Ttl> {
    let seconds = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok().or_else(|| duration_seconds(s))?,
        _ => return None,
    };
    (seconds >= 1.0).then(|| Ttl::seconds(seconds as u64))
}

fn ttl<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Ttl>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(ttl_from_value))
}

fn text_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// An edge label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeLabelRow {
    /// Label name.
    pub name: String,
    /// Whether the label is unidirected.
    pub is_unidirected: bool,
    /// Multiplicity.
    pub multiplicity: Multiplicity,
    /// Label TTL.
    #[serde(rename = "edgeTTL", deserialize_with = "ttl")]
    pub edge_ttl: Option<Ttl>,
    /// Property keys mapped to the label.
    pub properties: Vec<String>,
}

/// A property key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyKeyRow {
    /// Key name.
    pub name: String,
    /// Cardinality name, e.g. `SINGLE`.
    #[serde(deserialize_with = "text_or_default")]
    pub cardinality: String,
    /// Java class of the data type.
    #[serde(deserialize_with = "text_or_default")]
    pub data_type: String,
    /// Key TTL.
    #[serde(rename = "TTL", deserialize_with = "ttl")]
    pub ttl: Option<Ttl>,
}

impl PropertyKeyRow {
    /// The property schema declared by this key.
    pub fn to_schema(&self) -> PropertySchema {
        let mut schema = NativeType::from_java_class(&self.data_type).to_schema();
        schema.cardinality = Some(Cardinality::parse(&self.cardinality).unwrap_or_default());
        schema.ttl = self.ttl;
        schema
    }
}

/// Settings of one vertex label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VertexLabelRow {
    /// Static label flag.
    pub static_vertex: bool,
    /// Label TTL.
    #[serde(deserialize_with = "ttl")]
    pub ttl: Option<Ttl>,
    /// Property keys mapped to the label.
    pub properties: Vec<String>,
}

/// One key of a graph index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IndexKeyRow {
    /// Property key name.
    pub name: String,
    /// Index parameters such as `mapping`.
    pub parameters: Map<String, Value>,
}

impl IndexKeyRow {
    /// The text mapping parameter of a mixed index key.
    pub fn mapping(&self) -> Option<String> {
        self.parameters.get("mapping").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// A composite or mixed graph index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphIndexRow {
    /// Index name.
    pub name: String,
    /// Uniqueness.
    pub unique: bool,
    /// Backing index of a mixed index.
    pub backing_index: Option<String>,
    /// Whether the index is composite.
    pub composite_index: bool,
    /// Whether the index is mixed.
    pub mixed_index: bool,
    /// Indexed keys.
    pub keys: Vec<IndexKeyRow>,
}

/// A vertex-centric index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelationIndexRow {
    /// Index name.
    pub name: String,
    /// Indexed edge label.
    pub edge_label: String,
    /// Traversal direction.
    pub direction: String,
    /// Sort order as reported by the server.
    pub sort_order: String,
    /// Index status.
    pub status: String,
    /// Sort keys in order.
    pub sort_keys: Vec<String>,
}

impl RelationIndexRow {
    /// `descending` for `desc*` orders, otherwise `ascending`.
    pub fn order(&self) -> &'static str {
        if self.sort_order.to_ascii_lowercase().starts_with("desc") {
            "descending"
        } else {
            "ascending"
        }
    }
}

/// One connection of an edge label between two vertex labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionRow {
    /// Edge label.
    pub relationship: String,
    /// Outgoing vertex label.
    pub start: String,
    /// Incoming vertex label.
    pub end: String,
}

/// A graph configuration entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigurationRow {
    /// Configuration key.
    pub key: String,
    /// Configured value.
    pub value: Value,
}

/// Meta-properties observed on one property of a sampled vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaPropertyRow {
    /// Property name.
    pub property: String,
    /// Observed meta-properties.
    pub meta_properties: Vec<MetaProperty>,
}

impl From<MetaPropertyRow> for (String, Vec<MetaProperty>) {
    fn from(row: MetaPropertyRow) -> Self {
        (row.property, row.meta_properties)
    }
}

/// Decode every item of a result as a row.
pub fn decode_rows<T: DeserializeOwned>(query: &str, items: &[Value]) -> Result<Vec<T>> {
    items
        .iter()
        .map(|item| {
            T::deserialize(item).map_err(|e| GremlinError::UnexpectedResult {
                query: query.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
