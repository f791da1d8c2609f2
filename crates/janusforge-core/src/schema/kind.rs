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

//! Property type discriminators and scalar attribute types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Numeric sub-mode of a `number` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberMode {
    /// 8-bit integer.
    Byte,
    /// 16-bit integer.
    Short,
    /// 32-bit integer.
    #[serde(alias = "int")]
    Integer,
    /// 64-bit integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
}

impl NumberMode {
    /// Parse a mode name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "byte" => Some(NumberMode::Byte),
            "short" => Some(NumberMode::Short),
            "int" | "integer" => Some(NumberMode::Integer),
            "long" => Some(NumberMode::Long),
            "float" => Some(NumberMode::Float),
            "double" => Some(NumberMode::Double),
            _ => None,
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            NumberMode::Byte => "byte",
            NumberMode::Short => "short",
            NumberMode::Integer => "integer",
            NumberMode::Long => "long",
            NumberMode::Float => "float",
            NumberMode::Double => "double",
        }
    }
}

/// The discriminator of a [`PropertySchema`](super::PropertySchema).
///
/// `Number` carries its mode, so a mode can never be attached to a
/// non-numeric type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Text.
    String,
    /// Boolean flag.
    Boolean,
    /// Single character.
    Character,
    /// Calendar date.
    Date,
    /// UUID.
    Uuid,
    /// Geometry shape.
    Geoshape,
    /// Number, with an optional sub-mode.
    Number(Option<NumberMode>),
    /// Keyed container.
    Map,
    /// Ordered container.
    List,
    /// Unordered container.
    Set,
    /// Multi-valued property whose items carry meta-properties.
    MultiProperty,
    /// Generic array node, used for geometry coordinates.
    Array,
    /// Any other type name, kept verbatim.
    Other(String),
}

impl PropertyKind {
    /// Build a kind from a `type` name and an optional `mode` name.
    pub fn from_parts(type_name: &str, mode: Option<&str>) -> Self {
        match type_name {
            "string" => PropertyKind::String,
            "boolean" | "bool" => PropertyKind::Boolean,
            "character" | "char" => PropertyKind::Character,
            "date" => PropertyKind::Date,
            "uuid" => PropertyKind::Uuid,
            "geoshape" => PropertyKind::Geoshape,
            "number" => PropertyKind::Number(mode.and_then(NumberMode::parse)),
            "map" => PropertyKind::Map,
            "list" => PropertyKind::List,
            "set" => PropertyKind::Set,
            "multi-property" => PropertyKind::MultiProperty,
            "array" => PropertyKind::Array,
            other => PropertyKind::Other(other.to_string()),
        }
    }

    /// The `type` name as written in model documents.
    pub fn type_name(&self) -> &str {
        match self {
            PropertyKind::String => "string",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Character => "character",
            PropertyKind::Date => "date",
            PropertyKind::Uuid => "uuid",
            PropertyKind::Geoshape => "geoshape",
            PropertyKind::Number(_) => "number",
            PropertyKind::Map => "map",
            PropertyKind::List => "list",
            PropertyKind::Set => "set",
            PropertyKind::MultiProperty => "multi-property",
            PropertyKind::Array => "array",
            PropertyKind::Other(name) => name,
        }
    }

    /// The numeric mode, if this is a number.
    pub fn mode(&self) -> Option<NumberMode> {
        match self {
            PropertyKind::Number(mode) => *mode,
            _ => None,
        }
    }

    /// Whether the kind holds nested `items` or `properties`.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            PropertyKind::Map
                | PropertyKind::List
                | PropertyKind::Set
                | PropertyKind::MultiProperty
                | PropertyKind::Array
        )
    }

    /// Whether the kind is `list` or `set`.
    pub fn is_collection(&self) -> bool {
        matches!(self, PropertyKind::List | PropertyKind::Set)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode() {
            Some(mode) => write!(f, "number<{}>", mode.as_str()),
            None => f.write_str(self.type_name()),
        }
    }
}

impl Serialize for PropertyKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

impl<'de> Deserialize<'de> for PropertyKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(PropertyKind::from_parts(&name, None))
    }
}

/// Property cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    /// One value per element.
    #[default]
    Single,
    /// Distinct values.
    Set,
    /// Ordered values, duplicates allowed.
    List,
}

impl Cardinality {
    /// Parse a cardinality name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "SINGLE" => Some(Cardinality::Single),
            "SET" => Some(Cardinality::Set),
            "LIST" => Some(Cardinality::List),
            _ => None,
        }
    }

    /// The management API constant name.
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::Single => "SINGLE",
            Cardinality::Set => "SET",
            Cardinality::List => "LIST",
        }
    }
}

impl Serialize for Cardinality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str().to_ascii_lowercase())
    }
}

impl<'de> Deserialize<'de> for Cardinality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Cardinality::parse(&name).unwrap_or_default())
    }
}

/// Unit of a TTL duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TtlUnit {
    /// Days.
    Days,
    /// Hours.
    Hours,
    /// Minutes.
    Minutes,
    /// Seconds.
    #[default]
    Seconds,
}

impl TtlUnit {
    /// Parse a unit name; anything unrecognized is seconds.
    pub fn parse(name: &str) -> Self {
        match name {
            "Days" => TtlUnit::Days,
            "Hours" => TtlUnit::Hours,
            "Minutes" => TtlUnit::Minutes,
            _ => TtlUnit::Seconds,
        }
    }

    /// The `java.time.Duration` factory method for this unit.
    pub fn duration_factory(self) -> &'static str {
        match self {
            TtlUnit::Days => "ofDays",
            TtlUnit::Hours => "ofHours",
            TtlUnit::Minutes => "ofMinutes",
            TtlUnit::Seconds => "ofSeconds",
        }
    }
}

/// Time-to-live attached to a vertex label, edge label or property key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawTtl", into = "RawTtl")]
pub struct Ttl {
    /// Duration amount. Zero means no TTL.
    pub value: u64,
    /// Duration unit.
    pub unit: TtlUnit,
}

impl Ttl {
    /// Create a TTL.
    pub fn new(value: u64, unit: TtlUnit) -> Self {
        Self { value, unit }
    }

    /// A TTL expressed in seconds.
    pub fn seconds(value: u64) -> Self {
        Self::new(value, TtlUnit::Seconds)
    }

    /// Whether a positive duration is declared.
    pub fn is_active(&self) -> bool {
        self.value > 0
    }
}

#[derive(Serialize, Deserialize)]
struct RawTtl {
    #[serde(rename = "TTLValue", default)]
    value: Option<serde_json::Value>,
    #[serde(rename = "TTLUnit", default)]
    unit: Option<String>,
}

impl From<RawTtl> for Ttl {
    fn from(raw: RawTtl) -> Self {
        let value = match raw.value {
            Some(serde_json::Value::Number(n)) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        let unit = raw.unit.as_deref().map(TtlUnit::parse).unwrap_or_default();
        Ttl { value, unit }
    }
}

impl From<Ttl> for RawTtl {
    fn from(ttl: Ttl) -> Self {
        let unit = match ttl.unit {
            TtlUnit::Days => "Days",
            TtlUnit::Hours => "Hours",
            TtlUnit::Minutes => "Minutes",
            TtlUnit::Seconds => "Seconds",
        };
        RawTtl {
            value: Some(ttl.value.into()),
            unit: Some(unit.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_parts() {
        assert_eq!(PropertyKind::from_parts("string", None), PropertyKind::String);
        assert_eq!(
            PropertyKind::from_parts("number", Some("double")),
            PropertyKind::Number(Some(NumberMode::Double))
        );
        assert_eq!(PropertyKind::from_parts("char", None), PropertyKind::Character);
        assert_eq!(
            PropertyKind::from_parts("blob", None),
            PropertyKind::Other("blob".to_string())
        );
    }

    #[test]
    fn test_mode_dropped_on_non_numbers() {
        let kind = PropertyKind::from_parts("string", Some("double"));
        assert_eq!(kind.mode(), None);
    }

    #[test]
    fn test_cardinality_parse() {
        assert_eq!(Cardinality::parse("list"), Some(Cardinality::List));
        assert_eq!(Cardinality::parse("SET"), Some(Cardinality::Set));
        assert_eq!(Cardinality::parse("many"), None);
    }

    #[test]
    fn test_ttl_from_json() {
        let ttl: Ttl = serde_json::from_str(r#"{"TTLValue": "5", "TTLUnit": "Days"}"#).unwrap();
        assert_eq!(ttl, Ttl::new(5, TtlUnit::Days));

        let ttl: Ttl = serde_json::from_str(r#"{"TTLValue": 30, "TTLUnit": "Weeks"}"#).unwrap();
        assert_eq!(ttl.unit, TtlUnit::Seconds);

        let ttl: Ttl = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!ttl.is_active());
    }
}
