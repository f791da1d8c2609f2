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

//! The property type descriptor shared by every generator and merger.
//!
//! A [`PropertySchema`] is the JSON-Schema-like node found in model documents
//! (forward direction) and produced by the GraphSON interpreter (reverse
//! direction). Its JSON form uses the modeling tool's key names:
//!
//! | JSON key | Field |
//! |----------|-------|
//! | `type` / `childType` / `mode` | [`PropertySchema::kind`] |
//! | `subtype` | [`PropertySchema::subtype`] (`list<str>`, `set<number>`) |
//! | `subType` | [`PropertySchema::geo_subtype`] |
//! | `properties` | [`PropertySchema::properties`] |
//! | `items` | [`PropertySchema::items`] (object or array) |
//! | `propCardinality` | [`PropertySchema::cardinality`] |
//! | `propertyTTL` | [`PropertySchema::ttl`] |
//! | `metaProperties` | [`PropertySchema::meta_properties`] |
//! | `oneOf` / `allOf` / `anyOf` + `*_meta` | [`PropertySchema::choices`] |
//! | `sample` / `default` / `enum` | sample value fields |
//!
//! Any other key is kept in [`PropertySchema::extra`].

mod kind;
mod map;

pub use kind::{Cardinality, NumberMode, PropertyKind, Ttl, TtlUnit};
pub use map::PropertyMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A meta-property declared on a property occurrence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetaProperty {
    /// Meta-property name.
    #[serde(rename = "metaPropName", default)]
    pub name: String,
    /// Declared type of the meta-property value.
    #[serde(rename = "metaPropType", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyKind>,
    /// Sample value.
    #[serde(rename = "metaPropSample", default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Value>,
}

impl MetaProperty {
    /// Create a meta-property.
    pub fn new(name: impl Into<String>, kind: Option<PropertyKind>, sample: Option<Value>) -> Self {
        Self {
            name: name.into(),
            kind,
            sample,
        }
    }
}

/// The three choice keywords, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChoiceKind {
    /// `oneOf`
    OneOf,
    /// `allOf`
    AllOf,
    /// `anyOf`
    AnyOf,
}

impl ChoiceKind {
    /// All kinds in resolution order.
    pub const ALL: [ChoiceKind; 3] = [ChoiceKind::OneOf, ChoiceKind::AllOf, ChoiceKind::AnyOf];

    /// The JSON keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            ChoiceKind::OneOf => "oneOf",
            ChoiceKind::AllOf => "allOf",
            ChoiceKind::AnyOf => "anyOf",
        }
    }
}

/// The alternatives declared under one choice keyword.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChoiceGroup {
    /// Alternative sub-shapes. Only the first is used for sampling.
    pub alternatives: Vec<PropertySchema>,
    /// Declared insertion position among the owner's properties.
    pub index: Option<usize>,
}

/// A node of the property type model.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawPropertySchema", into = "RawPropertySchema")]
pub struct PropertySchema {
    /// Type discriminator. `None` is the empty schema.
    pub kind: Option<PropertyKind>,
    /// Collection element marker such as `list<str>`.
    pub subtype: Option<String>,
    /// Geometry subtype such as `point` or `multipolygon`.
    pub geo_subtype: Option<String>,
    /// Nested properties of a map-like node.
    pub properties: PropertyMap,
    /// Element schemas of a list-like node.
    pub items: Vec<PropertySchema>,
    /// Declared cardinality.
    pub cardinality: Option<Cardinality>,
    /// Declared time-to-live.
    pub ttl: Option<Ttl>,
    /// Meta-properties attached to this property.
    pub meta_properties: Vec<MetaProperty>,
    /// Choice groups keyed by keyword.
    pub choices: BTreeMap<ChoiceKind, ChoiceGroup>,
    /// Sample value.
    pub sample: Option<Value>,
    /// Default value.
    pub default: Option<Value>,
    /// Enumerated values.
    pub enumeration: Vec<Value>,
    /// Attributes not modeled above.
    pub extra: Map<String, Value>,
}

impl PropertySchema {
    /// Create a schema of the given kind.
    pub fn of(kind: PropertyKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Shorthand for a string property.
    pub fn string() -> Self {
        Self::of(PropertyKind::String)
    }

    /// Shorthand for a number property.
    pub fn number(mode: Option<NumberMode>) -> Self {
        Self::of(PropertyKind::Number(mode))
    }

    /// Set the sample value.
    pub fn with_sample(mut self, sample: impl Into<Value>) -> Self {
        self.sample = Some(sample.into());
        self
    }

    /// Add or replace a nested property.
    pub fn with_property(mut self, name: impl Into<String>, schema: PropertySchema) -> Self {
        self.properties.insert(name, schema);
        self
    }

    /// Set the element schemas.
    pub fn with_items(mut self, items: Vec<PropertySchema>) -> Self {
        self.items = items;
        self
    }

    /// Set the collection subtype marker.
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    /// Set the geometry subtype.
    pub fn with_geo_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.geo_subtype = Some(subtype.into());
        self
    }

    /// Set the cardinality.
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    /// Set the TTL.
    pub fn with_ttl(mut self, ttl: Ttl) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Append a meta-property.
    pub fn with_meta_property(mut self, meta: MetaProperty) -> Self {
        self.meta_properties.push(meta);
        self
    }

    /// Declare a choice group.
    pub fn with_choice(
        mut self,
        kind: ChoiceKind,
        alternatives: Vec<PropertySchema>,
        index: Option<usize>,
    ) -> Self {
        self.choices.insert(kind, ChoiceGroup { alternatives, index });
        self
    }

    /// The `type` name, if any.
    pub fn type_name(&self) -> Option<&str> {
        self.kind.as_ref().map(PropertyKind::type_name)
    }

    /// The numeric mode, if this is a number with a mode.
    pub fn mode(&self) -> Option<NumberMode> {
        self.kind.as_ref().and_then(PropertyKind::mode)
    }

    /// Whether this is a geoshape.
    pub fn is_geoshape(&self) -> bool {
        self.kind == Some(PropertyKind::Geoshape)
    }

    /// Whether no attribute at all is set.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.subtype.is_none()
            && self.geo_subtype.is_none()
            && self.properties.is_empty()
            && self.items.is_empty()
            && self.cardinality.is_none()
            && self.ttl.is_none()
            && self.meta_properties.is_empty()
            && self.choices.is_empty()
            && self.sample.is_none()
            && self.default.is_none()
            && self.enumeration.is_empty()
            && self.extra.is_empty()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Items {
    Many(Vec<PropertySchema>),
    One(Box<PropertySchema>),
}

impl Items {
    fn into_vec(self) -> Vec<PropertySchema> {
        match self {
            Items::Many(items) => items,
            Items::One(item) => vec![*item],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ChoiceMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawPropertySchema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(rename = "childType", skip_serializing)]
    child_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtype: Option<String>,
    #[serde(rename = "subType", skip_serializing_if = "Option::is_none")]
    geo_subtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<PropertyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Items>,
    #[serde(rename = "propCardinality", skip_serializing_if = "Option::is_none")]
    cardinality: Option<Cardinality>,
    #[serde(rename = "propertyTTL", skip_serializing_if = "Option::is_none")]
    ttl: Option<Ttl>,
    #[serde(rename = "metaProperties", skip_serializing_if = "Option::is_none")]
    meta_properties: Option<Vec<MetaProperty>>,
    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    one_of: Option<Vec<PropertySchema>>,
    #[serde(rename = "oneOf_meta", skip_serializing_if = "Option::is_none")]
    one_of_meta: Option<ChoiceMeta>,
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    all_of: Option<Vec<PropertySchema>>,
    #[serde(rename = "allOf_meta", skip_serializing_if = "Option::is_none")]
    all_of_meta: Option<ChoiceMeta>,
    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    any_of: Option<Vec<PropertySchema>>,
    #[serde(rename = "anyOf_meta", skip_serializing_if = "Option::is_none")]
    any_of_meta: Option<ChoiceMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    enumeration: Option<Vec<Value>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

impl From<RawPropertySchema> for PropertySchema {
    fn from(raw: RawPropertySchema) -> Self {
        let kind = raw
            .child_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(raw.type_name.as_deref())
            .map(|t| PropertyKind::from_parts(t, raw.mode.as_deref()));

        let mut choices = BTreeMap::new();
        let groups = [
            (ChoiceKind::OneOf, raw.one_of, raw.one_of_meta),
            (ChoiceKind::AllOf, raw.all_of, raw.all_of_meta),
            (ChoiceKind::AnyOf, raw.any_of, raw.any_of_meta),
        ];
        for (choice_kind, alternatives, meta) in groups {
            if let Some(alternatives) = alternatives.filter(|a| !a.is_empty()) {
                choices.insert(
                    choice_kind,
                    ChoiceGroup {
                        alternatives,
                        index: meta.and_then(|m| m.index),
                    },
                );
            }
        }

        PropertySchema {
            kind,
            subtype: raw.subtype,
            geo_subtype: raw.geo_subtype,
            properties: raw.properties.unwrap_or_default(),
            items: raw.items.map(Items::into_vec).unwrap_or_default(),
            cardinality: raw.cardinality,
            ttl: raw.ttl,
            meta_properties: raw.meta_properties.unwrap_or_default(),
            choices,
            sample: raw.sample,
            default: raw.default,
            enumeration: raw.enumeration.unwrap_or_default(),
            extra: raw.extra,
        }
    }
}

impl From<PropertySchema> for RawPropertySchema {
    fn from(schema: PropertySchema) -> Self {
        let mode = schema.mode().map(|m| m.as_str().to_string());
        let mut raw = RawPropertySchema {
            type_name: schema.kind.as_ref().map(|k| k.type_name().to_string()),
            child_type: None,
            mode,
            subtype: schema.subtype,
            geo_subtype: schema.geo_subtype,
            properties: if schema.properties.is_empty() {
                None
            } else {
                Some(schema.properties)
            },
            items: non_empty(schema.items).map(Items::Many),
            cardinality: schema.cardinality,
            ttl: schema.ttl,
            meta_properties: non_empty(schema.meta_properties),
            sample: schema.sample,
            default: schema.default,
            enumeration: non_empty(schema.enumeration),
            extra: schema.extra,
            ..RawPropertySchema::default()
        };

        for (choice_kind, group) in schema.choices {
            let meta = group.index.map(|index| ChoiceMeta { index: Some(index) });
            let alternatives = Some(group.alternatives);
            match choice_kind {
                ChoiceKind::OneOf => {
                    raw.one_of = alternatives;
                    raw.one_of_meta = meta;
                }
                ChoiceKind::AllOf => {
                    raw.all_of = alternatives;
                    raw.all_of_meta = meta;
                }
                ChoiceKind::AnyOf => {
                    raw.any_of = alternatives;
                    raw.any_of_meta = meta;
                }
            }
        }

        raw
    }
}
