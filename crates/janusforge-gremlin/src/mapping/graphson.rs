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


//! Reading property schemas out of GraphSON v3 results.
//!
//! GraphSON tags structured values as `{"@type": "g:Map", "@value": [...]}`.
//! Maps carry a flat list that alternates keys and values; lists and sets
//! carry an array; scalars carry the raw value.
//!
//! | Tag | Property type |
//! |-----|---------------|
//! | `g:Map` | `map` |
//! | `g:List` | `list` |
//! | `g:Set` | `set` |
//! | `g:Int32`, `g:Int64` | `number` (`integer`, `long`) |
//! | `g:Float`, `g:Double` | `number` (`float`, `double`) |
//! | `gx:Byte`, `gx:Int16` | `number` (`byte`, `short`) |
//! | `g:Date` | `date` |
//! | `g:UUID` | `uuid` |
//! | `gx:Char` | `char` |
//! | `janusgraph:Geoshape` | `geoshape` |
//! | anything else | `string` |

use super::merge::{merge_all, merge_property_key, MetaObservations};
use crate::error::{GremlinError, Result};
use crate::from_gremlin::rows::MetaPropertyRow;
use janusforge_core::model::value_text;
use janusforge_core::types::list_subtype_for;
use janusforge_core::{
    Cardinality, Geometry, MetaProperty, NumberMode, PropertyKind, PropertyMap, PropertySchema,
};
use serde_json::{Map, Value};

/// Tag of a GraphSON map.
pub const TAG_MAP: &str = "g:Map";
/// Tag of a GraphSON list.
pub const TAG_LIST: &str = "g:List";
/// Tag of a GraphSON set.
pub const TAG_SET: &str = "g:Set";
/// Tag of a JanusGraph geoshape.
pub const TAG_GEOSHAPE: &str = "janusgraph:Geoshape";

const TYPE_KEY: &str = "@type";
const VALUE_KEY: &str = "@value";

/// The property kind for a GraphSON type tag.
pub fn kind_for_tag(tag: &str) -> PropertyKind {
    match tag {
        TAG_LIST => PropertyKind::List,
        TAG_MAP => PropertyKind::Map,
        TAG_SET => PropertyKind::Set,
        TAG_GEOSHAPE => PropertyKind::Geoshape,
        "g:Double" => PropertyKind::Number(Some(NumberMode::Double)),
        "g:Int32" => PropertyKind::Number(Some(NumberMode::Integer)),
        "g:Int64" => PropertyKind::Number(Some(NumberMode::Long)),
        "g:Float" => PropertyKind::Number(Some(NumberMode::Float)),
        "gx:Byte" => PropertyKind::Number(Some(NumberMode::Byte)),
        "gx:Int16" => PropertyKind::Number(Some(NumberMode::Short)),
        "g:Date" => PropertyKind::Date,
        "g:UUID" => PropertyKind::Uuid,
        "gx:Char" => PropertyKind::Character,
        _ => PropertyKind::String,
    }
}

/// The `(tag, payload)` pair of a tagged value.
pub fn tagged(value: &Value) -> Option<(&str, &Value)> {
    let tag = value.get(TYPE_KEY)?.as_str()?;
    Some((tag, value.get(VALUE_KEY).unwrap_or(&Value::Null)))
}

fn payload_array(payload: &Value) -> &[Value] {
    payload.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Iterate the key/value pairs of a `g:Map` payload.
///
/// A trailing key without a value is ignored.
pub fn map_pairs(payload: &Value) -> impl Iterator<Item = (&Value, &Value)> {
    payload_array(payload)
        .chunks_exact(2)
        .map(|pair| (&pair[0], &pair[1]))
}

/// Strip GraphSON tags, producing plain JSON.
///
/// Map keys become strings; tagged scalars become their payload.
pub fn untag(value: &Value) -> Value {
    if let Some((tag, payload)) = tagged(value) {
        return match tag {
            TAG_MAP => Value::Object(
                map_pairs(payload)
                    .map(|(k, v)| (value_text(&untag(k)), untag(v)))
                    .collect::<Map<String, Value>>(),
            ),
            TAG_LIST | TAG_SET => Value::Array(payload_array(payload).iter().map(untag).collect()),
            _ => untag(payload),
        };
    }
    match value {
        Value::Array(items) => Value::Array(items.iter().map(untag).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), untag(v)))
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}

fn element_subtype(container: &str, items: &[PropertySchema]) -> String {
    let list = list_subtype_for(items.first().and_then(|i| i.kind.as_ref()));
    list.replacen("list", container, 1)
}

fn collection_schema(kind: PropertyKind, values: &[Value]) -> PropertySchema {
    let items: Vec<PropertySchema> = values.iter().map(schema_from_graphson).collect();
    let container = kind.type_name().to_string();
    PropertySchema::of(kind)
        .with_subtype(element_subtype(&container, &items))
        .with_items(items)
}

fn map_schema(payload: &Value) -> PropertySchema {
    map_pairs(payload).fold(PropertySchema::of(PropertyKind::Map), |schema, (k, v)| {
        schema.with_property(value_text(&untag(k)), schema_from_graphson(v))
    })
}

/// Infer the property schema of one GraphSON value.
pub fn schema_from_graphson(value: &Value) -> PropertySchema {
    if let Some((tag, payload)) = tagged(value) {
        return match tag {
            TAG_MAP => map_schema(payload),
            TAG_LIST => collection_schema(PropertyKind::List, payload_array(payload)),
            TAG_SET => collection_schema(PropertyKind::Set, payload_array(payload)),
            TAG_GEOSHAPE => Geometry::from_geojson(&untag(payload)).to_field_schema(),
            other => PropertySchema::of(kind_for_tag(other)).with_sample(payload.clone()),
        };
    }
    match value {
        Value::Null => PropertySchema::default(),
        Value::Array(items) => collection_schema(PropertyKind::List, items),
        Value::Object(map) => map.iter().fold(PropertySchema::of(PropertyKind::Map), |schema, (k, v)| {
            schema.with_property(k.clone(), schema_from_graphson(v))
        }),
        Value::Bool(_) => PropertySchema::of(PropertyKind::Boolean).with_sample(value.clone()),
        Value::Number(_) => PropertySchema::number(None).with_sample(value.clone()),
        Value::String(_) => PropertySchema::string().with_sample(value.clone()),
    }
}

/// Decode a result that may be GraphSON text produced by the mapper script.
pub fn decode_payload(value: &Value) -> Result<Value> {
    match value {
        Value::String(text) => Ok(serde_json::from_str(text)?),
        other => Ok(other.clone()),
    }
}

fn root_value_schema(value: &Value) -> PropertySchema {
    let first = match tagged(value) {
        Some((TAG_LIST, payload)) if payload.is_array() => payload_array(payload).first(),
        _ => Some(value),
    };
    let mut schema = first.map(schema_from_graphson).unwrap_or_default();
    schema.cardinality = Some(Cardinality::Single);
    schema
}

/// Interpret one `valueMap()` row.
///
/// Keys that are not plain strings are dropped together with their value.
/// Each value is merged with the declared property key of the same name.
/// Names in `label_properties` that the row lacks are appended, described
/// by the property key alone. A row that is not a `g:Map` yields `None`.
pub fn document_schema(
    row: &Value,
    property_keys: &PropertyMap,
    label_properties: &[String],
) -> Option<PropertySchema> {
    let (TAG_MAP, payload) = tagged(row)? else {
        return None;
    };

    let mut properties = PropertyMap::new();
    for (key, value) in map_pairs(payload) {
        if key.is_object() || key.is_array() {
            continue;
        }
        let name = value_text(key);
        let observed = root_value_schema(value);
        properties.insert(name.clone(), merge_property_key(observed, property_keys.get(&name)));
    }
    for name in label_properties {
        if !properties.contains_key(name) {
            let declared = merge_property_key(PropertySchema::default(), property_keys.get(name));
            properties.insert(name.clone(), declared);
        }
    }

    Some(PropertySchema {
        properties,
        ..PropertySchema::default()
    })
}

/// Interpret the GraphSON payload of a data query and merge every row.
pub fn documents_schema(
    payload: &Value,
    property_keys: &PropertyMap,
    label_properties: &[String],
) -> Result<PropertySchema> {
    let decoded = decode_payload(payload)?;
    let rows = decoded
        .get(VALUE_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| GremlinError::UnexpectedResult {
            query: "GraphSON data query".to_string(),
            reason: "expected a tagged list of rows".to_string(),
        })?;
    Ok(merge_all(rows.iter().map(|row| {
        document_schema(row, property_keys, label_properties).unwrap_or_default()
    })))
}

fn meta_sample(value: &Value) -> Value {
    match untag(value) {
        Value::Null => Value::String(String::new()),
        Value::String(text) => Value::String(text),
        other => Value::String(other.to_string()),
    }
}

/// Interpret one row of the meta-property query.
///
/// The row is a `g:Map` of `properties` (the property name) and
/// `metaProperties` (a `g:Map` of meta-property values).
pub fn meta_property_row(row: &Value) -> Option<MetaPropertyRow> {
    let (TAG_MAP, payload) = tagged(row)? else {
        return None;
    };
    let mut name = None;
    let mut metas = None;
    for (key, value) in map_pairs(payload) {
        match key.as_str() {
            Some("properties") => name = Some(value_text(&untag(value))),
            Some("metaProperties") => metas = Some(value),
            _ => {}
        }
    }
    let name = name?;
    let (TAG_MAP, metas) = tagged(metas?)? else {
        return None;
    };

    let meta_properties = map_pairs(metas)
        .filter(|(key, _)| !key.is_object())
        .map(|(key, value)| {
            let kind = schema_from_graphson(value).kind.unwrap_or(PropertyKind::Map);
            MetaProperty::new(value_text(key), Some(kind), Some(meta_sample(value)))
        })
        .collect();
    Some(MetaPropertyRow {
        property: name,
        meta_properties,
    })
}

/// Interpret the GraphSON payload of the meta-property query.
///
/// Anything that is not a tagged list yields no observations.
pub fn meta_properties_payload(payload: &Value) -> MetaObservations {
    let rows = decode_payload(payload)
        .ok()
        .and_then(|decoded| decoded.get(VALUE_KEY).and_then(Value::as_array).cloned())
        .unwrap_or_default();
    rows.iter().filter_map(meta_property_row).map(Into::into).collect()
}

/// Turn one `valueMap(true)` row into a plain sampled document.
///
/// Element id and label entries are dropped. Property values arrive wrapped
/// in a list per property; the first value is kept.
pub fn plain_document(row: &Value) -> Value {
    let entries: Vec<(String, &Value)> = match (tagged(row), row) {
        (Some((TAG_MAP, payload)), _) => map_pairs(payload)
            .filter(|(key, _)| key.is_string())
            .map(|(key, value)| (value_text(key), value))
            .collect(),
        (None, Value::Object(map)) => map
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "id" | "label"))
            .map(|(key, value)| (key.clone(), value))
            .collect(),
        _ => return Value::Object(Map::new()),
    };

    Value::Object(
        entries
            .into_iter()
            .map(|(key, value)| {
                let value = match untag(value) {
                    Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
                    other => other,
                };
                (key, value)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn g_map(pairs: Vec<Value>) -> Value {
        json!({"@type": "g:Map", "@value": pairs})
    }

    fn g_list(items: Vec<Value>) -> Value {
        json!({"@type": "g:List", "@value": items})
    }

    #[test]
    fn test_tag_table() {
        assert_eq!(kind_for_tag("g:Int64"), PropertyKind::Number(Some(NumberMode::Long)));
        assert_eq!(kind_for_tag("gx:Int16"), PropertyKind::Number(Some(NumberMode::Short)));
        assert_eq!(kind_for_tag("g:UUID"), PropertyKind::Uuid);
        assert_eq!(kind_for_tag("gx:Char"), PropertyKind::Character);
        assert_eq!(kind_for_tag("g:Whatever"), PropertyKind::String);
    }

    #[test]
    fn test_scalars() {
        let schema = schema_from_graphson(&json!({"@type": "g:Int32", "@value": 4}));
        assert_eq!(schema.mode(), Some(NumberMode::Integer));
        assert_eq!(schema.sample, Some(json!(4)));

        let plain = schema_from_graphson(&json!("abc"));
        assert_eq!(plain.kind, Some(PropertyKind::String));
        assert_eq!(plain.sample, Some(json!("abc")));

        assert!(schema_from_graphson(&Value::Null).is_empty());
    }

    #[test]
    fn test_tagged_map() {
        let value = g_map(vec![
            json!("age"),
            json!({"@type": "g:Int32", "@value": 31}),
            json!("city"),
            json!("Paris"),
        ]);
        let schema = schema_from_graphson(&value);
        assert_eq!(schema.kind, Some(PropertyKind::Map));
        let keys: Vec<&str> = schema.properties.keys().collect();
        assert_eq!(keys, vec!["age", "city"]);
    }

    #[test]
    fn test_lists_and_sets() {
        let list = schema_from_graphson(&g_list(vec![json!("a"), json!("b")]));
        assert_eq!(list.kind, Some(PropertyKind::List));
        assert_eq!(list.subtype.as_deref(), Some("list<str>"));
        assert_eq!(list.items.len(), 2);

        let set = schema_from_graphson(&json!({"@type": "g:Set", "@value": [
            {"@type": "g:Double", "@value": 1.5}
        ]}));
        assert_eq!(set.kind, Some(PropertyKind::Set));
        assert_eq!(set.subtype.as_deref(), Some("set<number>"));

        let raw = schema_from_graphson(&json!([]));
        assert_eq!(raw.subtype.as_deref(), Some("list<object>"));
    }

    #[test]
    fn test_geoshape() {
        let value = json!({"@type": "janusgraph:Geoshape", "@value": {
            "@type": "g:Map",
            "@value": ["coordinates", {"@type": "g:List", "@value": [
                {"@type": "g:Double", "@value": 35.4},
                {"@type": "g:Double", "@value": 48.9}
            ]}]
        }});
        let schema = schema_from_graphson(&value);
        assert!(schema.is_geoshape());
        assert_eq!(schema.geo_subtype.as_deref(), Some("point"));
        assert_eq!(Geometry::from_field(&schema), Geometry::Point(vec![35.4, 48.9]));
    }

    #[test]
    fn test_untag() {
        let value = g_map(vec![json!("k"), g_list(vec![json!({"@type": "g:Int32", "@value": 1})])]);
        assert_eq!(untag(&value), json!({"k": [1]}));
    }

    #[test]
    fn test_document_schema() {
        let row = g_map(vec![
            json!("name"),
            g_list(vec![json!("Ada")]),
            json!({"@type": "g:T", "@value": "id"}),
            json!({"@type": "g:Int64", "@value": 1}),
        ]);
        let mut keys = PropertyMap::new();
        keys.insert("name", PropertySchema::string().with_cardinality(Cardinality::List));
        keys.insert("age", PropertySchema::number(Some(NumberMode::Integer)));

        let schema = document_schema(&row, &keys, &["name".into(), "age".into()]).unwrap();
        let names: Vec<&str> = schema.properties.keys().collect();
        assert_eq!(names, vec!["name", "age"]);

        let name = schema.properties.get("name").unwrap();
        assert_eq!(name.sample, Some(json!("Ada")));
        assert_eq!(name.cardinality, Some(Cardinality::List));

        let age = schema.properties.get("age").unwrap();
        assert_eq!(age.mode(), Some(NumberMode::Integer));
        assert_eq!(age.sample, None);
    }

    #[test]
    fn test_document_schema_requires_map() {
        assert!(document_schema(&json!("x"), &PropertyMap::new(), &[]).is_none());
    }

    #[test]
    fn test_documents_schema_from_text() {
        let payload = g_list(vec![
            g_map(vec![json!("a"), g_list(vec![json!("x")])]),
            g_map(vec![json!("b"), g_list(vec![json!(true)])]),
        ]);
        let text = Value::String(payload.to_string());
        let schema = documents_schema(&text, &PropertyMap::new(), &[]).unwrap();
        let names: Vec<&str> = schema.properties.keys().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.properties.get("b").unwrap().kind, Some(PropertyKind::Boolean));

        assert!(documents_schema(&json!("not json"), &PropertyMap::new(), &[]).is_err());
        assert!(documents_schema(&json!({"x": 1}), &PropertyMap::new(), &[]).is_err());
    }

    #[test]
    fn test_meta_property_row() {
        let row = g_map(vec![
            json!("properties"),
            json!("name"),
            json!("metaProperties"),
            g_map(vec![
                json!("since"),
                json!({"@type": "g:Int32", "@value": 2001}),
                json!("source"),
                json!("import"),
            ]),
        ]);
        let row = meta_property_row(&row).unwrap();
        assert_eq!(row.property, "name");
        let metas = row.meta_properties;
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].name, "since");
        assert_eq!(metas[0].kind, Some(PropertyKind::Number(Some(NumberMode::Integer))));
        assert_eq!(metas[0].sample, Some(json!("2001")));
        assert_eq!(metas[1].sample, Some(json!("import")));
    }

    #[test]
    fn test_meta_properties_payload_tolerates_garbage() {
        assert!(meta_properties_payload(&json!("{")).is_empty());
        assert!(meta_properties_payload(&Value::Null).is_empty());
    }

    #[test]
    fn test_plain_document() {
        let tagged_row = g_map(vec![
            json!({"@type": "g:T", "@value": "id"}),
            json!({"@type": "g:Int64", "@value": 4}),
            json!("name"),
            g_list(vec![json!("marko")]),
            json!("age"),
            g_list(vec![json!({"@type": "g:Int32", "@value": 29})]),
        ]);
        assert_eq!(plain_document(&tagged_row), json!({"name": "marko", "age": 29}));

        let plain_row = json!({"id": 1, "label": "Person", "name": ["vadas"], "tags": []});
        assert_eq!(plain_document(&plain_row), json!({"name": "vadas", "tags": []}));
        assert_eq!(plain_document(&json!(3)), json!({}));
    }
}
