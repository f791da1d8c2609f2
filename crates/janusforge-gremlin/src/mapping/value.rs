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


//! Sample value literals.
//!
//! A literal is rendered from the property schema and the sample value found
//! for it. Without a sample value the schema's own `sample`, `default` and
//! first `enum` entry are tried in that order; if none exists the literal is
//! `null`.

use super::geoshape;
use crate::script::{json_literal, quote_double};
use janusforge_core::model::value_text;
use janusforge_core::{
    resolve_items, resolve_properties, Geometry, MetaProperty, NumberMode, PropertyKind,
    PropertySchema,
};
use serde_json::Value;

/// Nesting depth of values passed directly to `.property(...)`.
pub const BASE_DEPTH: usize = 2;

const INDENT: &str = "    ";

/// Literal used when no value can be found.
pub const NULL_LITERAL: &str = "null";

fn effective_value<'a>(schema: &'a PropertySchema, value: Option<&'a Value>) -> Option<&'a Value> {
    value
        .filter(|v| !v.is_null())
        .or(schema.sample.as_ref())
        .or(schema.default.as_ref())
        .or(schema.enumeration.first())
}

fn number_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<f64>().ok().map(|_| trimmed.to_string())
        }
        _ => None,
    }
}

/// A number with the suffix or cast its mode needs.
pub fn number_literal(mode: Option<NumberMode>, value: &Value) -> String {
    let Some(text) = number_text(value) else {
        return NULL_LITERAL.to_string();
    };
    match mode {
        Some(NumberMode::Double) => format!("{}d", text),
        Some(NumberMode::Float) => format!("{}f", text),
        Some(NumberMode::Long) => format!("{}l", text),
        Some(NumberMode::Byte) => format!("(byte){}", text),
        Some(NumberMode::Short) => format!("(short){}", text),
        Some(NumberMode::Integer) | None => text,
    }
}

fn map_literal(schema: &PropertySchema, value: Option<&Value>, depth: usize) -> String {
    let properties = resolve_properties(schema);
    if properties.is_empty() {
        return "new HashMap()".to_string();
    }

    let indent = INDENT.repeat(depth);
    let outer = INDENT.repeat(depth.saturating_sub(1));
    let entries: Vec<String> = properties
        .iter()
        .map(|(name, child)| {
            let child_value = value.and_then(|v| v.get(name));
            format!(
                "\n{}{}: {}",
                indent,
                quote_double(name),
                sample_literal(child, child_value, depth + 1)
            )
        })
        .collect();
    format!("new HashMap([{}\n{}])", entries.join(","), outer)
}

fn list_literal(schema: &PropertySchema, value: Option<&Value>, depth: usize) -> String {
    let items = resolve_items(schema);
    let elements: Vec<String> = if items.is_empty() {
        value
            .and_then(Value::as_array)
            .map(|values| values.iter().map(json_literal).collect())
            .unwrap_or_default()
    } else {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let element = value.and_then(|v| v.get(index));
                sample_literal(item, element, depth + 1)
            })
            .collect()
    };
    format!("[{}]", elements.join(", "))
}

/// Render the literal for one property value.
pub fn sample_literal(schema: &PropertySchema, value: Option<&Value>, depth: usize) -> String {
    let value = effective_value(schema, value);
    match &schema.kind {
        Some(PropertyKind::Map) => map_literal(schema, value, depth),
        Some(PropertyKind::List)
        | Some(PropertyKind::Set)
        | Some(PropertyKind::MultiProperty)
        | Some(PropertyKind::Array) => list_literal(schema, value, depth),
        Some(PropertyKind::Geoshape) => geoshape::standalone(&Geometry::from_field(schema)),
        kind => {
            let Some(value) = value else {
                return NULL_LITERAL.to_string();
            };
            match kind {
                Some(PropertyKind::Number(mode)) => number_literal(*mode, value),
                Some(PropertyKind::Date) => format!(
                    "new java.text.SimpleDateFormat(\"yyyy-MM-dd\").parse({})",
                    quote_double(&value_text(value))
                ),
                Some(PropertyKind::Uuid) => {
                    format!("UUID.fromString({})", quote_double(&value_text(value)))
                }
                _ => json_literal(value),
            }
        }
    }
}

/// The literal used for a meta-property declared without a sample.
pub fn meta_property_default(kind: Option<&PropertyKind>) -> &'static str {
    match kind {
        Some(PropertyKind::Map) | Some(PropertyKind::List) | Some(PropertyKind::Set) => "[]",
        Some(PropertyKind::Number(_)) => "1",
        Some(PropertyKind::Date) => "new Date()",
        Some(PropertyKind::Uuid) => "UUID.randomUUID()",
        Some(PropertyKind::Boolean) => "true",
        _ => "\"Lorem\"",
    }
}

/// A meta-property sample rendered by its declared kind.
///
/// Number and boolean samples are emitted bare, even when they were captured
/// as text. Anything else keeps its JSON form.
fn meta_sample_literal(kind: Option<&PropertyKind>, sample: &Value) -> String {
    match (kind, sample) {
        (Some(PropertyKind::Number(mode)), _) => match number_text(sample) {
            Some(_) => number_literal(*mode, sample),
            None => json_literal(sample),
        },
        (Some(PropertyKind::Boolean), Value::Bool(b)) => b.to_string(),
        (Some(PropertyKind::Boolean), Value::String(s)) => match s.trim() {
            "true" | "false" => s.trim().to_string(),
            _ => json_literal(sample),
        },
        _ => json_literal(sample),
    }
}

/// The trailing `"name", literal` arguments for a property's meta-properties.
///
/// Meta-properties without a name are skipped.
pub fn meta_property_arguments(meta_properties: &[MetaProperty]) -> Vec<String> {
    meta_properties
        .iter()
        .filter(|meta| !meta.name.is_empty())
        .map(|meta| {
            let literal = match &meta.sample {
                Some(sample) => meta_sample_literal(meta.kind.as_ref(), sample),
                None => meta_property_default(meta.kind.as_ref()).to_string(),
            };
            format!("{}, {}", quote_double(&meta.name), literal)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_suffixes() {
        let double = PropertySchema::number(Some(NumberMode::Double));
        assert_eq!(sample_literal(&double, Some(&json!(3)), BASE_DEPTH), "3d");

        let long = PropertySchema::number(Some(NumberMode::Long));
        assert_eq!(sample_literal(&long, Some(&json!(7)), BASE_DEPTH), "7l");

        assert_eq!(number_literal(Some(NumberMode::Float), &json!(1.5)), "1.5f");
        assert_eq!(number_literal(Some(NumberMode::Byte), &json!(4)), "(byte)4");
        assert_eq!(number_literal(Some(NumberMode::Short), &json!("12")), "(short)12");
        assert_eq!(number_literal(None, &json!(9)), "9");
        assert_eq!(number_literal(Some(NumberMode::Long), &json!("abc")), "null");
    }

    #[test]
    fn test_fallback_chain() {
        let schema = PropertySchema::string().with_sample("from schema");
        assert_eq!(sample_literal(&schema, None, BASE_DEPTH), "\"from schema\"");
        assert_eq!(
            sample_literal(&schema, Some(&json!("given")), BASE_DEPTH),
            "\"given\""
        );
        assert_eq!(sample_literal(&PropertySchema::string(), None, BASE_DEPTH), "null");
    }

    #[test]
    fn test_date_and_uuid() {
        let date = PropertySchema::of(PropertyKind::Date);
        assert_eq!(
            sample_literal(&date, Some(&json!("2024-01-31")), BASE_DEPTH),
            "new java.text.SimpleDateFormat(\"yyyy-MM-dd\").parse(\"2024-01-31\")"
        );
        let uuid = PropertySchema::of(PropertyKind::Uuid);
        assert_eq!(
            sample_literal(&uuid, Some(&json!("6b1f")), BASE_DEPTH),
            "UUID.fromString(\"6b1f\")"
        );
    }

    #[test]
    fn test_map_indentation() {
        let schema = PropertySchema::of(PropertyKind::Map)
            .with_property("city", PropertySchema::string())
            .with_property("zip", PropertySchema::number(Some(NumberMode::Integer)));
        let rendered = sample_literal(&schema, Some(&json!({"city": "Gent", "zip": 9000})), BASE_DEPTH);
        assert_eq!(
            rendered,
            "new HashMap([\n        \"city\": \"Gent\",\n        \"zip\": 9000\n    ])"
        );
    }

    #[test]
    fn test_list_items_by_position() {
        let schema = PropertySchema::of(PropertyKind::List).with_items(vec![
            PropertySchema::string(),
            PropertySchema::number(Some(NumberMode::Double)),
        ]);
        assert_eq!(
            sample_literal(&schema, Some(&json!(["a", 2])), BASE_DEPTH),
            "[\"a\", 2d]"
        );
    }

    #[test]
    fn test_list_without_items_uses_value() {
        let schema = PropertySchema::of(PropertyKind::Set);
        assert_eq!(
            sample_literal(&schema, Some(&json!([1, "x"])), BASE_DEPTH),
            "[1, \"x\"]"
        );
    }

    #[test]
    fn test_geoshape_from_field() {
        let schema = PropertySchema::of(PropertyKind::Geoshape)
            .with_geo_subtype("point")
            .with_property(
                "coordinates",
                PropertySchema::of(PropertyKind::Array).with_items(vec![
                    PropertySchema::number(None).with_sample(35.4),
                    PropertySchema::number(None).with_sample(48.9),
                ]),
            );
        assert_eq!(sample_literal(&schema, None, BASE_DEPTH), "Geoshape.point(35.4,48.9)");
    }

    #[test]
    fn test_meta_property_arguments() {
        let metas = vec![
            MetaProperty::new("since", Some(PropertyKind::Date), None),
            MetaProperty::new("", Some(PropertyKind::String), None),
            MetaProperty::new("source", None, Some(json!("import"))),
            MetaProperty::new("weight", None, Some(json!(0.5))),
        ];
        assert_eq!(
            meta_property_arguments(&metas),
            vec![
                "\"since\", new Date()".to_string(),
                "\"source\", \"import\"".to_string(),
                "\"weight\", 0.5".to_string(),
            ]
        );
    }

    #[test]
    fn test_meta_property_samples_follow_kind() {
        let metas = vec![
            MetaProperty::new("since", Some(PropertyKind::Number(None)), Some(json!("5"))),
            MetaProperty::new("rank", Some(PropertyKind::Number(Some(NumberMode::Long))), Some(json!(7))),
            MetaProperty::new("ok", Some(PropertyKind::Boolean), Some(json!("true"))),
            MetaProperty::new("checked", Some(PropertyKind::Boolean), Some(json!(false))),
            MetaProperty::new("note", Some(PropertyKind::String), Some(json!("5"))),
            MetaProperty::new("odd", Some(PropertyKind::Number(None)), Some(json!("n/a"))),
        ];
        assert_eq!(
            meta_property_arguments(&metas),
            vec![
                "\"since\", 5".to_string(),
                "\"rank\", 7l".to_string(),
                "\"ok\", true".to_string(),
                "\"checked\", false".to_string(),
                "\"note\", \"5\"".to_string(),
                "\"odd\", \"n/a\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_meta_property_defaults() {
        assert_eq!(meta_property_default(Some(&PropertyKind::Set)), "[]");
        assert_eq!(meta_property_default(Some(&PropertyKind::Number(None))), "1");
        assert_eq!(meta_property_default(Some(&PropertyKind::Uuid)), "UUID.randomUUID()");
        assert_eq!(meta_property_default(Some(&PropertyKind::Boolean)), "true");
        assert_eq!(meta_property_default(None), "\"Lorem\"");
    }
}
