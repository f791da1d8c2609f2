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


//! Schema merging for sampled documents.
//!
//! Every sampled vertex or edge yields its own [`PropertySchema`]. The
//! functions here fold those observations into one schema per label:
//!
//! - [`merge_schemas`] merges two schemas, recursing into `properties` and
//!   taking the union of `items` by element type. Scalar attributes are
//!   right-biased, so the fold is associative on the container shape but
//!   not commutative on conflicting scalars.
//! - [`merge_property_key`] combines an observed value with the declared
//!   property key.
//! - [`collect_meta_properties`] and [`add_meta_properties`] accumulate
//!   meta-property observations separately and attach them at the end.

use janusforge_core::{MetaProperty, PropertyKind, PropertyMap, PropertySchema};
use std::collections::HashSet;

/// Shallow right-biased merge.
///
/// Attributes set on `right` replace those on `left`. Unknown attributes are
/// combined key by key.
pub fn overlay(mut left: PropertySchema, right: PropertySchema) -> PropertySchema {
    left.kind = match (left.kind, right.kind) {
        // a number without a mode does not erase a known mode
        (Some(PropertyKind::Number(Some(mode))), Some(PropertyKind::Number(None))) => {
            Some(PropertyKind::Number(Some(mode)))
        }
        (left_kind, right_kind) => right_kind.or(left_kind),
    };
    if right.subtype.is_some() {
        left.subtype = right.subtype;
    }
    if right.geo_subtype.is_some() {
        left.geo_subtype = right.geo_subtype;
    }
    if !right.properties.is_empty() {
        left.properties = right.properties;
    }
    if !right.items.is_empty() {
        left.items = right.items;
    }
    if right.cardinality.is_some() {
        left.cardinality = right.cardinality;
    }
    if right.ttl.is_some() {
        left.ttl = right.ttl;
    }
    if !right.meta_properties.is_empty() {
        left.meta_properties = right.meta_properties;
    }
    left.choices.extend(right.choices);
    if right.sample.is_some() {
        left.sample = right.sample;
    }
    if right.default.is_some() {
        left.default = right.default;
    }
    if !right.enumeration.is_empty() {
        left.enumeration = right.enumeration;
    }
    left.extra.extend(right.extra);
    left
}

fn merge_property_maps(left: PropertyMap, mut right: PropertyMap) -> PropertyMap {
    let mut merged = PropertyMap::new();
    for (name, schema) in left {
        let other = right.remove(&name).unwrap_or_default();
        merged.insert(name, merge_schemas(schema, other));
    }
    for (name, schema) in right {
        merged.insert(name, merge_schemas(PropertySchema::default(), schema));
    }
    merged
}

fn union_items(left: Vec<PropertySchema>, right: Vec<PropertySchema>) -> Vec<PropertySchema> {
    let mut seen: HashSet<Option<String>> = HashSet::new();
    left.into_iter()
        .chain(right)
        .filter(|item| seen.insert(item.type_name().map(str::to_string)))
        .collect()
}

/// Merge two schemas.
///
/// When either side is a geoshape the result is [`overlay`]; geometry
/// details are never merged deeply. Otherwise nested properties are merged
/// per name (left order first, then new names from the right) and items are
/// the union of both sides, keeping the first element of each type.
pub fn merge_schemas(left: PropertySchema, right: PropertySchema) -> PropertySchema {
    if left.is_geoshape() || right.is_geoshape() {
        return overlay(left, right);
    }

    let mut left = left;
    let mut right = right;
    let left_properties = std::mem::take(&mut left.properties);
    let right_properties = std::mem::take(&mut right.properties);
    let left_items = std::mem::take(&mut left.items);
    let right_items = std::mem::take(&mut right.items);

    let mut merged = overlay(left, right);
    merged.properties = merge_property_maps(left_properties, right_properties);
    merged.items = union_items(left_items, right_items);
    merged
}

/// Fold any number of schemas, starting from the empty schema.
pub fn merge_all<I>(schemas: I) -> PropertySchema
where
    I: IntoIterator<Item = PropertySchema>,
{
    schemas
        .into_iter()
        .fold(PropertySchema::default(), merge_schemas)
}

/// Combine an observed property value with its declared property key.
///
/// - When the observation is a `set`, its container shape is kept. Only the
///   declared key's other attributes are imported, and a declared
///   `list<...>` marker becomes `set<...>`.
/// - When the types differ, the observed type wins and the declared type,
///   subtype and items are ignored.
/// - Otherwise the declared key overlays the observation.
pub fn merge_property_key(
    observed: PropertySchema,
    declared: Option<&PropertySchema>,
) -> PropertySchema {
    let Some(declared) = declared else {
        return observed;
    };
    let mut declared = declared.clone();

    if observed.kind == Some(PropertyKind::Set) {
        let set_subtype = declared
            .subtype
            .take()
            .filter(|s| !s.is_empty())
            .map(|s| s.replacen("list", "set", 1));
        declared.kind = None;
        let mut merged = overlay(observed, declared);
        if set_subtype.is_some() {
            merged.subtype = set_subtype;
        }
        return merged;
    }

    let same_type = match (&observed.kind, &declared.kind) {
        (Some(a), Some(b)) => a.type_name() == b.type_name(),
        (None, _) | (_, None) => true,
    };
    if !same_type {
        declared.kind = None;
        declared.subtype = None;
        declared.items.clear();
    }
    overlay(observed, declared)
}

/// Meta-property observations grouped by property name, in first-seen order.
pub type MetaObservations = Vec<(String, Vec<MetaProperty>)>;

/// Accumulate meta-property observations per property name.
///
/// An observation identical to one already recorded for the same property
/// is dropped.
pub fn collect_meta_properties<I>(observations: I) -> MetaObservations
where
    I: IntoIterator<Item = (String, Vec<MetaProperty>)>,
{
    let mut grouped: MetaObservations = Vec::new();
    for (name, metas) in observations {
        let position = match grouped.iter().position(|(n, _)| *n == name) {
            Some(position) => position,
            None => {
                grouped.push((name, Vec::new()));
                grouped.len() - 1
            }
        };
        let bucket = &mut grouped[position].1;
        for meta in metas {
            if !bucket.contains(&meta) {
                bucket.push(meta);
            }
        }
    }
    grouped
}

/// Attach accumulated meta-properties to the properties of a schema.
///
/// Names missing from the schema are ignored. A `multi-property` receives
/// the meta-properties on each of its items instead of on itself.
pub fn add_meta_properties(mut schema: PropertySchema, observations: &MetaObservations) -> PropertySchema {
    for (name, metas) in observations {
        let Some(property) = schema.properties.get_mut(name) else {
            tracing::debug!(property = %name, "meta-properties for unknown property ignored");
            continue;
        };
        if property.kind == Some(PropertyKind::MultiProperty) {
            for item in property.items.iter_mut() {
                item.meta_properties.extend(metas.iter().cloned());
            }
        } else {
            property.meta_properties.extend(metas.iter().cloned());
        }
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use janusforge_core::{Cardinality, NumberMode};
    use serde_json::json;

    fn with(names: &[&str]) -> PropertySchema {
        names.iter().fold(PropertySchema::of(PropertyKind::Map), |s, n| {
            s.with_property(*n, PropertySchema::string())
        })
    }

    #[test]
    fn test_properties_union_keeps_left_order() {
        let merged = merge_schemas(with(&["b", "a"]), with(&["c", "a"]));
        let keys: Vec<&str> = merged.properties.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_sides() {
        let merged = merge_schemas(PropertySchema::default(), PropertySchema::default());
        assert!(merged.is_empty());

        let one = with(&["x"]);
        assert_eq!(merge_schemas(PropertySchema::default(), one.clone()), one);
    }

    #[test]
    fn test_scalar_right_bias() {
        let left = PropertySchema::string().with_sample("old");
        let right = PropertySchema::string().with_sample("new");
        let merged = merge_schemas(left, right);
        assert_eq!(merged.sample, Some(json!("new")));
    }

    #[test]
    fn test_mode_not_erased() {
        let left = PropertySchema::number(Some(NumberMode::Long));
        let right = PropertySchema::number(None).with_sample(3);
        let merged = merge_schemas(left, right);
        assert_eq!(merged.mode(), Some(NumberMode::Long));
    }

    #[test]
    fn test_items_deduplicated_by_type() {
        let left = PropertySchema::of(PropertyKind::List)
            .with_items(vec![PropertySchema::string().with_sample("first")]);
        let right = PropertySchema::of(PropertyKind::List).with_items(vec![
            PropertySchema::string().with_sample("second"),
            PropertySchema::number(None),
        ]);
        let merged = merge_schemas(left, right);
        assert_eq!(merged.items.len(), 2);
        assert_eq!(merged.items[0].sample, Some(json!("first")));
        assert_eq!(merged.items[1].type_name(), Some("number"));
    }

    #[test]
    fn test_geoshape_is_shallow() {
        let left = PropertySchema::of(PropertyKind::Geoshape)
            .with_geo_subtype("point")
            .with_property("coordinates", PropertySchema::of(PropertyKind::Array));
        let right = PropertySchema::of(PropertyKind::Geoshape)
            .with_geo_subtype("polygon")
            .with_property("other", PropertySchema::string());
        let merged = merge_schemas(left, right);
        assert_eq!(merged.geo_subtype.as_deref(), Some("polygon"));
        let keys: Vec<&str> = merged.properties.keys().collect();
        assert_eq!(keys, vec!["other"]);
    }

    #[test]
    fn test_merge_all_folds() {
        let merged = merge_all(vec![with(&["a"]), with(&["b"]), with(&["a", "c"])]);
        let keys: Vec<&str> = merged.properties.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_property_key_same_type() {
        let observed = PropertySchema::string()
            .with_sample("x")
            .with_cardinality(Cardinality::Single);
        let declared = PropertySchema::string().with_cardinality(Cardinality::List);
        let merged = merge_property_key(observed, Some(&declared));
        assert_eq!(merged.cardinality, Some(Cardinality::List));
        assert_eq!(merged.sample, Some(json!("x")));
    }

    #[test]
    fn test_property_key_type_mismatch() {
        let observed = PropertySchema::of(PropertyKind::List)
            .with_subtype("list<str>")
            .with_items(vec![PropertySchema::string()]);
        let declared = PropertySchema::number(Some(NumberMode::Integer))
            .with_items(vec![PropertySchema::number(None)])
            .with_cardinality(Cardinality::List);
        let merged = merge_property_key(observed, Some(&declared));
        assert_eq!(merged.kind, Some(PropertyKind::List));
        assert_eq!(merged.subtype.as_deref(), Some("list<str>"));
        assert_eq!(merged.items[0].kind, Some(PropertyKind::String));
        assert_eq!(merged.cardinality, Some(Cardinality::List));
    }

    #[test]
    fn test_property_key_set_keeps_shape() {
        let observed = PropertySchema::of(PropertyKind::Set);
        let declared = PropertySchema::of(PropertyKind::List)
            .with_subtype("list<number>")
            .with_cardinality(Cardinality::Set);
        let merged = merge_property_key(observed, Some(&declared));
        assert_eq!(merged.kind, Some(PropertyKind::Set));
        assert_eq!(merged.subtype.as_deref(), Some("set<number>"));
        assert_eq!(merged.cardinality, Some(Cardinality::Set));
    }

    #[test]
    fn test_property_key_missing_declaration() {
        let observed = PropertySchema::string();
        assert_eq!(merge_property_key(observed.clone(), None), observed);
    }

    #[test]
    fn test_meta_properties_collected() {
        let a = MetaProperty::new("since", Some(PropertyKind::Date), Some(json!("2020")));
        let b = MetaProperty::new("by", None, None);
        let grouped = collect_meta_properties(vec![
            ("name".to_string(), vec![a.clone()]),
            ("name".to_string(), vec![a.clone(), b.clone()]),
            ("age".to_string(), vec![b.clone()]),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "name");
        assert_eq!(grouped[0].1, vec![a, b.clone()]);
        assert_eq!(grouped[1].1, vec![b]);
    }

    #[test]
    fn test_meta_properties_attached() {
        let multi = PropertySchema::of(PropertyKind::MultiProperty)
            .with_items(vec![PropertySchema::string(), PropertySchema::string()]);
        let schema = with(&["name"]).with_property("tags", multi);
        let meta = MetaProperty::new("since", None, Some(json!("x")));
        let observations = vec![
            ("name".to_string(), vec![meta.clone()]),
            ("tags".to_string(), vec![meta.clone()]),
            ("missing".to_string(), vec![meta.clone()]),
        ];

        let schema = add_meta_properties(schema, &observations);
        assert_eq!(schema.properties.get("name").unwrap().meta_properties, vec![meta.clone()]);
        let tags = schema.properties.get("tags").unwrap();
        assert!(tags.meta_properties.is_empty());
        assert!(tags.items.iter().all(|i| i.meta_properties == vec![meta.clone()]));
        assert!(!schema.properties.contains_key("missing"));
    }
}
