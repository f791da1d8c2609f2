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

//! Resolution of `oneOf` / `allOf` / `anyOf` groups into one property list.
//!
//! Each group contributes the properties of its first alternative. Groups are
//! ordered by their declared index, and every group after the first has its
//! index shifted forward by the number of extra properties the earlier groups
//! already inserted (each earlier group of `n` properties shifts by `n - 1`).
//! The shifted group is then spliced in front of the property currently at
//! that position.

use crate::schema::{ChoiceKind, PropertyMap, PropertySchema};

/// A choice group reduced to its sampled alternative.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChoice {
    /// Which keyword declared the group.
    pub kind: ChoiceKind,
    /// Properties of the first alternative.
    pub properties: PropertyMap,
    /// Insertion position after shifting.
    pub index: Option<usize>,
}

/// Collect the choice groups of a schema, sorted and index-shifted.
///
/// Groups without an index sort after indexed ones and keep keyword order.
pub fn choice_groups(schema: &PropertySchema) -> Vec<ResolvedChoice> {
    let mut groups: Vec<ResolvedChoice> = ChoiceKind::ALL
        .iter()
        .filter_map(|kind| {
            let group = schema.choices.get(kind)?;
            let first = group.alternatives.first()?;
            Some(ResolvedChoice {
                kind: *kind,
                properties: first.properties.clone(),
                index: group.index,
            })
        })
        .collect();

    groups.sort_by_key(|g| (g.index.is_none(), g.index));

    let mut shift: isize = 0;
    for group in groups.iter_mut() {
        if let Some(index) = group.index {
            group.index = Some((index as isize + shift).max(0) as usize);
        }
        shift += group.properties.len() as isize - 1;
    }
    groups
}

fn splice(acc: PropertyMap, choice: PropertyMap, index: usize) -> PropertyMap {
    let mut result = PropertyMap::new();
    let mut choice = Some(choice);
    for (position, (key, value)) in acc.into_iter().enumerate() {
        if position == index {
            if let Some(choice) = choice.take() {
                result.extend_from(choice);
            }
        }
        result.insert(key, value);
    }
    result
}

/// Fold the choice groups of a schema into its ordered property map.
pub fn resolve_properties(schema: &PropertySchema) -> PropertyMap {
    let groups = choice_groups(schema);
    if groups.is_empty() {
        return schema.properties.clone();
    }

    groups
        .into_iter()
        .fold(schema.properties.clone(), |mut acc, group| {
            if acc.is_empty() {
                return group.properties;
            }
            match group.index {
                Some(index) if index < acc.len() => splice(acc, group.properties, index),
                _ => {
                    acc.extend_from(group.properties);
                    acc
                }
            }
        })
}

/// The element schemas of a list, followed by every choice property.
pub fn resolve_items(schema: &PropertySchema) -> Vec<PropertySchema> {
    let mut items = schema.items.clone();
    for group in choice_groups(schema) {
        items.extend(group.properties.into_iter().map(|(_, v)| v));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyKind;

    fn props(names: &[&str]) -> PropertySchema {
        names.iter().fold(PropertySchema::default(), |s, n| {
            s.with_property(*n, PropertySchema::string())
        })
    }

    fn keys(map: &PropertyMap) -> Vec<&str> {
        map.keys().collect()
    }

    #[test]
    fn test_no_choices_returns_properties() {
        let schema = props(&["a", "b"]);
        assert_eq!(keys(&resolve_properties(&schema)), vec!["a", "b"]);
    }

    #[test]
    fn test_choice_into_empty_properties() {
        let schema = PropertySchema::default().with_choice(
            ChoiceKind::OneOf,
            vec![props(&["x", "y"]), props(&["z"])],
            Some(3),
        );
        assert_eq!(keys(&resolve_properties(&schema)), vec!["x", "y"]);
    }

    #[test]
    fn test_choice_spliced_at_index() {
        let schema = props(&["a", "b", "c"]).with_choice(
            ChoiceKind::OneOf,
            vec![props(&["x"])],
            Some(1),
        );
        assert_eq!(keys(&resolve_properties(&schema)), vec!["a", "x", "b", "c"]);
    }

    #[test]
    fn test_index_past_end_appends() {
        let schema = props(&["a"]).with_choice(ChoiceKind::AnyOf, vec![props(&["x"])], Some(5));
        assert_eq!(keys(&resolve_properties(&schema)), vec!["a", "x"]);

        let unindexed = props(&["a"]).with_choice(ChoiceKind::AnyOf, vec![props(&["y"])], None);
        assert_eq!(keys(&resolve_properties(&unindexed)), vec!["a", "y"]);
    }

    #[test]
    fn test_later_groups_shift() {
        // oneOf at 1 inserts two properties, so allOf at 2 lands at 3.
        let schema = props(&["a", "b", "c", "d"])
            .with_choice(ChoiceKind::OneOf, vec![props(&["x1", "x2"])], Some(1))
            .with_choice(ChoiceKind::AllOf, vec![props(&["y"])], Some(2));

        let groups = choice_groups(&schema);
        assert_eq!(groups[0].index, Some(1));
        assert_eq!(groups[1].index, Some(3));

        assert_eq!(
            keys(&resolve_properties(&schema)),
            vec!["a", "x1", "x2", "y", "b", "c", "d"]
        );
    }

    #[test]
    fn test_groups_sorted_by_index() {
        let schema = props(&["a", "b"])
            .with_choice(ChoiceKind::OneOf, vec![props(&["late"])], Some(2))
            .with_choice(ChoiceKind::AnyOf, vec![props(&["early"])], Some(0));
        let groups = choice_groups(&schema);
        assert_eq!(groups[0].kind, ChoiceKind::AnyOf);
        assert_eq!(groups[1].kind, ChoiceKind::OneOf);
    }

    #[test]
    fn test_resolve_items_appends_choice_values() {
        let schema = PropertySchema::of(PropertyKind::List)
            .with_items(vec![PropertySchema::number(None)])
            .with_choice(ChoiceKind::OneOf, vec![props(&["s"])], None);
        let items = resolve_items(&schema);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].kind, Some(PropertyKind::String));
    }
}
