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

//! Property-based tests for janusforge-core.
//!
//! Test coverage:
//! - Sanitizer idempotence and output alphabet
//! - Type mapper round trip on the type discriminator
//! - Choice resolution keeps every property exactly once

use janusforge_core::{
    resolve_properties, sanitize, ChoiceKind, NativeType, NumberMode, PropertyKind,
    PropertySchema,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn number_mode() -> impl Strategy<Value = NumberMode> {
    prop_oneof![
        Just(NumberMode::Byte),
        Just(NumberMode::Short),
        Just(NumberMode::Integer),
        Just(NumberMode::Long),
        Just(NumberMode::Float),
        Just(NumberMode::Double),
    ]
}

fn scalar_kind() -> impl Strategy<Value = PropertyKind> {
    prop_oneof![
        Just(PropertyKind::String),
        Just(PropertyKind::Boolean),
        Just(PropertyKind::Character),
        Just(PropertyKind::Date),
        Just(PropertyKind::Uuid),
        Just(PropertyKind::Geoshape),
        Just(PropertyKind::Map),
        number_mode().prop_map(|m| PropertyKind::Number(Some(m))),
    ]
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,3}", 0..5)
}

fn with_names(names: &[String]) -> PropertySchema {
    names.iter().fold(PropertySchema::default(), |schema, name| {
        schema.with_property(name.clone(), PropertySchema::string())
    })
}

// ============================================================================
// Name Sanitizer Properties
// ============================================================================

proptest! {
    /// Sanitizing twice changes nothing
    #[test]
    fn prop_sanitize_idempotent(s in ".*") {
        let once = sanitize(&s);
        prop_assert_eq!(sanitize(&once), once);
    }

    /// Output never starts with a digit and is never empty
    #[test]
    fn prop_sanitize_valid_start(s in ".*") {
        let name = sanitize(&s);
        prop_assert!(!name.is_empty());
        prop_assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
    }

    /// Output contains no whitespace or quoting characters
    #[test]
    fn prop_sanitize_no_reserved(s in ".*") {
        let name = sanitize(&s);
        let reserved = "'\"`.,<>[]{}";
        prop_assert!(!name.chars().any(|c| c.is_whitespace() || reserved.contains(c)));
    }

    /// Valid identifiers pass through unchanged
    #[test]
    fn prop_sanitize_keeps_identifiers(s in "[a-zA-Z][a-zA-Z0-9]{0,20}") {
        prop_assert_eq!(sanitize(&s), s);
    }
}

// ============================================================================
// Type Mapper Properties
// ============================================================================

proptest! {
    /// Scalar kinds survive the forward and inverse mapping
    #[test]
    fn prop_scalar_type_round_trip(kind in scalar_kind()) {
        let native = NativeType::for_schema(&PropertySchema::of(kind.clone()));
        let back = native.to_schema();
        prop_assert_eq!(back.kind, Some(kind));
    }

    /// Class literals parse back to the same native type
    #[test]
    fn prop_class_literal_round_trip(kind in scalar_kind()) {
        let native = NativeType::for_schema(&PropertySchema::of(kind));
        let literal = native.class_literal();
        prop_assert_eq!(NativeType::from_class_literal(&literal), Some(native));
    }

    /// Number lists keep their element mode
    #[test]
    fn prop_number_list_round_trip(mode in number_mode()) {
        let schema = PropertySchema::of(PropertyKind::List)
            .with_subtype("list<number>")
            .with_items(vec![PropertySchema::number(Some(mode))]);
        let back = NativeType::for_schema(&schema).to_schema();
        prop_assert_eq!(back.kind, Some(PropertyKind::List));
        prop_assert_eq!(back.subtype.as_deref(), Some("list<number>"));
        prop_assert_eq!(back.items[0].mode(), Some(mode));
    }
}

// ============================================================================
// Choice Resolution Properties
// ============================================================================

proptest! {
    /// Every base and choice property appears exactly once
    #[test]
    fn prop_choices_keep_union(
        base in names(),
        first in names(),
        second in names(),
        first_index in prop::option::of(0usize..6),
        second_index in prop::option::of(0usize..6),
    ) {
        let schema = with_names(&base)
            .with_choice(ChoiceKind::OneOf, vec![with_names(&first)], first_index)
            .with_choice(ChoiceKind::AnyOf, vec![with_names(&second)], second_index);

        let resolved = resolve_properties(&schema);
        let expected: BTreeSet<&str> = base
            .iter()
            .chain(first.iter())
            .chain(second.iter())
            .map(String::as_str)
            .collect();
        let actual: BTreeSet<&str> = resolved.keys().collect();

        prop_assert_eq!(resolved.len(), expected.len());
        prop_assert_eq!(actual, expected);
    }

    /// Base properties keep their relative order
    #[test]
    fn prop_choices_preserve_base_order(base in names(), extra in names(), index in 0usize..6) {
        let schema = with_names(&base)
            .with_choice(ChoiceKind::AllOf, vec![with_names(&extra)], Some(index));
        let resolved = resolve_properties(&schema);

        let positions: Vec<usize> = with_names(&base)
            .properties
            .keys()
            .filter(|k| !extra.iter().any(|e| e == k))
            .filter_map(|k| resolved.keys().position(|r| r == k))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(positions, sorted);
    }
}
