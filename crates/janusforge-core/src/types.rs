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

//! Mapping between abstract property types and JanusGraph data types.
//!
//! | Property type | Native type |
//! |---------------|-------------|
//! | `string` | `String` |
//! | `boolean` | `Boolean` |
//! | `character` | `Character` |
//! | `date` | `Date` |
//! | `uuid` | `UUID` |
//! | `geoshape` | `Geoshape` |
//! | `map` | `HashMap` |
//! | `number` (`byte`..`double`) | `Byte`, `Short`, `Integer`, `Long`, `Float`, `Double` |
//! | `list<str>`, `set<number>`, ... | element type array, e.g. `String[]` |
//! | anything else | `Object` |
//!
//! [`NativeType::to_schema`] inverts the table. Lists and sets share array
//! types, so the inverse of a set is a list; GraphSON samples restore the set
//! shape when the declared key is merged with observed data. `Object` has no
//! property type of its own and reads back as `map`, and `Object[]` reads
//! back as `list<object>`.

use crate::schema::{NumberMode, PropertyKind, PropertySchema};
use std::fmt;

/// A JanusGraph property data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    /// `String`
    String,
    /// `Boolean`
    Boolean,
    /// `Character`
    Character,
    /// `Date`
    Date,
    /// `UUID`
    Uuid,
    /// `Geoshape`
    Geoshape,
    /// `HashMap`
    HashMap,
    /// `Byte`
    Byte,
    /// `Short`
    Short,
    /// `Integer`
    Integer,
    /// `Long`
    Long,
    /// `Float`
    Float,
    /// `Double`
    Double,
    /// `Object`
    Object,
    /// Array of the element type.
    Array(Box<NativeType>),
}

/// Extract the element marker from a `list<...>`-shaped subtype.
pub fn element_marker(subtype: &str) -> Option<&str> {
    let start = subtype.find('<')? + 1;
    let len = subtype[start..].find('>')?;
    Some(&subtype[start..start + len])
}

/// The marker used inside `list<...>` for an element kind.
pub fn element_marker_for(kind: Option<&PropertyKind>) -> &'static str {
    match kind {
        Some(PropertyKind::String) => "str",
        Some(PropertyKind::Character) => "char",
        Some(PropertyKind::Boolean) => "bool",
        Some(PropertyKind::Number(_)) => "number",
        Some(PropertyKind::Date) => "date",
        Some(PropertyKind::Uuid) => "uuid",
        Some(PropertyKind::Geoshape) => "geoshape",
        Some(PropertyKind::Map) => "map",
        Some(PropertyKind::List) | Some(PropertyKind::Array) => "list",
        Some(PropertyKind::Set) => "set",
        _ => "object",
    }
}

/// Build a `list<...>` subtype for the given element kind.
pub fn list_subtype_for(kind: Option<&PropertyKind>) -> String {
    format!("list<{}>", element_marker_for(kind))
}

fn number_type(mode: Option<NumberMode>) -> NativeType {
    match mode {
        Some(NumberMode::Byte) => NativeType::Byte,
        Some(NumberMode::Short) => NativeType::Short,
        Some(NumberMode::Long) => NativeType::Long,
        Some(NumberMode::Float) => NativeType::Float,
        Some(NumberMode::Double) => NativeType::Double,
        Some(NumberMode::Integer) | None => NativeType::Integer,
    }
}

impl NativeType {
    /// Map a property schema to its native type.
    pub fn for_schema(schema: &PropertySchema) -> NativeType {
        match &schema.kind {
            Some(PropertyKind::String) => NativeType::String,
            Some(PropertyKind::Boolean) => NativeType::Boolean,
            Some(PropertyKind::Character) => NativeType::Character,
            Some(PropertyKind::Date) => NativeType::Date,
            Some(PropertyKind::Uuid) => NativeType::Uuid,
            Some(PropertyKind::Geoshape) => NativeType::Geoshape,
            Some(PropertyKind::Map) => NativeType::HashMap,
            Some(PropertyKind::Number(mode)) => number_type(*mode),
            Some(PropertyKind::List) | Some(PropertyKind::Set) => {
                NativeType::Array(Box::new(Self::element_type(schema)))
            }
            _ => NativeType::Object,
        }
    }

    fn element_type(schema: &PropertySchema) -> NativeType {
        let marker = schema.subtype.as_deref().and_then(element_marker);
        match marker {
            Some("str") => NativeType::String,
            Some("char") => NativeType::Character,
            Some("bool") => NativeType::Boolean,
            Some("number") => number_type(schema.items.first().and_then(PropertySchema::mode)),
            Some("date") => NativeType::Date,
            Some("uuid") => NativeType::Uuid,
            Some("geoshape") => NativeType::Geoshape,
            Some("map") => NativeType::HashMap,
            _ => NativeType::Object,
        }
    }

    /// The Java simple class name, e.g. `Integer` or `String[]`.
    pub fn class_name(&self) -> String {
        match self {
            NativeType::Array(element) => format!("{}[]", element.class_name()),
            scalar => scalar.scalar_name().to_string(),
        }
    }

    fn scalar_name(&self) -> &'static str {
        match self {
            NativeType::String => "String",
            NativeType::Boolean => "Boolean",
            NativeType::Character => "Character",
            NativeType::Date => "Date",
            NativeType::Uuid => "UUID",
            NativeType::Geoshape => "Geoshape",
            NativeType::HashMap => "HashMap",
            NativeType::Byte => "Byte",
            NativeType::Short => "Short",
            NativeType::Integer => "Integer",
            NativeType::Long => "Long",
            NativeType::Float => "Float",
            NativeType::Double => "Double",
            NativeType::Object | NativeType::Array(_) => "Object",
        }
    }

    /// The class literal used in `dataType(...)`, e.g. `Integer.class`.
    pub fn class_literal(&self) -> String {
        format!("{}.class", self.class_name())
    }

    fn from_simple_name(name: &str) -> Option<NativeType> {
        Some(match name {
            "String" => NativeType::String,
            "Boolean" => NativeType::Boolean,
            "Character" => NativeType::Character,
            "Date" => NativeType::Date,
            "UUID" => NativeType::Uuid,
            "Geoshape" => NativeType::Geoshape,
            "HashMap" => NativeType::HashMap,
            "Byte" => NativeType::Byte,
            "Short" => NativeType::Short,
            "Integer" => NativeType::Integer,
            "Long" => NativeType::Long,
            "Float" => NativeType::Float,
            "Double" => NativeType::Double,
            "Object" => NativeType::Object,
            _ => return None,
        })
    }

    /// Parse a class literal such as `Integer.class` or `String[].class`.
    pub fn from_class_literal(literal: &str) -> Option<NativeType> {
        let name = literal.trim().strip_suffix(".class").unwrap_or(literal.trim());
        match name.strip_suffix("[]") {
            Some(element) => Self::from_simple_name(element).map(|e| NativeType::Array(Box::new(e))),
            None => Self::from_simple_name(name),
        }
    }

    /// Parse a fully qualified Java class name as reported by the server.
    ///
    /// Accepts scalar names (`java.lang.Integer`), boxed array names
    /// (`[Ljava.lang.String;`) and primitive array codes (`[I`). Unknown
    /// classes map to `Object`.
    pub fn from_java_class(class: &str) -> NativeType {
        let class = class.trim().trim_start_matches("class ");
        if let Some(element) = class.strip_prefix("[L") {
            let element = element.trim_end_matches(';');
            return NativeType::Array(Box::new(Self::from_java_class(element)));
        }
        match class {
            "java.lang.String" => NativeType::String,
            "java.lang.Character" => NativeType::Character,
            "java.lang.Boolean" => NativeType::Boolean,
            "java.lang.Byte" => NativeType::Byte,
            "java.lang.Short" => NativeType::Short,
            "java.lang.Integer" => NativeType::Integer,
            "java.lang.Long" => NativeType::Long,
            "java.lang.Float" => NativeType::Float,
            "java.lang.Double" => NativeType::Double,
            "java.util.Date" => NativeType::Date,
            "java.util.UUID" => NativeType::Uuid,
            "java.util.HashMap" => NativeType::HashMap,
            "org.janusgraph.core.attribute.Geoshape" => NativeType::Geoshape,
            "[B" => NativeType::Array(Box::new(NativeType::Byte)),
            "[S" => NativeType::Array(Box::new(NativeType::Short)),
            "[I" => NativeType::Array(Box::new(NativeType::Integer)),
            "[J" => NativeType::Array(Box::new(NativeType::Long)),
            "[F" => NativeType::Array(Box::new(NativeType::Float)),
            "[D" => NativeType::Array(Box::new(NativeType::Double)),
            "[Z" => NativeType::Array(Box::new(NativeType::Boolean)),
            "[C" => NativeType::Array(Box::new(NativeType::Character)),
            _ => NativeType::Object,
        }
    }

    fn number_mode(&self) -> Option<NumberMode> {
        match self {
            NativeType::Byte => Some(NumberMode::Byte),
            NativeType::Short => Some(NumberMode::Short),
            NativeType::Integer => Some(NumberMode::Integer),
            NativeType::Long => Some(NumberMode::Long),
            NativeType::Float => Some(NumberMode::Float),
            NativeType::Double => Some(NumberMode::Double),
            _ => None,
        }
    }

    fn scalar_kind(&self) -> PropertyKind {
        if let Some(mode) = self.number_mode() {
            return PropertyKind::Number(Some(mode));
        }
        match self {
            NativeType::String => PropertyKind::String,
            NativeType::Boolean => PropertyKind::Boolean,
            NativeType::Character => PropertyKind::Character,
            NativeType::Date => PropertyKind::Date,
            NativeType::Uuid => PropertyKind::Uuid,
            NativeType::Geoshape => PropertyKind::Geoshape,
            // Object and HashMap both read back as map.
            _ => PropertyKind::Map,
        }
    }

    /// Map a native type back to a property schema.
    pub fn to_schema(&self) -> PropertySchema {
        match self {
            NativeType::Array(element) => {
                let marker = match element.as_ref() {
                    NativeType::Object => "object",
                    other => element_marker_for(Some(&other.scalar_kind())),
                };
                let schema = PropertySchema::of(PropertyKind::List)
                    .with_subtype(format!("list<{}>", marker));
                match element.number_mode() {
                    Some(mode) => schema.with_items(vec![PropertySchema::number(Some(mode))]),
                    None => schema,
                }
            }
            scalar => PropertySchema::of(scalar.scalar_kind()),
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.class_name())
    }
}
