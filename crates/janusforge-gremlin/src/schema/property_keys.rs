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


//! Property key creation.

use super::{ttl_line, MANAGEMENT};
use crate::script::{quote_single, GremlinScript, GremlinStatement, StatementKind};
use janusforge_core::{NativeType, PropertyKeyDefinition};

/// The `makePropertyKey` chain for one key, followed by its TTL.
pub fn property_key_statement(key: &PropertyKeyDefinition) -> GremlinStatement {
    let data_type = NativeType::for_schema(&key.schema);
    let make = format!(
        "{name} = {mgmt}.makePropertyKey({quoted}).dataType({data_type}).cardinality(org.janusgraph.core.Cardinality.{cardinality}).make()",
        name = key.name,
        mgmt = MANAGEMENT,
        quoted = quote_single(&key.name),
        data_type = data_type.class_literal(),
        cardinality = key.cardinality().as_str(),
    );

    GremlinStatement::new(StatementKind::PropertyKey)
        .with_line(make)
        .with_optional(ttl_line(&key.name, key.ttl()))
}

/// One statement per property key, in order.
pub fn property_key_script(keys: &[PropertyKeyDefinition]) -> GremlinScript {
    keys.iter().map(property_key_statement).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use janusforge_core::{Cardinality, NumberMode, PropertyKind, PropertySchema, Ttl, TtlUnit};

    fn key(name: &str, schema: PropertySchema) -> PropertyKeyDefinition {
        PropertyKeyDefinition {
            name: name.to_string(),
            schema,
        }
    }

    #[test]
    fn test_string_key_defaults_to_single() {
        let statement = property_key_statement(&key("name", PropertySchema::string()));
        assert_eq!(
            statement.render(),
            "name = mgmt.makePropertyKey('name').dataType(String.class).cardinality(org.janusgraph.core.Cardinality.SINGLE).make()"
        );
    }

    #[test]
    fn test_number_key_with_cardinality_and_ttl() {
        let schema = PropertySchema::number(Some(NumberMode::Long))
            .with_cardinality(Cardinality::List)
            .with_ttl(Ttl::new(2, TtlUnit::Hours));
        let rendered = property_key_statement(&key("visits", schema)).render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(".dataType(Long.class)"));
        assert!(lines[0].contains("Cardinality.LIST"));
        assert_eq!(lines[1], "mgmt.setTTL(visits, Duration.ofHours(2))");
    }

    #[test]
    fn test_list_key_uses_array_type() {
        let schema = PropertySchema::of(PropertyKind::List).with_subtype("list<str>");
        let rendered = property_key_statement(&key("tags", schema)).render();
        assert!(rendered.contains(".dataType(String[].class)"));
    }

    #[test]
    fn test_script_keeps_order() {
        let script = property_key_script(&[
            key("b", PropertySchema::string()),
            key("a", PropertySchema::of(PropertyKind::Date)),
        ]);
        assert_eq!(script.len(), 2);
        let rendered = script.render();
        assert!(rendered.find("'b'").unwrap() < rendered.find("'a'").unwrap());
        assert!(rendered.contains("\n\n"));
    }
}
