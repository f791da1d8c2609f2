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


//! Management-API script generators.
//!
//! Every generator here is a pure function of resolved definitions. The
//! shared helpers below produce the lines that several generators emit.

pub mod graph;
pub mod indexes;
pub mod labels;
pub mod property_keys;

pub use graph::{bootstrap_statement, prepare_configurations};
pub use indexes::{index_creation_script, live_index_script};
pub use labels::{edge_label_script, edge_label_statement, vertex_label_script, vertex_label_statement};
pub use property_keys::{property_key_script, property_key_statement};

use crate::script::quote_single;
use janusforge_core::Ttl;

/// Variable holding the open management transaction.
pub const MANAGEMENT: &str = "mgmt";

/// Open a management transaction on the traversal source's graph.
pub fn open_management(traversal_source: &str) -> String {
    format!("{} = {}.getGraph().openManagement()", MANAGEMENT, traversal_source)
}

/// Commit the open management transaction.
pub fn commit_management() -> String {
    format!("{}.commit()", MANAGEMENT)
}

/// Wrap a script body in an open/commit management block.
pub fn management_block(traversal_source: &str, body: &str) -> String {
    format!(
        "{}\n{}\n{}",
        open_management(traversal_source),
        body,
        commit_management()
    )
}

/// Roll back any transaction left open on the traversal source.
pub fn rollback(traversal_source: &str) -> String {
    format!("{}.tx().rollback()", traversal_source)
}

/// `mgmt.setTTL(...)` for an element, when the TTL is positive.
pub fn ttl_line(element: &str, ttl: Option<Ttl>) -> Option<String> {
    let ttl = ttl.filter(Ttl::is_active)?;
    Some(format!(
        "{}.setTTL({}, Duration.{}({}))",
        MANAGEMENT,
        element,
        ttl.unit.duration_factory(),
        ttl.value
    ))
}

/// `mgmt.addProperties(...)` for a label, omitted without properties.
pub fn add_properties_line(label: &str, properties: &[String]) -> Option<String> {
    if properties.is_empty() {
        return None;
    }
    Some(format!(
        "{}.addProperties({}, {})",
        MANAGEMENT,
        label,
        properties.join(", ")
    ))
}

/// Bind a variable to an existing property key.
pub fn get_property_key(name: &str) -> String {
    format!("{} = {}.getPropertyKey({})", name, MANAGEMENT, quote_single(name))
}

/// Bind a variable to an existing vertex label.
pub fn get_vertex_label(name: &str) -> String {
    format!("{} = {}.getVertexLabel({})", name, MANAGEMENT, quote_single(name))
}

/// Bind a variable to an existing edge label.
pub fn get_edge_label(name: &str) -> String {
    format!("{} = {}.getEdgeLabel({})", name, MANAGEMENT, quote_single(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use janusforge_core::TtlUnit;

    #[test]
    fn test_management_block() {
        assert_eq!(
            management_block("g", "x = 1"),
            "mgmt = g.getGraph().openManagement()\nx = 1\nmgmt.commit()"
        );
    }

    #[test]
    fn test_ttl_line() {
        assert_eq!(
            ttl_line("Person", Some(Ttl::new(3, TtlUnit::Days))).as_deref(),
            Some("mgmt.setTTL(Person, Duration.ofDays(3))")
        );
        assert_eq!(ttl_line("Person", Some(Ttl::seconds(0))), None);
        assert_eq!(ttl_line("Person", None), None);
    }

    #[test]
    fn test_add_properties_line() {
        let props = vec!["name".to_string(), "age".to_string()];
        assert_eq!(
            add_properties_line("Person", &props).as_deref(),
            Some("mgmt.addProperties(Person, name, age)")
        );
        assert_eq!(add_properties_line("Person", &[]), None);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(get_property_key("name"), "name = mgmt.getPropertyKey('name')");
        assert_eq!(get_vertex_label("Person"), "Person = mgmt.getVertexLabel('Person')");
        assert_eq!(get_edge_label("knows"), "knows = mgmt.getEdgeLabel('knows')");
    }
}
