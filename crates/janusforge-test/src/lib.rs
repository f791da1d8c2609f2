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


//! Shared test fixtures for janusforge crates.
//!
//! - [`fixtures`]: model payloads covering labels, edges, indexes and samples
//! - [`graphson`]: builders for GraphSON v3 values and canned server payloads
//! - [`mock`]: a scripted [`GraphClient`](janusforge_gremlin::GraphClient)
//!
//! # Quick Start
//!
//! ```rust
//! use janusforge_test::{fixtures, mock::MockClient};
//!
//! let model = fixtures::people();
//! assert_eq!(model.vertices[0].label(), "Person");
//!
//! let client = MockClient::new().respond("V().count()", vec![serde_json::json!(3)]);
//! assert_eq!(client.submitted().len(), 0);
//! ```

use janusforge_core::GraphModel;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> GraphModel)>;

/// Model fixtures.
pub mod fixtures;

/// GraphSON builders and payloads.
pub mod graphson;

/// Scripted graph client.
pub mod mock;

pub use fixtures::*;
pub use mock::MockClient;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_fixtures_parse() {
        for (name, fixture_fn) in fixtures::all() {
            let model = fixture_fn();
            assert!(!model.vertices.is_empty(), "fixture {} has no vertices", name);
        }
    }

    #[test]
    fn test_people_fixture() {
        let model = fixtures::people();
        assert_eq!(model.relationships[0].label(), "knows");
        assert_eq!(model.indexes.composite_indexes.len(), 1);
    }
}
