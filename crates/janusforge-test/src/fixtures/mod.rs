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


//! Model fixtures.
//!
//! Every fixture is built from a JSON payload shaped like the one the
//! modeling tool hands over, so the same text can be written to disk for
//! CLI tests with [`people_json`] and friends.

use crate::FixtureList;
use janusforge_core::GraphModel;
use serde_json::{json, Value};

fn parse(value: &Value) -> GraphModel {
    GraphModel::from_json(&value.to_string()).expect("fixture model must parse")
}

/// One vertex `Person{name}`, a bidirectional `knows` edge and a unique
/// composite index on `name`.
pub fn people_json() -> Value {
    json!({
        "collections": [{
            "GUID": "person",
            "collectionName": "Person",
            "properties": {"name": {"type": "string"}}
        }],
        "relationships": [{
            "GUID": "knows",
            "name": "knows",
            "parentCollection": "person",
            "childCollection": "person",
            "multiplicity": "MULTI",
            "biDirectional": true
        }],
        "containerData": [
            {"name": "people", "traversalSource": "g"},
            {"compositeIndexes": [{
                "name": "byName",
                "unique": true,
                "indexKey": [{"name": "name", "path": ["person"]}]
            }]}
        ],
        "jsonData": {"person": {"name": "Ada"}}
    })
}

/// See [`people_json`].
pub fn people() -> GraphModel {
    parse(&people_json())
}

/// Typed properties, a simple unidirected edge, every index kind and
/// embedded samples.
pub fn typed_json() -> Value {
    json!({
        "collections": [
            {
                "GUID": "city",
                "collectionName": "City",
                "properties": {
                    "name": {"type": "string"},
                    "population": {"type": "number", "mode": "long"},
                    "area": {"type": "number", "mode": "double"},
                    "founded": {"type": "date"},
                    "location": {"type": "geoshape", "subType": "point", "properties": {
                        "coordinates": {"type": "list", "items": [
                            {"type": "number", "sample": 35.4},
                            {"type": "number", "sample": 48.9}
                        ]}
                    }}
                }
            },
            {
                "GUID": "country",
                "code": "Country",
                "staticVertex": true,
                "vertexTTL": {"TTLValue": 2, "TTLUnit": "Days"},
                "properties": {
                    "tags": {"type": "list", "subtype": "list<str>", "items": [{"type": "string"}]}
                }
            }
        ],
        "relationships": [{
            "GUID": "in",
            "name": "located in",
            "parentCollection": "city",
            "childCollection": "country",
            "multiplicity": "SIMPLE",
            "biDirectional": false,
            "properties": {"since": {"type": "number", "mode": "integer"}}
        }],
        "containerData": [
            {"code": "atlas", "traversalSource": "atlas_g"},
            {
                "compositeIndexes": [{
                    "name": "cityByName",
                    "indexKey": [{"name": "name", "path": ["city"]}]
                }],
                "mixedIndexes": [{
                    "name": "citySearch",
                    "indexingBackend": "search",
                    "indexKey": [
                        {"name": "name", "path": ["city"], "type": "TEXTSTRING"},
                        {"name": "area", "path": ["city"]}
                    ]
                }],
                "vertexCentricIndexes": [{
                    "name": "bySince",
                    "indexKey": [{"name": "since", "path": ["in"]}],
                    "direction": "BOTH",
                    "order": "desc"
                }]
            }
        ],
        "jsonData": {
            "city": "{\"name\": \"Kyiv\", \"population\": 2900000, \"area\": 3, \"founded\": \"0482-01-01\"}",
            "country": {"tags": ["eu", "east"]},
            "in": {"since": 1991}
        }
    })
}

/// See [`typed_json`].
pub fn typed() -> GraphModel {
    parse(&typed_json())
}

/// An edge whose child endpoint does not exist.
pub fn dangling_edge() -> GraphModel {
    parse(&json!({
        "collections": [{"GUID": "person", "collectionName": "Person"}],
        "relationships": [{
            "GUID": "likes",
            "name": "likes",
            "parentCollection": "person",
            "childCollection": "missing",
            "multiplicity": "SIMPLE"
        }]
    }))
}

/// A graph created through `ConfiguredGraphFactory` with configurations
/// and variables.
pub fn configured_factory() -> GraphModel {
    parse(&json!({
        "collections": [{"GUID": "item", "collectionName": "Item",
                         "properties": {"sku": {"type": "string"}}}],
        "containerData": [{
            "name": "store",
            "graphFactory": "ConfiguredGraphFactory",
            "useConfiguration": true,
            "graphConfigurations": [
                {"graphConfigurationKey": "storage.backend", "graphConfigurationValue": "cql"}
            ],
            "graphVariables": [
                {"graphVariableKey": "owner", "GraphVariableValue": "ops"}
            ]
        }]
    }))
}

/// Returns all fixture functions for iteration.
pub fn all() -> FixtureList {
    vec![
        ("people", people),
        ("typed", typed),
        ("dangling_edge", dangling_edge),
        ("configured_factory", configured_factory),
    ]
}
