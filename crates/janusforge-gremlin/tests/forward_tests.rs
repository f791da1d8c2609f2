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

//! Model to script conversion over the shared fixtures.

use janusforge_gremlin::{
    sample_data_script, schema_script, to_gremlin, GremlinError, GremlinOutput, ToGremlinConfig,
};
use janusforge_test::fixtures;

fn position(script: &str, needle: &str) -> usize {
    script
        .find(needle)
        .unwrap_or_else(|| panic!("'{}' not found in:\n{}", needle, script))
}

#[test]
fn test_people_statement_order() {
    let script = schema_script(&fixtures::people(), &ToGremlinConfig::default()).unwrap();

    let key = position(&script, "name = mgmt.makePropertyKey('name').dataType(String.class)");
    let label = position(&script, "Person = mgmt.makeVertexLabel('Person').make()");
    let edge = position(&script, "knows = mgmt.makeEdgeLabel('knows').multiplicity(MULTI)");
    let connection = position(&script, "mgmt.addConnection(knows, Person, Person)");
    let index = position(&script, "mgmt.buildIndex('byName', Vertex.class)");
    let commit = position(&script, "mgmt.commit()");

    assert!(key < label);
    assert!(label < edge);
    assert!(edge < connection);
    assert!(connection < index);
    assert!(index < commit);
    assert!(script.contains(".addKey(name).unique().buildCompositeIndex()"));
}

#[test]
fn test_people_bidirectional_edge_is_not_unidirected() {
    let script = schema_script(&fixtures::people(), &ToGremlinConfig::default()).unwrap();
    let line = script
        .lines()
        .find(|l| l.contains("makeEdgeLabel('knows')"))
        .unwrap();
    assert!(!line.contains("unidirected"));
    assert!(line.ends_with(".make()"));
}

#[test]
fn test_typed_simple_unidirected_edge() {
    let script = schema_script(&fixtures::typed(), &ToGremlinConfig::default()).unwrap();
    assert!(script.contains(
        "located_in = mgmt.makeEdgeLabel('located_in').multiplicity(SIMPLE).unidirected().make()"
    ));
    assert!(script.contains("mgmt.addConnection(located_in, City, Country)"));
}

#[test]
fn test_typed_labels_and_ttl() {
    let script = schema_script(&fixtures::typed(), &ToGremlinConfig::default()).unwrap();
    assert!(script.contains("City = mgmt.makeVertexLabel('City').make()"));
    assert!(script.contains("Country = mgmt.makeVertexLabel('Country').setStatic().make()"));
    assert!(script.contains("mgmt.setTTL(Country, Duration.ofDays(2))"));
    assert!(!script.contains("mgmt.setTTL(City"));
}

#[test]
fn test_typed_indexes() {
    let script = schema_script(&fixtures::typed(), &ToGremlinConfig::default()).unwrap();

    let composite = script
        .lines()
        .find(|l| l.starts_with("mgmt.buildIndex('cityByName', Vertex.class)"))
        .unwrap();
    assert!(composite.ends_with(".addKey(name).buildCompositeIndex()"));
    assert!(!composite.contains(".unique()"));

    let mixed = script
        .lines()
        .find(|l| l.starts_with("mgmt.buildIndex('citySearch', Vertex.class)"))
        .unwrap();
    assert!(mixed.contains(".addKey(name, Mapping.TEXTSTRING.asParameter())"));
    assert!(mixed.ends_with(".buildMixedIndex(\"search\")"));

    assert!(script.contains("mgmt.buildEdgeIndex(located_in, 'bySince', Direction.BOTH, Order.desc, since)"));
    assert!(script.find("buildCompositeIndex").unwrap() < script.find("buildMixedIndex").unwrap());
    assert!(script.find("buildMixedIndex").unwrap() < script.find("buildEdgeIndex").unwrap());
}

#[test]
fn test_typed_bootstrap_uses_traversal_source() {
    let script = schema_script(&fixtures::typed(), &ToGremlinConfig::default()).unwrap();
    assert!(script.contains("atlas_g = JanusGraphFactory.open(conf).traversal();"));
    assert!(script.contains("mgmt = atlas_g.getGraph().openManagement()"));

    let existing = ToGremlinConfig::default().with_existing_graph();
    let script = schema_script(&fixtures::typed(), &existing).unwrap();
    assert!(script.starts_with("atlas_g = atlas.traversal()"));
}

#[test]
fn test_typed_sample_literals() {
    let script = sample_data_script(&fixtures::typed()).unwrap();
    assert!(script.contains("City = atlas_g.getGraph().addVertex(\"City\");"));
    assert!(script.contains("City.property(\"population\", 2900000l)"));
    assert!(script.contains("City.property(\"area\", 3d)"));
    assert!(script.contains("Geoshape.point(35.4,48.9)"));
    assert!(script.contains("located_in = City.\n    addEdge(\"located_in\", Country);"));
    assert!(script.ends_with("atlas_g.tx().commit();"));
}

#[test]
fn test_dangling_edge_is_skipped() {
    let script = schema_script(&fixtures::dangling_edge(), &ToGremlinConfig::default()).unwrap();
    assert!(script.contains("makeVertexLabel('Person')"));
    assert!(!script.contains("likes"));

    let strict = ToGremlinConfig::default().with_strict_references();
    let err = schema_script(&fixtures::dangling_edge(), &strict).unwrap_err();
    assert!(matches!(err, GremlinError::UnresolvedReference { .. }));
}

#[test]
fn test_configured_factory_bootstrap() {
    let script = schema_script(&fixtures::configured_factory(), &ToGremlinConfig::default()).unwrap();
    assert!(script.starts_with("conf = new HashMap();\nconf.put(\"storage.backend\", \"cql\");"));
    assert!(script.contains("ConfiguredGraphFactory.createConfiguration(new MapConfiguration(conf));"));
    assert!(script.contains("g = ConfiguredGraphFactory.create(\"store\").traversal();"));

    let sample = sample_data_script(&fixtures::configured_factory()).unwrap();
    assert!(sample.contains("variables().set(\"owner\", \"ops\");"));
}

#[test]
fn test_live_profile_orchestrates_indexes() {
    let config = ToGremlinConfig::for_live_apply();
    let script = schema_script(&fixtures::typed(), &config).unwrap();
    let commit = position(&script, "mgmt.commit()");
    assert!(commit < position(&script, "buildCompositeIndex()"));
    assert!(script.contains("awaitGraphIndexStatus(atlas_g.getGraph(), 'cityByName')"));
    assert!(script.contains("awaitGraphIndexStatus(atlas_g.getGraph(), 'citySearch')"));
    assert!(script.contains("SchemaAction.REINDEX"));
}

#[test]
fn test_every_fixture_converts() {
    for (name, fixture) in fixtures::all() {
        let output = to_gremlin(&fixture(), &ToGremlinConfig::default())
            .unwrap_or_else(|e| panic!("fixture {} failed: {}", name, e));
        match output {
            GremlinOutput::Sections(sections) => {
                assert_eq!(sections.len(), 2, "fixture {}", name);
                assert!(sections[0].script.contains("openManagement()"), "fixture {}", name);
            }
            GremlinOutput::Combined(_) => panic!("fixture {} produced combined output", name),
        }
    }
}
