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


//! Groovy query templates used while reverse engineering.
//!
//! Every template is a pure function of the traversal source and its
//! arguments. Label names are interpolated as single-quoted literals.
//! Management queries return lists of named maps so that results decode
//! into the row types of [`super::rows`].

use crate::script::quote_single;

/// Graph element kind addressed by a data query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    /// Vertices, `V()`.
    Vertex,
    /// Edges, `E()`.
    Edge,
}

impl Element {
    /// The traversal step.
    pub fn step(self) -> &'static str {
        match self {
            Element::Vertex => "V",
            Element::Edge => "E",
        }
    }
}

/// Count all vertices; used to test a connection.
pub fn test_connection(ts: &str) -> String {
    format!("{}.V().count()", ts)
}

/// Vertex label names declared in the schema.
pub fn vertex_labels_from_schema(ts: &str) -> String {
    format!(
        "{}.getGraph().openManagement().getVertexLabels().collect{{label -> label.name()}}",
        ts
    )
}

/// Vertex label names present in the data.
pub fn vertex_labels_from_data(ts: &str) -> String {
    format!("{}.V().label().dedup().toList()", ts)
}

/// Connections of an edge label observed in the data.
pub fn edge_connections_from_data(ts: &str, edge_label: &str, limit: u64) -> String {
    let label = quote_single(edge_label);
    format!(
        "{ts}.\n    E().hasLabel({label}).\n    limit({limit}).\n    collect{{edge -> [\n        \"relationship\": {label},\n        \"start\": edge.outVertex().label(),\n        \"end\": edge.inVertex().label()\n    ]}}.\n    unique()",
        ts = ts,
        label = label,
        limit = limit
    )
}

/// Connections of an edge label declared in the schema.
pub fn edge_connections_from_schema(ts: &str, edge_label: &str) -> String {
    let label = quote_single(edge_label);
    format!(
        "{ts}.\n    getGraph().\n    openManagement().\n    getEdgeLabel({label}).\n    mappedConnections().\n    collect{{connection -> [\n        \"relationship\": {label},\n        \"start\": connection.getOutgoingVertexLabel().name(),\n        \"end\": connection.getIncomingVertexLabel().name()\n    ]}}.\n    unique()",
        ts = ts,
        label = label
    )
}

/// Sample vertex documents including id and label.
pub fn node_documents(ts: &str, label: &str, limit: u64) -> String {
    format!(
        "{}.V().hasLabel({}).limit({}).valueMap(true).toList()",
        ts,
        quote_single(label),
        limit
    )
}

/// Sample edge documents between two vertex labels.
pub fn relationship_documents(ts: &str, relationship: &str, start: &str, end: &str, limit: u64) -> String {
    format!(
        "{}.E().hasLabel({}).where(and(\n        outV().label().is(eq({})),\n        inV().label().is(eq({})))\n    ).limit({}).valueMap(true).toList()",
        ts,
        quote_single(relationship),
        quote_single(start),
        quote_single(end),
        limit
    )
}

/// Number of vertices with a label.
pub fn node_count(ts: &str, label: &str) -> String {
    format!("{}.V().hasLabel({}).count().next()", ts, quote_single(label))
}

/// Number of edges of a label between two vertex labels.
pub fn relationship_count(ts: &str, relationship: &str, start: &str, end: &str) -> String {
    format!(
        "{}.E().hasLabel({}).where(and(\n        outV().label().is(eq({})),\n        inV().label().is(eq({})))\n    ).count().next()",
        ts,
        quote_single(relationship),
        quote_single(start),
        quote_single(end)
    )
}

fn graph_indexes(ts: &str, class: &str) -> String {
    format!(
        "{ts}.\n    getGraph().\n    openManagement().\n    getGraphIndexes({class}).\n    collect{{index -> [\n        \"name\": index.name(),\n        \"unique\": index.isUnique(),\n        \"backingIndex\": index.getBackingIndex(),\n        \"compositeIndex\": index.isCompositeIndex(),\n        \"mixedIndex\": index.isMixedIndex(),\n        \"keys\": index.getFieldKeys().collect{{field -> [\n            \"name\": field.name(),\n            \"parameters\": index.getParametersFor(field).collectEntries{{p -> [(p.key()): p.value().toString()]}}\n        ]}}\n    ]}}",
        ts = ts,
        class = class
    )
}

/// Graph indexes over vertices.
pub fn vertex_indexes(ts: &str) -> String {
    graph_indexes(ts, "Vertex.class")
}

/// Graph indexes over edges.
pub fn edge_indexes(ts: &str) -> String {
    graph_indexes(ts, "Edge.class")
}

/// Vertex-centric indexes of every relation type.
pub fn relation_indexes(ts: &str) -> String {
    format!(
        "relationMgmt = {ts}.getGraph().openManagement();\n\nrelationMgmt.\n    getRelationTypes(RelationType.class).\n    collectMany{{rt -> relationMgmt.getRelationIndexes(rt).toList()}}.\n    collect{{ri -> [\n        \"name\": ri.name(),\n        \"edgeLabel\": ri.getType().name(),\n        \"direction\": ri.getDirection().name(),\n        \"sortOrder\": ri.getSortOrder().toString(),\n        \"status\": ri.getIndexStatus().name(),\n        \"sortKeys\": ri.getSortKey().collect{{key -> key.name()}}\n    ]}}",
        ts = ts
    )
}

/// The graph feature report.
pub fn features(ts: &str) -> String {
    format!("{}.getGraph().features()", ts)
}

/// Graph variables as a map.
pub fn variables(ts: &str) -> String {
    format!("{}.getGraph().variables().asMap()", ts)
}

/// Wrap a query so that its result is returned as GraphSON v3 text.
pub fn graphson(query: &str) -> String {
    format!(
        "GraphSONMapper.\n    build().\n    typeInfo(org.apache.tinkerpop.gremlin.structure.io.graphson.TypeInfo.PARTIAL_TYPES).\n    addCustomModule(org.apache.tinkerpop.gremlin.structure.io.graphson.GraphSONXModuleV2d0.build().create(false)).\n    version(GraphSONVersion.V3_0).\n    addRegistry(JanusGraphIoRegistry.instance()).\n    create().\n    createMapper().\n    writeValueAsString({})",
        query
    )
}

/// Property value maps of sampled elements.
pub fn data_query(ts: &str, element: Element, label: &str, limit: u64) -> String {
    format!(
        "{}.{}().hasLabel({}).limit({}).valueMap().toList()",
        ts,
        element.step(),
        quote_single(label),
        limit
    )
}

/// Distinct property keys of sampled elements, sorted.
pub fn template_keys(ts: &str, element: Element, label: &str, limit: u64) -> String {
    format!(
        "{}.{}().hasLabel({}).limit({}).properties().key().order().dedup().toList()",
        ts,
        element.step(),
        quote_single(label),
        limit
    )
}

/// Meta-properties of sampled vertex properties.
pub fn meta_properties(ts: &str, label: &str, limit: u64) -> String {
    format!(
        "{}.\n    V().\n    hasLabel({}).\n    limit({}).\n    properties().\n    as('properties').\n    as('metaProperties').\n    select('properties','metaProperties').\n    by(label).\n    by(valueMap()).\n    dedup().\n    toList()",
        ts,
        quote_single(label),
        limit
    )
}

/// Every edge label with its settings.
pub fn edge_labels(ts: &str) -> String {
    format!(
        "{}.\n    getGraph().\n    openManagement().\n    getRelationTypes(EdgeLabel.class).\n    collect{{relation -> [\n        \"name\": relation.name(),\n        \"isUnidirected\": relation.isUnidirected(),\n        \"multiplicity\": relation.multiplicity().name(),\n        \"edgeTTL\": relation.getTTL().getSeconds(),\n        \"properties\": relation.mappedProperties().collect{{item -> item.name()}}\n    ]}}",
        ts
    )
}

/// Every property key with its settings.
pub fn property_keys(ts: &str) -> String {
    format!(
        "{}.\n    getGraph().\n    openManagement().\n    getRelationTypes(PropertyKey.class).\n    collect{{propertyKey -> [\n        \"name\": propertyKey.name(),\n        \"cardinality\": propertyKey.cardinality().convert().name(),\n        \"dataType\": propertyKey.dataType().getName(),\n        \"TTL\": propertyKey.getTTL().getSeconds()\n    ]}}",
        ts
    )
}

/// Settings of one vertex label.
pub fn vertex_label_data(ts: &str, label: &str) -> String {
    format!(
        "vertexLabel = {}.\n    getGraph().\n    openManagement().\n    getVertexLabel({})\n\n[\n    \"staticVertex\": vertexLabel.isStatic(),\n    \"ttl\": vertexLabel.getTTL().getSeconds(),\n    \"properties\": vertexLabel.mappedProperties().collect{{item -> item.name()}}\n]",
        ts,
        quote_single(label)
    )
}

/// The management system's schema printout.
pub fn print_schema(ts: &str) -> String {
    format!("{}.getGraph().openManagement().printSchema()", ts)
}

/// Key and value of every configuration entry of the graph.
pub fn graph_configuration(ts: &str) -> String {
    format!(
        "cnfg = {}.getGraph().configuration();\ncnfg.getKeys().collect{{item -> [\"key\": item, \"value\": cnfg.getProperty(item)]}}",
        ts
    )
}

/// Check that a graph is registered with the graph manager.
pub fn check_manager_traversal(graph_name: &str) -> String {
    format!("{}.V().limit(1); 1", manager_traversal(graph_name))
}

/// The graph manager's traversal source for a graph.
pub fn manager_traversal(graph_name: &str) -> String {
    format!(
        "org.janusgraph.graphdb.management.JanusGraphManager.getInstance().getGraph({}).traversal()",
        quote_single(graph_name)
    )
}

/// Check that a graph can be opened with `ConfiguredGraphFactory`.
pub fn check_configured_traversal(graph_name: &str) -> String {
    format!("{}.V().limit(1); 1", configured_traversal(graph_name))
}

/// The `ConfiguredGraphFactory` traversal source for a graph.
pub fn configured_traversal(graph_name: &str) -> String {
    format!("ConfiguredGraphFactory.open({}).traversal()", quote_single(graph_name))
}

/// The traversal source bound to a graph variable of the server.
pub fn bound_traversal(graph_name: &str) -> String {
    format!("{}.traversal()", graph_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_quoted() {
        assert_eq!(
            node_count("g", "it's"),
            "g.V().hasLabel('it\\'s').count().next()"
        );
        assert_eq!(
            data_query("g", Element::Edge, "knows", 5),
            "g.E().hasLabel('knows').limit(5).valueMap().toList()"
        );
    }

    #[test]
    fn test_traversal_checks() {
        assert_eq!(
            check_configured_traversal("social"),
            "ConfiguredGraphFactory.open('social').traversal().V().limit(1); 1"
        );
        assert!(check_manager_traversal("social")
            .starts_with("org.janusgraph.graphdb.management.JanusGraphManager.getInstance().getGraph('social')"));
        assert_eq!(bound_traversal("social"), "social.traversal()");
    }

    #[test]
    fn test_graphson_wrapper() {
        let wrapped = graphson(&data_query("g", Element::Vertex, "Person", 10));
        assert!(wrapped.starts_with("GraphSONMapper."));
        assert!(wrapped.ends_with("writeValueAsString(g.V().hasLabel('Person').limit(10).valueMap().toList())"));
    }

    #[test]
    fn test_named_maps() {
        assert!(vertex_indexes("g").contains("getGraphIndexes(Vertex.class)"));
        assert!(edge_indexes("g").contains("\"backingIndex\": index.getBackingIndex()"));
        assert!(relation_indexes("g").contains("\"sortKeys\""));
        assert!(edge_connections_from_schema("g", "knows").contains("getEdgeLabel('knows')"));
        assert_eq!(test_connection("t"), "t.V().count()");
    }
}
