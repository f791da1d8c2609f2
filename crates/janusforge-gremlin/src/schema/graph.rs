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


//! Graph creation and opening.

use crate::config::GraphBootstrap;
use crate::script::{quote_double, GremlinStatement, StatementKind};
use janusforge_core::{GraphConfiguration, GraphMetadata};
use serde_json::Value;
use std::collections::HashSet;

/// Configuration key naming the graph.
pub const GRAPH_NAME_KEY: &str = "graph.graphname";

/// Configuration key for the default schema maker.
pub const SCHEMA_DEFAULT_KEY: &str = "schema.default";

/// Configuration key enabling schema constraints.
pub const SCHEMA_CONSTRAINTS_KEY: &str = "schema.constraints";

/// Value of `schema.default` when none is declared.
pub const DEFAULT_SCHEMA_MAKER: &str = "default";

/// The configuration entries emitted when creating the graph.
///
/// Empty unless `useConfiguration` is set. Declared entries come first,
/// followed by the graph name, the schema default and the constraints flag.
/// The first entry for a key wins.
pub fn prepare_configurations(graph: &GraphMetadata) -> Vec<GraphConfiguration> {
    if !graph.use_configuration {
        return Vec::new();
    }

    let mut entries = graph.graph_configurations.clone();
    entries.push(GraphConfiguration::new(GRAPH_NAME_KEY, graph.graph_name()));
    entries.push(GraphConfiguration::new(
        SCHEMA_DEFAULT_KEY,
        graph
            .schema_default
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEMA_MAKER.to_string()),
    ));
    if graph.schema_constraints {
        entries.push(GraphConfiguration::new(SCHEMA_CONSTRAINTS_KEY, Value::Bool(true)));
    }

    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.key.clone()));
    entries
}

fn configured_factory_creation(graph: &GraphMetadata, traversal_source: &str) -> Vec<String> {
    let configurations = prepare_configurations(graph);
    let mut lines = Vec::new();
    if !configurations.is_empty() {
        lines.push("conf = new HashMap();".to_string());
        lines.extend(configurations.iter().map(|c| {
            format!(
                "conf.put({}, {});",
                quote_double(&c.key),
                quote_double(&c.value_text())
            )
        }));
        lines.push("ConfiguredGraphFactory.createConfiguration(new MapConfiguration(conf));".to_string());
    }
    lines.push(format!(
        "{} = ConfiguredGraphFactory.create({}).traversal();",
        traversal_source,
        quote_double(&graph.graph_name())
    ));
    lines
}

fn janus_factory_creation(graph: &GraphMetadata, traversal_source: &str) -> Vec<String> {
    let mut lines = vec!["conf = new BaseConfiguration();".to_string()];
    lines.extend(prepare_configurations(graph).iter().map(|c| {
        format!(
            "conf.setProperty({}, {});",
            quote_double(&c.key),
            quote_double(&c.value_text())
        )
    }));
    lines.push(format!(
        "{} = JanusGraphFactory.open(conf).traversal();",
        traversal_source
    ));
    lines
}

/// The statement that creates or opens the graph and binds the traversal source.
pub fn bootstrap_statement(graph: &GraphMetadata, bootstrap: GraphBootstrap) -> GremlinStatement {
    let traversal_source = graph.traversal_source();
    let lines = match (bootstrap, graph.uses_configured_factory()) {
        (GraphBootstrap::OpenExisting, true) => vec![format!(
            "{} = ConfiguredGraphFactory.open({}).traversal()",
            traversal_source,
            quote_double(&graph.graph_name())
        )],
        (GraphBootstrap::OpenExisting, false) => vec![format!(
            "{} = {}.traversal()",
            traversal_source,
            graph.graph_name()
        )],
        (GraphBootstrap::CreateGraph, true) => configured_factory_creation(graph, &traversal_source),
        (GraphBootstrap::CreateGraph, false) => janus_factory_creation(graph, &traversal_source),
    };

    GremlinStatement {
        kind: StatementKind::Bootstrap,
        lines,
    }
}
