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


//! A connected graph together with its resolved traversal source.

use super::client::{GraphClient, ResultSet};
use super::queries;
use crate::config::SamplingConfig;
use crate::error::{GremlinError, Result};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How the traversal source of a named graph is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalLookup {
    /// Through `JanusGraphManager`.
    #[default]
    GraphManager,
    /// Through `ConfiguredGraphFactory`.
    ConfiguredFactory,
}

impl TraversalLookup {
    fn check_script(self, graph_name: &str) -> String {
        match self {
            TraversalLookup::GraphManager => queries::check_manager_traversal(graph_name),
            TraversalLookup::ConfiguredFactory => queries::check_configured_traversal(graph_name),
        }
    }

    fn expression(self, graph_name: &str) -> String {
        match self {
            TraversalLookup::GraphManager => queries::manager_traversal(graph_name),
            TraversalLookup::ConfiguredFactory => queries::configured_traversal(graph_name),
        }
    }
}

/// A client bound to one traversal source.
///
/// Every query of a reverse-engineering run goes through [`Session::submit`],
/// which applies the configured query timeout.
#[derive(Clone)]
pub struct Session {
    client: Arc<dyn GraphClient>,
    traversal_source: String,
    query_timeout: Option<Duration>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("traversal_source", &self.traversal_source)
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session over a known traversal source.
    pub fn new(client: Arc<dyn GraphClient>, traversal_source: impl Into<String>) -> Self {
        Self {
            client,
            traversal_source: traversal_source.into(),
            query_timeout: None,
        }
    }

    /// Bound every query of this session.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Resolve the traversal source of `graph_name` through the graph manager.
    pub async fn connect(
        client: Arc<dyn GraphClient>,
        graph_name: &str,
        config: &SamplingConfig,
    ) -> Result<Self> {
        Self::connect_with(client, graph_name, TraversalLookup::default(), config).await
    }

    /// Resolve the traversal source of `graph_name`.
    ///
    /// When the lookup script fails, the graph is assumed to be bound as a
    /// server variable and `<graph_name>.traversal()` is used. Transport
    /// failures are returned.
    pub async fn connect_with(
        client: Arc<dyn GraphClient>,
        graph_name: &str,
        lookup: TraversalLookup,
        config: &SamplingConfig,
    ) -> Result<Self> {
        let probe = Self::new(client, String::new()).with_query_timeout(config.query_timeout);
        let traversal_source = match probe.submit(&lookup.check_script(graph_name)).await {
            Ok(_) => lookup.expression(graph_name),
            Err(err) if err.is_connection() => return Err(err),
            Err(err) => {
                warn!(graph = graph_name, error = %err, "traversal lookup failed, using bound graph");
                queries::bound_traversal(graph_name)
            }
        };
        debug!(traversal_source = %traversal_source, "resolved traversal source");
        Ok(Self {
            traversal_source,
            ..probe
        })
    }

    /// The traversal source expression every template is built on.
    pub fn traversal_source(&self) -> &str {
        &self.traversal_source
    }

    /// The configured query timeout.
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout
    }

    /// Submit a script.
    pub async fn submit(&self, query: &str) -> Result<ResultSet> {
        debug!(query, "submitting query");
        match self.query_timeout {
            Some(after) => tokio::time::timeout(after, self.client.submit(query))
                .await
                .map_err(|_| GremlinError::Timeout {
                    query: query.to_string(),
                    after,
                })?,
            None => self.client.submit(query).await,
        }
    }

    /// Submit a script and return its first item, or `null`.
    pub async fn submit_first(&self, query: &str) -> Result<Value> {
        Ok(self.submit(query).await?.first().cloned().unwrap_or(Value::Null))
    }

    /// Count the vertices of the graph.
    pub async fn test_connection(&self) -> Result<u64> {
        let query = queries::test_connection(&self.traversal_source);
        let first = self.submit_first(&query).await?;
        count_from_value(&first).ok_or_else(|| GremlinError::UnexpectedResult {
            query,
            reason: format!("expected a count, got {}", first),
        })
    }
}

/// Read a count that may arrive plain or GraphSON-tagged.
pub fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::Object(map) => map.get("@value").and_then(count_from_value),
        Value::Array(items) => items.first().and_then(count_from_value),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
