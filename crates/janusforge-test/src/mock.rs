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


//! A scripted graph client.
//!
//! Responses are matched by query substring, first rule wins. Queries that
//! match no rule return an empty result set.

use async_trait::async_trait;
use janusforge_gremlin::{GraphClient, GremlinError, ResultSet, Result};
use serde_json::Value;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Items(Vec<Value>),
    Engine(String),
    Connection(String),
}

/// A [`GraphClient`] answering from a list of rules.
#[derive(Debug, Default)]
pub struct MockClient {
    rules: Vec<(String, Reply)>,
    submitted: Mutex<Vec<String>>,
}

impl MockClient {
    /// A client without rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `fragment` with `items`.
    pub fn respond(mut self, fragment: impl Into<String>, items: Vec<Value>) -> Self {
        self.rules.push((fragment.into(), Reply::Items(items)));
        self
    }

    /// Fail queries containing `fragment` with a server error.
    pub fn fail(mut self, fragment: impl Into<String>, message: impl Into<String>) -> Self {
        self.rules.push((fragment.into(), Reply::Engine(message.into())));
        self
    }

    /// Fail queries containing `fragment` with a transport error.
    pub fn disconnect(mut self, fragment: impl Into<String>) -> Self {
        self.rules
            .push((fragment.into(), Reply::Connection("connection reset".into())));
        self
    }

    /// Every query submitted so far, in order.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl GraphClient for MockClient {
    async fn submit(&self, query: &str) -> Result<ResultSet> {
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(query.to_string());
        }
        let reply = self
            .rules
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, reply)| reply.clone());
        match reply {
            Some(Reply::Items(items)) => Ok(ResultSet::new(items)),
            Some(Reply::Engine(message)) => Err(GremlinError::engine(message)),
            Some(Reply::Connection(message)) => Err(GremlinError::Connection(message)),
            None => Ok(ResultSet::default()),
        }
    }
}
