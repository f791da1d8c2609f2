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


//! The seam to a Gremlin server.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The results of one submitted script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet(Vec<Value>);

impl ResultSet {
    /// Wrap result items.
    pub fn new(items: Vec<Value>) -> Self {
        Self(items)
    }

    /// A result set holding one item.
    pub fn single(item: Value) -> Self {
        Self(vec![item])
    }

    /// All items.
    pub fn to_array(&self) -> &[Value] {
        &self.0
    }

    /// Take ownership of the items.
    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    /// The first item, if any.
    pub fn first(&self) -> Option<&Value> {
        self.0.first()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no item was returned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for ResultSet {
    fn from(items: Vec<Value>) -> Self {
        Self(items)
    }
}

/// A connection able to run Groovy scripts on a Gremlin server.
///
/// Implementations own transport, authentication and TLS. Errors that come
/// from the transport should be [`crate::GremlinError::Connection`]; errors
/// the server reports for the script should be built with
/// [`crate::GremlinError::engine`].
#[async_trait]
pub trait GraphClient: Send + Sync {
    /// Submit a script and collect its results.
    async fn submit(&self, query: &str) -> Result<ResultSet>;
}

#[async_trait]
impl<T: GraphClient + ?Sized> GraphClient for std::sync::Arc<T> {
    async fn submit(&self, query: &str) -> Result<ResultSet> {
        (**self).submit(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_set_accessors() {
        let set = ResultSet::new(vec![json!(1), json!(2)]);
        assert_eq!(set.first(), Some(&json!(1)));
        assert_eq!(set.to_array().len(), 2);
        assert_eq!(set.len(), 2);
        assert!(ResultSet::default().first().is_none());
        assert!(ResultSet::default().is_empty());
        assert_eq!(ResultSet::single(json!("x")).into_vec(), vec![json!("x")]);
    }
}
