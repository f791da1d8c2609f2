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

//! Error types for janusforge-gremlin.

use janusforge_core::{ModelError, ReferenceKind};
use std::time::Duration;
use thiserror::Error;

/// Error type for script generation and reverse engineering.
#[derive(Debug, Error)]
pub enum GremlinError {
    /// The model could not be parsed or resolved.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The client could not reach the server.
    #[error("connection error: {0}")]
    Connection(String),

    /// The server rejected a script.
    #[error("{explanation} ({message})")]
    Engine {
        /// User-facing explanation.
        explanation: String,
        /// The raw server message.
        message: String,
    },

    /// A query returned something that could not be interpreted.
    #[error("unexpected result for query '{query}': {reason}")]
    UnexpectedResult {
        /// The query text.
        query: String,
        /// What was wrong.
        reason: String,
    },

    /// A query did not finish in time.
    #[error("query '{query}' timed out after {after:?}")]
    Timeout {
        /// The query text.
        query: String,
        /// The configured limit.
        after: Duration,
    },

    /// A reference could not be resolved while strict references are on.
    #[error("unresolved {kind} '{id}' referenced by '{name}'")]
    UnresolvedReference {
        /// Reference kind.
        kind: ReferenceKind,
        /// Element holding the reference.
        name: String,
        /// The id that could not be found.
        id: String,
    },
}

/// Result type alias for Gremlin operations.
pub type Result<T> = std::result::Result<T, GremlinError>;

const ENGINE_EXPLANATIONS: &[(&str, &str)] = &[
    (
        "No such property",
        "The graph or traversal source referenced by the script does not exist",
    ),
    (
        "uniqueness",
        "The data violates a unique index or constraint",
    ),
    ("already", "An element with this name already exists"),
];

const GENERIC_EXPLANATION: &str = "The server could not execute the script";

impl GremlinError {
    /// Build an [`GremlinError::Engine`] error from a raw server message.
    ///
    /// Known message fragments are translated into an explanation; the raw
    /// message is always kept.
    pub fn engine(message: impl Into<String>) -> Self {
        let message = message.into();
        let explanation = ENGINE_EXPLANATIONS
            .iter()
            .find(|(fragment, _)| message.contains(fragment))
            .map(|(_, explanation)| *explanation)
            .unwrap_or(GENERIC_EXPLANATION)
            .to_string();
        GremlinError::Engine {
            explanation,
            message,
        }
    }

    /// Whether the error comes from the transport rather than the script.
    pub fn is_connection(&self) -> bool {
        matches!(self, GremlinError::Connection(_) | GremlinError::Timeout { .. })
    }
}

impl From<janusforge_core::UnresolvedReference> for GremlinError {
    fn from(reference: janusforge_core::UnresolvedReference) -> Self {
        GremlinError::UnresolvedReference {
            kind: reference.kind,
            name: reference.name,
            id: reference.id,
        }
    }
}
