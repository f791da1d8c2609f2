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

//! Error types for model parsing and resolution.

use thiserror::Error;

/// Error type for model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An embedded JSON document could not be decoded.
    #[error("malformed {kind} document at position {index}: {message}")]
    MalformedDocument {
        /// Which kind of document failed (collection, relationship, ...).
        kind: &'static str,
        /// Position of the document in its list.
        index: usize,
        /// The decoder message.
        message: String,
    },

    /// A sample document keyed by entity id could not be decoded.
    #[error("malformed sample document for entity '{entity}': {message}")]
    MalformedSample {
        /// The entity id the sample belongs to.
        entity: String,
        /// The decoder message.
        message: String,
    },

    /// An index references an owning entity that is not part of the model.
    #[error("index '{index}' references unknown entity '{owner}'")]
    UnresolvedIndexTarget {
        /// The index name.
        index: String,
        /// The entity id that could not be found.
        owner: String,
    },

    /// The container metadata block is not shaped as expected.
    #[error("invalid container metadata: {0}")]
    InvalidContainer(String),

    /// Serialization error from serde_json.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
