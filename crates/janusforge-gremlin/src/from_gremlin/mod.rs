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


//! Reverse engineering of a live JanusGraph server.
//!
//! A [`Session`] binds a [`GraphClient`] to the traversal source of one
//! graph. The [`Sampler`] drives the queries of [`queries`] over that
//! session, decodes management results into the rows of [`rows`] and
//! produces [`LabelPackage`]s and [`RelationshipPackage`]s.

pub mod client;
pub mod package;
pub mod progress;
pub mod queries;
pub mod rows;
pub mod sampler;
pub mod session;

pub use client::{GraphClient, ResultSet};
pub use package::{
    BucketIndexes, BucketInfo, EntityLevel, LabelPackage, ModelDefinitions, RelationshipInfo,
    RelationshipPackage, ReverseResult, Validation,
};
pub use progress::{Progress, ProgressSink, TracingProgress};
pub use sampler::{reverse_engineer, DatabaseRequest, Sampler};
pub use session::{Session, TraversalLookup};
