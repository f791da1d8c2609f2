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

//! Property-graph model types for JanusGraph schema tooling.
//!
//! This crate holds everything that is independent of script text and of the
//! live server:
//!
//! - [`PropertySchema`], the recursive property type descriptor, with its
//!   insertion-ordered [`PropertyMap`]
//! - [`sanitize`], which turns any name into a valid script identifier
//! - [`NativeType`], the two-way mapping to JanusGraph data types
//! - [`Geometry`], resolved geoshape coordinates
//! - [`GraphModel`], the decoded model payload
//! - [`ResolvedSchema`], label, key and index definitions with references
//!   looked up
//! - [`resolve_properties`], choice-group resolution
//!
//! # Example
//!
//! ```rust
//! use janusforge_core::{GraphModel, ResolvedSchema};
//!
//! let model = GraphModel::from_json(r#"{
//!     "collections": [{
//!         "GUID": "p",
//!         "collectionName": "Person",
//!         "properties": {"name": {"type": "string"}}
//!     }]
//! }"#).unwrap();
//!
//! let schema = ResolvedSchema::resolve(&model).unwrap();
//! assert_eq!(schema.vertex_labels[0].name, "Person");
//! assert_eq!(schema.property_keys[0].name, "name");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod choices;
pub mod definitions;
pub mod error;
pub mod geometry;
pub mod model;
pub mod name;
pub mod schema;
pub mod types;

pub use choices::{choice_groups, resolve_items, resolve_properties, ResolvedChoice};
pub use definitions::{
    Direction, EdgeLabelDefinition, ElementScope, IndexDefinition, MixedKey,
    PropertyKeyDefinition, ReferenceKind, ResolvedSchema, SortOrder, UnresolvedReference,
    VertexLabelDefinition,
};
pub use error::{ModelError, Result};
pub use geometry::Geometry;
pub use model::{
    GraphConfiguration, GraphMetadata, GraphModel, GraphVariable, IndexDeclaration, IndexKeyRef,
    IndexMetadata, ModelInput, Multiplicity, RelationshipEntity, VertexEntity,
};
pub use name::{sanitize, sanitize_cow, sanitize_opt};
pub use schema::{
    Cardinality, ChoiceGroup, ChoiceKind, MetaProperty, NumberMode, PropertyKind, PropertyMap,
    PropertySchema, Ttl, TtlUnit,
};
pub use types::NativeType;
