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


//! Conversions between property schemas and Gremlin values.
//!
//! The forward half renders literals ([`value`], [`geoshape`]); the reverse
//! half reads GraphSON results ([`graphson`]) and folds them ([`merge`]).

pub mod geoshape;
pub mod graphson;
pub mod merge;
pub mod value;

pub use graphson::{
    document_schema, documents_schema, meta_properties_payload, plain_document, schema_from_graphson,
    untag,
};
pub use merge::{
    add_meta_properties, collect_meta_properties, merge_all, merge_property_key, merge_schemas,
    MetaObservations,
};
pub use value::{meta_property_arguments, sample_literal, BASE_DEPTH};
