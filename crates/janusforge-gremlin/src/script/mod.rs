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


//! Gremlin script building utilities.

pub mod escape;
pub mod statements;

pub use escape::{escape_double, escape_single, json_literal, quote_double, quote_single};
pub use statements::{
    join_sections, GremlinScript, GremlinStatement, ScriptSection, StatementKind,
    SECTION_SEPARATOR, STATEMENT_SEPARATOR,
};
