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


//! Gremlin statement types and script assembly.
//!
//! A [`GremlinStatement`] is the group of lines generated for one element (a
//! property key with its TTL, a vertex with its properties). A
//! [`GremlinScript`] separates statements with a blank line, and
//! [`join_sections`] separates whole scripts with two blank lines.

use serde::{Deserialize, Serialize};

/// Separator between statements of one script.
pub const STATEMENT_SEPARATOR: &str = "\n\n";

/// Separator between script sections.
pub const SECTION_SEPARATOR: &str = "\n\n\n";

/// The kind of element a statement creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    /// Graph creation or opening.
    Bootstrap,
    /// Transaction rollback.
    Rollback,
    /// Property key creation.
    PropertyKey,
    /// Vertex label creation.
    VertexLabel,
    /// Edge label creation.
    EdgeLabel,
    /// Index creation.
    Index,
    /// Sample vertex.
    Vertex,
    /// Sample edge.
    Edge,
    /// Graph variable assignment.
    Variable,
    /// Transaction commit.
    Commit,
}

/// The lines generated for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GremlinStatement {
    /// Kind of element.
    pub kind: StatementKind,
    /// Script lines, in order.
    pub lines: Vec<String>,
}

impl GremlinStatement {
    /// Create an empty statement.
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    /// Create a single-line statement.
    pub fn line(kind: StatementKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            lines: vec![line.into()],
        }
    }

    /// Append a line. Empty lines are ignored.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    /// Append a line, builder style.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.push(line);
        self
    }

    /// Append an optional line.
    pub fn with_optional(mut self, line: Option<String>) -> Self {
        if let Some(line) = line {
            self.push(line);
        }
        self
    }

    /// Render the statement lines.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// An ordered collection of statements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GremlinScript {
    /// The statements in this script.
    pub statements: Vec<GremlinStatement>,
}

impl GremlinScript {
    /// Create a new empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement to the script. Statements without lines are dropped.
    pub fn add(&mut self, statement: GremlinStatement) {
        if !statement.lines.is_empty() {
            self.statements.push(statement);
        }
    }

    /// Add multiple statements to the script.
    pub fn extend(&mut self, statements: impl IntoIterator<Item = GremlinStatement>) {
        for statement in statements {
            self.add(statement);
        }
    }

    /// Get all statements of a specific kind.
    pub fn statements_of_kind(&self, kind: StatementKind) -> Vec<&GremlinStatement> {
        self.statements.iter().filter(|s| s.kind == kind).collect()
    }

    /// Render the script with a blank line between statements.
    pub fn render(&self) -> String {
        self.render_with(STATEMENT_SEPARATOR)
    }

    /// Render the script with a custom separator.
    pub fn render_with(&self, separator: &str) -> String {
        self.statements
            .iter()
            .map(GremlinStatement::render)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Get the number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl FromIterator<GremlinStatement> for GremlinScript {
    fn from_iter<I: IntoIterator<Item = GremlinStatement>>(iter: I) -> Self {
        let mut script = GremlinScript::new();
        script.extend(iter);
        script
    }
}

impl IntoIterator for GremlinScript {
    type Item = GremlinStatement;
    type IntoIter = std::vec::IntoIter<GremlinStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a GremlinScript {
    type Item = &'a GremlinStatement;
    type IntoIter = std::slice::Iter<'a, GremlinStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Join rendered sections with two blank lines, skipping empty ones.
pub fn join_sections<I, S>(sections: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sections
        .into_iter()
        .filter(|s| !s.as_ref().is_empty())
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(SECTION_SEPARATOR)
}

/// A titled script, as handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSection {
    /// Section title.
    pub title: String,
    /// Script text.
    pub script: String,
}

impl ScriptSection {
    /// Create a section.
    pub fn new(title: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            script: script.into(),
        }
    }
}
