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


//! Groovy string quoting for generated scripts.
//!
//! Names reaching the script are sanitized already, so quoting only matters
//! for sample values, configuration values and well-known text. Double-quoted
//! Groovy strings interpolate `$`, which is escaped as well.

use serde_json::Value;
use std::borrow::Cow;

#[inline]
fn needs_escaping(s: &str, quote: char) -> bool {
    s.chars().any(|ch| {
        ch == quote
            || matches!(ch, '\\' | '\n' | '\r' | '\t' | '\x00')
            || (quote == '"' && ch == '$')
    })
}

fn escape_with(s: &str, quote: char) -> Cow<'_, str> {
    if !needs_escaping(s, quote) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            '$' if quote == '"' => escaped.push_str("\\$"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escape a string for use inside a double-quoted Groovy string.
///
/// ```
/// # use janusforge_gremlin::script::escape_double;
/// assert!(matches!(escape_double("plain"), std::borrow::Cow::Borrowed(_)));
/// assert_eq!(escape_double("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape_double("$price"), "\\$price");
/// ```
pub fn escape_double(s: &str) -> Cow<'_, str> {
    escape_with(s, '"')
}

/// Escape a string for use inside a single-quoted Groovy string.
pub fn escape_single(s: &str) -> Cow<'_, str> {
    escape_with(s, '\'')
}

/// Quote a string with double quotes.
pub fn quote_double(s: &str) -> String {
    format!("\"{}\"", escape_double(s))
}

/// Quote a string with single quotes.
pub fn quote_single(s: &str) -> String {
    format!("'{}'", escape_single(s))
}

/// Render a JSON value as a plain literal.
///
/// Strings are double-quoted; every other value is written in its JSON form.
pub fn json_literal(value: &Value) -> String {
    match value {
        Value::String(s) => quote_double(s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_double() {
        assert_eq!(quote_double("Person"), "\"Person\"");
        assert_eq!(quote_double("a\nb"), "\"a\\nb\"");
        assert_eq!(quote_double("it's"), "\"it's\"");
    }

    #[test]
    fn test_quote_single() {
        assert_eq!(quote_single("knows"), "'knows'");
        assert_eq!(quote_single("it's"), "'it\\'s'");
        assert_eq!(quote_single("$x"), "'$x'");
    }

    #[test]
    fn test_json_literal() {
        assert_eq!(json_literal(&json!("Lorem")), "\"Lorem\"");
        assert_eq!(json_literal(&json!(12)), "12");
        assert_eq!(json_literal(&json!(true)), "true");
        assert_eq!(json_literal(&json!(null)), "null");
        assert_eq!(json_literal(&json!([1, 2])), "[1,2]");
    }
}
