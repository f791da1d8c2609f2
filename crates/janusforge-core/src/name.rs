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

//! Identifier sanitizing for generated Groovy scripts.
//!
//! Every label, property key and variable that ends up in a script goes through
//! [`sanitize`]. The function is total: any input, including an empty string,
//! yields a name that can be used as a Groovy variable.
//!
//! # Examples
//!
//! ```
//! use janusforge_core::sanitize;
//!
//! assert_eq!(sanitize("first name"), "first_name");
//! assert_eq!(sanitize("123abc"), "v__123abc");
//! assert_eq!(sanitize(""), "New_vertex");
//! ```

use std::borrow::Cow;

/// Name used when the raw name is empty.
pub const FALLBACK_NAME: &str = "New_vertex";

/// Prefix prepended (followed by `_`) to names starting with a digit.
pub const DIGIT_PREFIX: &str = "v_";

/// Check whether a character must be replaced by an underscore.
#[inline]
fn is_reserved(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '`' | '~'
                | '!'
                | '@'
                | '#'
                | '%'
                | '^'
                | '&'
                | '*'
                | '('
                | ')'
                | '_'
                | '|'
                | '+'
                | '-'
                | '='
                | '?'
                | ';'
                | ':'
                | '\''
                | '"'
                | ','
                | '.'
                | '<'
                | '>'
                | '{'
                | '}'
                | '['
                | ']'
                | '\\'
                | '/'
        )
}

/// Normalize an arbitrary name into a valid script identifier.
///
/// Reserved punctuation and whitespace become `_`. A result starting with an
/// ASCII digit gets the `v_` prefix and another underscore.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let replaced: String = raw
        .chars()
        .map(|c| if is_reserved(c) { '_' } else { c })
        .collect();

    if replaced.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}_{}", DIGIT_PREFIX, replaced)
    } else {
        replaced
    }
}

/// Sanitize an optional name, falling back when it is absent.
pub fn sanitize_opt(raw: Option<&str>) -> String {
    sanitize(raw.unwrap_or_default())
}

/// Borrow the name when it is already valid, allocate otherwise.
pub fn sanitize_cow(raw: &str) -> Cow<'_, str> {
    if !raw.is_empty()
        && !raw.chars().any(is_reserved)
        && !raw.starts_with(|c: char| c.is_ascii_digit())
    {
        Cow::Borrowed(raw)
    } else {
        Cow::Owned(sanitize(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_plain() {
        assert_eq!(sanitize("Person"), "Person");
    }

    #[test]
    fn test_sanitize_reserved_characters() {
        assert_eq!(sanitize("first name"), "first_name");
        assert_eq!(sanitize("a.b-c"), "a_b_c");
        assert_eq!(sanitize("x<y>[z]"), "x_y__z_");
        assert_eq!(sanitize("tab\there"), "tab_here");
    }

    #[test]
    fn test_sanitize_digit_prefix() {
        assert_eq!(sanitize("123abc"), "v__123abc");
        assert_eq!(sanitize("9"), "v__9");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize(""), "New_vertex");
        assert_eq!(sanitize_opt(None), "New_vertex");
    }

    #[test]
    fn test_sanitize_idempotent_on_prefixed() {
        let once = sanitize("1st place");
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_sanitize_cow_borrows_valid_names() {
        assert!(matches!(sanitize_cow("name"), Cow::Borrowed(_)));
        assert!(matches!(sanitize_cow("a b"), Cow::Owned(_)));
    }
}
