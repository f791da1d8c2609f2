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


//! GraphSON v3 builders.

use serde_json::{json, Value};

/// A `g:Map` from alternating keys and values.
pub fn g_map<I>(pairs: I) -> Value
where
    I: IntoIterator<Item = (Value, Value)>,
{
    let flat: Vec<Value> = pairs.into_iter().flat_map(|(k, v)| [k, v]).collect();
    json!({"@type": "g:Map", "@value": flat})
}

/// A `g:List`.
pub fn g_list(items: Vec<Value>) -> Value {
    json!({"@type": "g:List", "@value": items})
}

/// A `g:Set`.
pub fn g_set(items: Vec<Value>) -> Value {
    json!({"@type": "g:Set", "@value": items})
}

/// A `g:Int32`.
pub fn int32(value: i32) -> Value {
    json!({"@type": "g:Int32", "@value": value})
}

/// A `g:Int64`.
pub fn int64(value: i64) -> Value {
    json!({"@type": "g:Int64", "@value": value})
}

/// A `g:Double`.
pub fn double(value: f64) -> Value {
    json!({"@type": "g:Double", "@value": value})
}

/// A `g:T` token such as `id` or `label`.
pub fn token(name: &str) -> Value {
    json!({"@type": "g:T", "@value": name})
}

/// One `valueMap()` row, each value wrapped in a `g:List`.
pub fn value_map(properties: Vec<(&str, Value)>) -> Value {
    g_map(
        properties
            .into_iter()
            .map(|(name, value)| (json!(name), g_list(vec![value]))),
    )
}

/// The GraphSON text returned by the mapper script for `rows`.
pub fn mapper_text(rows: Vec<Value>) -> Value {
    Value::String(g_list(rows).to_string())
}

/// Two `Person` rows: one with `name` and `age`, one with `name` and a
/// `g:Set` of `nicknames`.
pub fn person_rows() -> Vec<Value> {
    vec![
        value_map(vec![("name", json!("marko")), ("age", int32(29))]),
        value_map(vec![
            ("name", json!("vadas")),
            ("nicknames", g_set(vec![json!("v")])),
        ]),
    ]
}

/// One meta-property row: `name` carries `source`.
pub fn person_meta_rows() -> Vec<Value> {
    vec![g_map([
        (json!("properties"), json!("name")),
        (
            json!("metaProperties"),
            g_map([(json!("source"), json!("import"))]),
        ),
    ])]
}
