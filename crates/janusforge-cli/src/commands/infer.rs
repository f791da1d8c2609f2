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

//! `infer`: captured GraphSON to a merged property schema.

use super::{read_json, write_output};
use crate::error::{CliError, Result};
use janusforge_core::{PropertyMap, PropertySchema};
use janusforge_gremlin::from_gremlin::rows::{decode_rows, PropertyKeyRow};
use janusforge_gremlin::mapping::documents_schema;
use serde_json::Value;
use tracing::debug;

fn property_keys(rows: &Value) -> Result<PropertyMap> {
    let items = rows
        .as_array()
        .ok_or_else(|| CliError::invalid_input("property keys must be a JSON array of rows"))?;
    Ok(decode_rows::<PropertyKeyRow>("property keys", items)?
        .into_iter()
        .map(|row| {
            let schema = row.to_schema();
            (row.name, schema)
        })
        .collect())
}

/// Merge the rows of a GraphSON `valueMap()` payload into one schema.
///
/// `payload` is either the decoded GraphSON list or the mapper's text.
/// `keys` holds property-key rows as returned by the management query.
pub fn infer_schema(payload: &Value, keys: Option<&Value>) -> Result<PropertySchema> {
    let declared = match keys {
        Some(rows) => property_keys(rows)?,
        None => PropertyMap::new(),
    };
    debug!(property_keys = declared.len(), "inferring schema");
    Ok(documents_schema(payload, &declared, &[])?)
}

/// Infer a schema from the GraphSON in `file` and print it as JSON.
pub fn infer(file: &str, property_keys: Option<&str>, output: Option<&str>) -> Result<()> {
    let payload = read_json(file)?;
    let keys = property_keys.map(read_json).transpose()?;
    let schema = infer_schema(&payload, keys.as_ref())?;

    let json = serde_json::to_string_pretty(&schema)
        .map_err(|e| CliError::invalid_input(format!("schema is not serializable: {}", e)))?;
    write_output(&json, output)
}
