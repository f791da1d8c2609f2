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

//! Command implementations.

mod completion;
mod generate;
mod infer;

pub use completion::{generate_completion, print_installation_instructions};
pub use generate::{generate, GenerateOptions, Profile};
pub use infer::{infer, infer_schema};

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Write};

/// Default maximum input size in bytes (1 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

fn max_file_size() -> u64 {
    std::env::var("JANUSFORGE_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a whole input file, refusing files above the size limit.
///
/// The limit is taken from `JANUSFORGE_MAX_FILE_SIZE` (bytes) when set.
pub fn read_file(path: &str) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max = max_file_size();
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Read and parse a JSON input file.
pub fn read_json(path: &str) -> Result<serde_json::Value> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::json(path, e))
}

/// Write `content` to `path`, or to stdout when no path is given.
pub fn write_output(content: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(p) => fs::write(p, content).map_err(|e| CliError::io_error(p, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.write_all(b"\n"))
                .map_err(|e| CliError::io_error("<stdout>", e))
        }
    }
}
