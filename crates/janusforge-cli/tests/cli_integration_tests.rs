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

//! End-to-end tests of the janusforge binary.

use assert_cmd::Command;
use janusforge_test::fixtures;
use janusforge_test::graphson::{g_list, int32, person_rows, value_map};
use predicates::prelude::*;
use std::fs;
use tempfile::NamedTempFile;

fn janusforge_cmd() -> Command {
    Command::cargo_bin("janusforge").expect("Failed to find janusforge binary")
}

fn create_temp_file(content: &str, suffix: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

fn people_file() -> NamedTempFile {
    create_temp_file(&fixtures::people_json().to_string(), ".json")
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_help_output() {
    janusforge_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("infer"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_no_subcommand_fails() {
    janusforge_cmd().assert().failure();
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_sections() {
    let model = people_file();
    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("// JanusGraph schema\n"))
        .stdout(predicate::str::contains("// Sample data\n"))
        .stdout(predicate::str::contains("Person = mgmt.makeVertexLabel('Person').make()"))
        .stdout(predicate::str::contains("Person.property(\"name\", \"Ada\");"));
}

#[test]
fn test_generate_live_update_schema_only() {
    let model = people_file();
    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .args(["--profile", "live", "--update", "--combined", "--schema-only"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("g = people.traversal()"))
        .stdout(predicate::str::contains("awaitGraphIndexStatus"))
        .stdout(predicate::str::contains("addVertex").not())
        .stdout(predicate::str::contains("// JanusGraph schema").not());
}

#[test]
fn test_generate_to_file() {
    let model = people_file();
    let output = NamedTempFile::new().expect("Failed to create temp file");
    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let script = fs::read_to_string(output.path()).unwrap();
    assert!(script.contains("mgmt.addConnection(knows, Person, Person)"));
}

#[test]
fn test_generate_config_file_and_flags() {
    let model = people_file();
    let config = create_temp_file(r#"{"includeSampleData": false, "output": "combined"}"#, ".json");
    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .arg("--config")
        .arg(config.path())
        .arg("--update")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("g = people.traversal()"))
        .stdout(predicate::str::contains("addVertex").not());
}

#[test]
fn test_generate_strict_fails_on_dangling_edge() {
    let model = create_temp_file(
        r#"{"collections": [{"GUID": "p", "collectionName": "Person"}],
            "relationships": [{"GUID": "r", "name": "likes",
                               "parentCollection": "p", "childCollection": "missing"}]}"#,
        ".json",
    );
    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("likes").not());

    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_generate_missing_file() {
    janusforge_cmd()
        .args(["generate", "/nonexistent/model.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/model.json"));
}

#[test]
fn test_generate_invalid_json() {
    let model = create_temp_file("{not json", ".json");
    janusforge_cmd()
        .arg("generate")
        .arg(model.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid model"));
}

#[test]
fn test_generate_file_size_limit() {
    let model = people_file();
    janusforge_cmd()
        .env("JANUSFORGE_MAX_FILE_SIZE", "10")
        .arg("generate")
        .arg(model.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ============================================================================
// infer
// ============================================================================

#[test]
fn test_infer_schema() {
    let graphson = create_temp_file(&g_list(person_rows()).to_string(), ".json");
    janusforge_cmd()
        .arg("infer")
        .arg(graphson.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\""))
        .stdout(predicate::str::contains("\"nicknames\""))
        .stdout(predicate::str::contains("\"type\": \"set\""));
}

#[test]
fn test_infer_with_property_keys() {
    let graphson = create_temp_file(
        &g_list(vec![value_map(vec![("age", int32(3))])]).to_string(),
        ".json",
    );
    let keys = create_temp_file(
        r#"[{"name": "age", "cardinality": "SINGLE", "dataType": "java.lang.Long", "TTL": 60}]"#,
        ".json",
    );
    let output = NamedTempFile::new().expect("Failed to create temp file");
    janusforge_cmd()
        .arg("infer")
        .arg(graphson.path())
        .arg("--property-keys")
        .arg(keys.path())
        .arg("-o")
        .arg(output.path())
        .assert()
        .success();

    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.path()).unwrap()).unwrap();
    assert_eq!(schema["properties"]["age"]["type"], "number");
    assert!(schema["properties"]["age"].get("propertyTTL").is_some());
}

#[test]
fn test_infer_rejects_untagged_payload() {
    let graphson = create_temp_file(r#"{"rows": []}"#, ".json");
    janusforge_cmd()
        .arg("infer")
        .arg(graphson.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a tagged list of rows"));
}

// ============================================================================
// completion
// ============================================================================

#[test]
fn test_completion_bash() {
    janusforge_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_janusforge()"))
        .stdout(predicate::str::contains("COMPREPLY"));
}

#[test]
fn test_completion_zsh() {
    janusforge_cmd()
        .args(["completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef janusforge"));
}

#[test]
fn test_completion_install() {
    janusforge_cmd()
        .args(["completion", "fish", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("janusforge.fish"));
}

#[test]
fn test_completion_unknown_shell() {
    janusforge_cmd()
        .args(["completion", "tcsh"])
        .assert()
        .failure();
}
