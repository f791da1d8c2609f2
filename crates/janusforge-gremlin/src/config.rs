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


//! Configuration types for script generation and reverse engineering.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base count for discovering edge connections from data.
pub const DEFAULT_RELATIONSHIP_PROBE_BASE: u64 = 10_000;

/// Which statements the schema script carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptProfile {
    /// A script meant for review. Indexes are built inside the main
    /// management block with no side-effecting orchestration.
    #[default]
    FileExport,
    /// A script meant to run against a live server. Each composite and
    /// mixed index is preceded by a rollback and followed by an await and a
    /// reindex.
    ApplyToLive,
}

/// How the graph is obtained at the top of the schema script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphBootstrap {
    /// Create the graph with its configuration.
    #[default]
    CreateGraph,
    /// Open a graph that already exists.
    OpenExisting,
}

/// Shape of the generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputMode {
    /// Titled sections.
    #[default]
    Sections,
    /// One script string.
    Combined,
}

/// Configuration for converting a model to Gremlin scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToGremlinConfig {
    /// Script profile (default: file export).
    pub profile: ScriptProfile,

    /// Graph bootstrap strategy (default: create the graph).
    pub bootstrap: GraphBootstrap,

    /// Output shape (default: sections).
    pub output: OutputMode,

    /// Emit the schema section (default: true).
    pub include_schema: bool,

    /// Emit the sample data section (default: true).
    pub include_sample_data: bool,

    /// Fail on the first unresolved edge endpoint or vertex-centric index
    /// edge instead of skipping it (default: false).
    pub strict_references: bool,
}

impl Default for ToGremlinConfig {
    fn default() -> Self {
        Self {
            profile: ScriptProfile::FileExport,
            bootstrap: GraphBootstrap::CreateGraph,
            output: OutputMode::Sections,
            include_schema: true,
            include_sample_data: true,
            strict_references: false,
        }
    }
}

/// Builder for ToGremlinConfig.
///
/// # Examples
///
/// ```
/// # use janusforge_gremlin::{ScriptProfile, ToGremlinConfig};
/// let config = ToGremlinConfig::builder()
///     .profile(ScriptProfile::ApplyToLive)
///     .include_sample_data(false)
///     .build();
/// assert!(config.include_schema);
/// ```
#[derive(Default)]
pub struct ToGremlinConfigBuilder {
    profile: Option<ScriptProfile>,
    bootstrap: Option<GraphBootstrap>,
    output: Option<OutputMode>,
    include_schema: Option<bool>,
    include_sample_data: Option<bool>,
    strict_references: Option<bool>,
}

impl ToGremlinConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the script profile.
    pub fn profile(mut self, profile: ScriptProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the graph bootstrap strategy.
    pub fn bootstrap(mut self, bootstrap: GraphBootstrap) -> Self {
        self.bootstrap = Some(bootstrap);
        self
    }

    /// Set the output shape.
    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = Some(output);
        self
    }

    /// Set whether the schema section is emitted.
    pub fn include_schema(mut self, include: bool) -> Self {
        self.include_schema = Some(include);
        self
    }

    /// Set whether the sample data section is emitted.
    pub fn include_sample_data(mut self, include: bool) -> Self {
        self.include_sample_data = Some(include);
        self
    }

    /// Set whether unresolved references are errors.
    pub fn strict_references(mut self, strict: bool) -> Self {
        self.strict_references = Some(strict);
        self
    }

    /// Build the ToGremlinConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> ToGremlinConfig {
        let defaults = ToGremlinConfig::default();
        ToGremlinConfig {
            profile: self.profile.unwrap_or(defaults.profile),
            bootstrap: self.bootstrap.unwrap_or(defaults.bootstrap),
            output: self.output.unwrap_or(defaults.output),
            include_schema: self.include_schema.unwrap_or(defaults.include_schema),
            include_sample_data: self.include_sample_data.unwrap_or(defaults.include_sample_data),
            strict_references: self.strict_references.unwrap_or(defaults.strict_references),
        }
    }
}

impl ToGremlinConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for ToGremlinConfig.
    pub fn builder() -> ToGremlinConfigBuilder {
        ToGremlinConfigBuilder::default()
    }

    /// Configuration used by [`crate::apply_schema`]: live profile, opening
    /// the existing graph, schema only.
    pub fn for_live_apply() -> Self {
        Self {
            profile: ScriptProfile::ApplyToLive,
            bootstrap: GraphBootstrap::OpenExisting,
            output: OutputMode::Combined,
            include_sample_data: false,
            ..Default::default()
        }
    }

    /// Use the apply-to-live profile.
    pub fn with_live_profile(mut self) -> Self {
        self.profile = ScriptProfile::ApplyToLive;
        self
    }

    /// Open an existing graph instead of creating it.
    pub fn with_existing_graph(mut self) -> Self {
        self.bootstrap = GraphBootstrap::OpenExisting;
        self
    }

    /// Produce one combined script.
    pub fn with_combined_output(mut self) -> Self {
        self.output = OutputMode::Combined;
        self
    }

    /// Skip the sample data section.
    pub fn without_sample_data(mut self) -> Self {
        self.include_sample_data = false;
        self
    }

    /// Skip the schema section.
    pub fn without_schema(mut self) -> Self {
        self.include_schema = false;
        self
    }

    /// Turn unresolved references into errors.
    pub fn with_strict_references(mut self) -> Self {
        self.strict_references = true;
        self
    }
}

/// How many records to sample per label or connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "active", content = "value", rename_all = "camelCase")]
pub enum RecordSampling {
    /// A fixed number of records.
    Absolute(u64),
    /// A percentage of the element count.
    Relative(u64),
}

impl Default for RecordSampling {
    fn default() -> Self {
        RecordSampling::Relative(1)
    }
}

impl RecordSampling {
    /// The number of records to fetch out of `count`.
    ///
    /// ```
    /// # use janusforge_gremlin::RecordSampling;
    /// assert_eq!(RecordSampling::Absolute(50).limit(3), 50);
    /// assert_eq!(RecordSampling::Relative(5).limit(1_000), 50);
    /// ```
    pub fn limit(&self, count: u64) -> u64 {
        match *self {
            RecordSampling::Absolute(n) => n,
            RecordSampling::Relative(percent) => {
                (count as f64 / 100.0 * percent as f64).round() as u64
            }
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

/// Configuration for sampling a live graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SamplingConfig {
    /// Records per label (default: 1 percent).
    pub record_sampling: RecordSampling,

    /// Produce a document template per label (default: false).
    pub field_inference: bool,

    /// Keep labels whose sampled documents are all empty (default: false).
    pub include_empty_collection: bool,

    /// Limit applied to every submitted query, in milliseconds when
    /// serialized (default: none).
    #[serde(with = "duration_ms", rename = "queryTimeoutMs")]
    pub query_timeout: Option<Duration>,

    /// Count the sampling setting is applied to when discovering edge
    /// connections from data (default: 10000).
    pub relationship_probe_base: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            record_sampling: RecordSampling::default(),
            field_inference: false,
            include_empty_collection: false,
            query_timeout: None,
            relationship_probe_base: DEFAULT_RELATIONSHIP_PROBE_BASE,
        }
    }
}

/// Builder for SamplingConfig.
#[derive(Default)]
pub struct SamplingConfigBuilder {
    record_sampling: Option<RecordSampling>,
    field_inference: Option<bool>,
    include_empty_collection: Option<bool>,
    query_timeout: Option<Option<Duration>>,
    relationship_probe_base: Option<u64>,
}

impl SamplingConfigBuilder {
    /// Create a new builder with no values set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record sampling.
    pub fn record_sampling(mut self, sampling: RecordSampling) -> Self {
        self.record_sampling = Some(sampling);
        self
    }

    /// Set whether document templates are produced.
    pub fn field_inference(mut self, enabled: bool) -> Self {
        self.field_inference = Some(enabled);
        self
    }

    /// Set whether empty labels are kept.
    pub fn include_empty_collection(mut self, include: bool) -> Self {
        self.include_empty_collection = Some(include);
        self
    }

    /// Set the query timeout.
    pub fn query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(Some(timeout));
        self
    }

    /// Remove the query timeout.
    pub fn no_query_timeout(mut self) -> Self {
        self.query_timeout = Some(None);
        self
    }

    /// Set the connection probe base.
    pub fn relationship_probe_base(mut self, base: u64) -> Self {
        self.relationship_probe_base = Some(base);
        self
    }

    /// Build the SamplingConfig instance.
    ///
    /// All unset fields will use their default values.
    pub fn build(self) -> SamplingConfig {
        let defaults = SamplingConfig::default();
        SamplingConfig {
            record_sampling: self.record_sampling.unwrap_or(defaults.record_sampling),
            field_inference: self.field_inference.unwrap_or(defaults.field_inference),
            include_empty_collection: self
                .include_empty_collection
                .unwrap_or(defaults.include_empty_collection),
            query_timeout: self.query_timeout.unwrap_or(defaults.query_timeout),
            relationship_probe_base: self
                .relationship_probe_base
                .unwrap_or(defaults.relationship_probe_base),
        }
    }
}

impl SamplingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for SamplingConfig.
    pub fn builder() -> SamplingConfigBuilder {
        SamplingConfigBuilder::default()
    }

    /// Sample a fixed number of records.
    pub fn with_absolute_sampling(mut self, records: u64) -> Self {
        self.record_sampling = RecordSampling::Absolute(records);
        self
    }

    /// Sample a percentage of the records.
    pub fn with_relative_sampling(mut self, percent: u64) -> Self {
        self.record_sampling = RecordSampling::Relative(percent);
        self
    }

    /// Produce document templates.
    pub fn with_field_inference(mut self) -> Self {
        self.field_inference = true;
        self
    }

    /// Keep empty labels.
    pub fn with_empty_collections(mut self) -> Self {
        self.include_empty_collection = true;
        self
    }

    /// Bound every query by a timeout.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Limit for node or edge documents out of `count` elements.
    pub fn limit(&self, count: u64) -> u64 {
        self.record_sampling.limit(count)
    }

    /// Limit for discovering connections from data.
    pub fn relationship_probe_limit(&self) -> u64 {
        self.record_sampling.limit(self.relationship_probe_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_gremlin_config_default() {
        let config = ToGremlinConfig::default();
        assert_eq!(config.profile, ScriptProfile::FileExport);
        assert_eq!(config.bootstrap, GraphBootstrap::CreateGraph);
        assert_eq!(config.output, OutputMode::Sections);
        assert!(config.include_schema);
        assert!(config.include_sample_data);
        assert!(!config.strict_references);
    }

    #[test]
    fn test_to_gremlin_config_with_methods() {
        let config = ToGremlinConfig::new()
            .with_live_profile()
            .with_existing_graph()
            .with_combined_output()
            .without_sample_data()
            .with_strict_references();

        assert_eq!(config.profile, ScriptProfile::ApplyToLive);
        assert_eq!(config.bootstrap, GraphBootstrap::OpenExisting);
        assert_eq!(config.output, OutputMode::Combined);
        assert!(!config.include_sample_data);
        assert!(config.strict_references);
    }

    #[test]
    fn test_to_gremlin_config_builder() {
        let config = ToGremlinConfig::builder()
            .output(OutputMode::Combined)
            .include_schema(false)
            .build();

        assert_eq!(config.output, OutputMode::Combined);
        assert!(!config.include_schema);
        assert_eq!(config.profile, ScriptProfile::FileExport);
    }

    #[test]
    fn test_for_live_apply() {
        let config = ToGremlinConfig::for_live_apply();
        assert_eq!(config.profile, ScriptProfile::ApplyToLive);
        assert_eq!(config.bootstrap, GraphBootstrap::OpenExisting);
        assert!(!config.include_sample_data);
    }

    #[test]
    fn test_record_sampling_limit() {
        assert_eq!(RecordSampling::default().limit(10_000), 100);
        assert_eq!(RecordSampling::Relative(10).limit(25), 3);
        assert_eq!(RecordSampling::Relative(1).limit(40), 0);
        assert_eq!(RecordSampling::Absolute(7).limit(0), 7);
    }

    #[test]
    fn test_sampling_config_default() {
        let config = SamplingConfig::default();
        assert_eq!(config.record_sampling, RecordSampling::Relative(1));
        assert!(!config.field_inference);
        assert!(!config.include_empty_collection);
        assert_eq!(config.query_timeout, None);
        assert_eq!(config.relationship_probe_limit(), 100);
    }

    #[test]
    fn test_sampling_config_builder() {
        let config = SamplingConfig::builder()
            .record_sampling(RecordSampling::Absolute(25))
            .field_inference(true)
            .query_timeout(Duration::from_millis(1500))
            .relationship_probe_base(200)
            .build();

        assert_eq!(config.limit(1), 25);
        assert!(config.field_inference);
        assert_eq!(config.query_timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.relationship_probe_limit(), 25);
    }

    #[test]
    fn test_sampling_config_json() {
        let config: SamplingConfig = serde_json::from_str(
            r#"{"recordSampling": {"active": "absolute", "value": 10},
                "fieldInference": true,
                "queryTimeoutMs": 250}"#,
        )
        .unwrap();
        assert_eq!(config.record_sampling, RecordSampling::Absolute(10));
        assert!(config.field_inference);
        assert_eq!(config.query_timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.relationship_probe_base, DEFAULT_RELATIONSHIP_PROBE_BASE);

        let text = serde_json::to_string(&config).unwrap();
        assert!(text.contains("\"queryTimeoutMs\":250"));
    }

    #[test]
    fn test_to_gremlin_config_json() {
        let config: ToGremlinConfig = serde_json::from_str(
            r#"{"profile": "applyToLive", "includeSampleData": false, "output": "combined"}"#,
        )
        .unwrap();
        assert_eq!(config.profile, ScriptProfile::ApplyToLive);
        assert_eq!(config.output, OutputMode::Combined);
        assert!(!config.include_sample_data);
        assert!(config.include_schema);
        assert_eq!(config.bootstrap, GraphBootstrap::CreateGraph);
    }
}
