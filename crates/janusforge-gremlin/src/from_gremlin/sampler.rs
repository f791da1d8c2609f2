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


//! Sampling a live graph into label and relationship packages.
//!
//! Databases are sampled one after the other. Inside a database the
//! label and connection queries fan out concurrently. A database whose run
//! fails contributes nothing; its partial results are discarded and the
//! error is returned.

use super::package::{
    document_template, features_text, graph_configurations, graph_variables, is_empty_label,
    BucketIndexes, BucketInfo, EntityLevel, LabelPackage, ModelDefinitions, RelationshipInfo,
    RelationshipPackage, ReverseResult, Validation,
};
use super::progress::{Progress, ProgressSink};
use super::queries::{self, Element};
use super::rows::{
    decode_rows, ConfigurationRow, ConnectionRow, EdgeLabelRow, GraphIndexRow, PropertyKeyRow,
    RelationIndexRow, VertexLabelRow,
};
use super::session::{count_from_value, Session};
use crate::config::SamplingConfig;
use crate::error::Result;
use crate::mapping::{
    add_meta_properties, collect_meta_properties, documents_schema, merge_all,
    meta_properties_payload, plain_document, untag,
};
use futures::future::try_join_all;
use janusforge_core::model::value_text;
use janusforge_core::{PropertyMap, PropertySchema};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Labels requested for one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRequest {
    /// Database (graph) name.
    pub name: String,
    /// Vertex labels to sample, in output order.
    pub labels: Vec<String>,
}

impl DatabaseRequest {
    /// Request labels of a database.
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }
}

/// Graph-level data fetched before any label is sampled.
#[derive(Debug, Clone, Default)]
struct GraphMeta {
    features: String,
    variables: Vec<janusforge_core::GraphVariable>,
    configurations: Vec<janusforge_core::GraphConfiguration>,
    property_keys: PropertyMap,
    indexes: BucketIndexes,
}

/// An edge label connection together with the label settings.
#[derive(Debug, Clone)]
struct Connection {
    row: ConnectionRow,
    label: EdgeLabelRow,
}

/// A sampled schema and the keys of its document template.
#[derive(Debug, Clone, Default)]
struct SampledSchema {
    schema: PropertySchema,
    template_keys: Vec<String>,
}

/// Sampler of a connected graph.
pub struct Sampler<'a> {
    session: &'a Session,
    config: &'a SamplingConfig,
    progress: &'a dyn ProgressSink,
}

impl<'a> Sampler<'a> {
    /// Sample through `session`, reporting to `progress`.
    pub fn new(session: &'a Session, config: &'a SamplingConfig, progress: &'a dyn ProgressSink) -> Self {
        Self {
            session,
            config,
            progress,
        }
    }

    fn ts(&self) -> &str {
        self.session.traversal_source()
    }

    async fn rows<T: DeserializeOwned>(&self, query: &str) -> Result<Vec<T>> {
        let result = self.session.submit(query).await?;
        let items: Vec<Value> = result.to_array().iter().map(untag).collect();
        decode_rows(query, &items)
    }

    async fn count(&self, query: &str) -> Result<u64> {
        let first = self.session.submit_first(query).await?;
        Ok(count_from_value(&first).unwrap_or(0))
    }

    /// Vertex label names from the schema, then from the data.
    pub async fn labels(&self) -> Result<Vec<String>> {
        let schema_query = queries::vertex_labels_from_schema(self.ts());
        let data_query = queries::vertex_labels_from_data(self.ts());
        let (from_schema, from_data) = futures::try_join!(
            self.session.submit(&schema_query),
            self.session.submit(&data_query),
        )?;
        let mut labels: Vec<String> = Vec::new();
        for label in from_schema.to_array().iter().chain(from_data.to_array()) {
            let name = value_text(&untag(label));
            if !name.is_empty() && !labels.contains(&name) {
                labels.push(name);
            }
        }
        Ok(labels)
    }

    async fn graph_meta(&self, db_name: &str) -> Result<GraphMeta> {
        let ts = self.ts();
        let schema = self.session.submit_first(&queries::print_schema(ts)).await?;
        info!(database = db_name, "graph schema:\n{}", value_text(&untag(&schema)));

        let features = features_text(&untag(&self.session.submit_first(&queries::features(ts)).await?));
        let variables_result = self.session.submit(&queries::variables(ts)).await?;
        let variables = graph_variables(variables_result.to_array());
        let property_keys: PropertyMap = self
            .rows::<PropertyKeyRow>(&queries::property_keys(ts))
            .await?
            .into_iter()
            .map(|row| {
                let schema = row.to_schema();
                (row.name, schema)
            })
            .collect();
        let configurations = match self.rows::<ConfigurationRow>(&queries::graph_configuration(ts)).await {
            Ok(rows) => graph_configurations(rows),
            Err(err) if err.is_connection() => return Err(err),
            Err(err) => {
                warn!(database = db_name, error = %err, "could not read graph configuration");
                Vec::new()
            }
        };

        let vertex_query = queries::vertex_indexes(ts);
        let edge_query = queries::edge_indexes(ts);
        let relation_query = queries::relation_indexes(ts);
        let (vertex, edge, relation) = futures::try_join!(
            self.rows::<GraphIndexRow>(&vertex_query),
            self.rows::<GraphIndexRow>(&edge_query),
            self.rows::<RelationIndexRow>(&relation_query),
        )?;
        let indexes = BucketIndexes::from_rows(vertex.into_iter().chain(edge).collect(), relation);
        self.progress
            .progress(&Progress::container("Indexes have been retrieved", db_name));

        Ok(GraphMeta {
            features,
            variables,
            configurations,
            property_keys,
            indexes,
        })
    }

    async fn connections_of(&self, label: EdgeLabelRow) -> Result<Vec<Connection>> {
        let ts = self.ts();
        let limit = self.config.relationship_probe_limit();

        let from_data = match self
            .rows::<ConnectionRow>(&queries::edge_connections_from_data(ts, &label.name, limit))
            .await
        {
            Ok(rows) => rows,
            Err(err) if err.is_connection() => return Err(err),
            Err(err) => {
                warn!(edge = %label.name, error = %err, "could not read connections from data");
                Vec::new()
            }
        };
        let from_schema = match self
            .rows::<ConnectionRow>(&queries::edge_connections_from_schema(ts, &label.name))
            .await
        {
            Ok(rows) => rows,
            Err(err) if err.is_connection() => return Err(err),
            Err(err) => {
                warn!(edge = %label.name, error = %err, "could not read connections from management");
                Vec::new()
            }
        };

        let mut rows: Vec<ConnectionRow> = Vec::new();
        for row in from_schema.into_iter().chain(from_data) {
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        Ok(rows
            .into_iter()
            .map(|row| Connection {
                row,
                label: label.clone(),
            })
            .collect())
    }

    async fn connections(&self, labels: &[String]) -> Result<Vec<Connection>> {
        let edge_labels = self.rows::<EdgeLabelRow>(&queries::edge_labels(self.ts())).await?;
        let per_label = try_join_all(edge_labels.into_iter().map(|label| self.connections_of(label))).await?;
        Ok(per_label
            .into_iter()
            .flatten()
            .filter(|c| labels.contains(&c.row.start) && labels.contains(&c.row.end))
            .collect())
    }

    async fn sample_schema(
        &self,
        element: Element,
        label: &str,
        limit: u64,
        property_keys: &PropertyMap,
        label_properties: &[String],
    ) -> Result<SampledSchema> {
        let ts = self.ts();
        let data = self
            .session
            .submit_first(&queries::graphson(&queries::data_query(ts, element, label, limit)))
            .await?;
        let metas = match element {
            Element::Vertex => {
                self.session
                    .submit_first(&queries::graphson(&queries::meta_properties(ts, label, limit)))
                    .await?
            }
            Element::Edge => Value::Null,
        };
        let template_keys = match self
            .session
            .submit(&queries::template_keys(ts, element, label, limit))
            .await
        {
            Ok(result) => result.to_array().iter().map(|k| value_text(&untag(k))).collect(),
            Err(err) if err.is_connection() => return Err(err),
            Err(err) => {
                debug!(label, error = %err, "template keys unavailable");
                Vec::new()
            }
        };

        match documents_schema(&data, property_keys, label_properties) {
            Ok(schema) => {
                let observations = collect_meta_properties(meta_properties_payload(&metas));
                Ok(SampledSchema {
                    schema: add_meta_properties(schema, &observations),
                    template_keys,
                })
            }
            Err(err) => {
                warn!(label, error = %err, "could not interpret sampled data, using an empty schema");
                Ok(SampledSchema::default())
            }
        }
    }

    async fn relationship_package(
        &self,
        db_name: &str,
        connection: &Connection,
        property_keys: &PropertyMap,
    ) -> Result<(RelationshipPackage, PropertySchema)> {
        let ts = self.ts();
        let ConnectionRow {
            relationship,
            start,
            end,
        } = &connection.row;
        let count = self
            .count(&queries::relationship_count(ts, relationship, start, end))
            .await?;
        let limit = self.config.limit(count);
        let documents: Vec<Value> = self
            .session
            .submit(&queries::relationship_documents(ts, relationship, start, end, limit))
            .await?
            .to_array()
            .iter()
            .map(plain_document)
            .collect();
        let sampled = self
            .sample_schema(
                Element::Edge,
                relationship,
                limit,
                property_keys,
                &connection.label.properties,
            )
            .await?;

        let document_template = self
            .config
            .field_inference
            .then(|| document_template(&documents, &sampled.template_keys));
        let package = RelationshipPackage {
            db_name: db_name.to_string(),
            parent_collection: start.clone(),
            relationship_name: relationship.clone(),
            child_collection: end.clone(),
            level: "entity".to_string(),
            documents,
            validation: Validation::for_schema(&sampled.schema)?,
            relationship_info: RelationshipInfo {
                bi_directional: !connection.label.is_unidirected,
                multiplicity: connection.label.multiplicity,
                edge_ttl: connection.label.edge_ttl,
            },
            document_template,
        };
        Ok((package, sampled.schema))
    }

    async fn label_package(
        &self,
        db_name: &str,
        label: &str,
        meta: &GraphMeta,
        relationship_definitions: &PropertyMap,
    ) -> Result<Option<LabelPackage>> {
        let ts = self.ts();
        self.progress
            .progress(&Progress::entity("Start sampling data", db_name, label));
        let count = self.count(&queries::node_count(ts, label)).await?;
        let limit = self.config.limit(count);

        self.progress
            .progress(&Progress::entity("Start getting data from graph", db_name, label));
        let documents: Vec<Value> = self
            .session
            .submit(&queries::node_documents(ts, label, limit))
            .await?
            .to_array()
            .iter()
            .map(plain_document)
            .collect();
        let vertex_label = self
            .rows::<VertexLabelRow>(&queries::vertex_label_data(ts, label))
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();
        let sampled = self
            .sample_schema(
                Element::Vertex,
                label,
                limit,
                &meta.property_keys,
                &vertex_label.properties,
            )
            .await?;
        self.progress
            .progress(&Progress::entity("Data has been sampled", db_name, label));

        if !self.config.include_empty_collection && is_empty_label(&documents) {
            debug!(label, "dropping empty label");
            return Ok(None);
        }

        let document_template = self
            .config
            .field_inference
            .then(|| document_template(&documents, &sampled.template_keys));
        Ok(Some(LabelPackage {
            db_name: db_name.to_string(),
            collection_name: label.to_string(),
            documents,
            views: Vec::new(),
            empty_bucket: false,
            entity_level: EntityLevel {
                static_vertex: vertex_label.static_vertex,
                vertex_ttl: vertex_label.ttl,
            },
            validation: Validation::for_schema(&sampled.schema)?,
            bucket_info: BucketInfo {
                indexes: meta.indexes.clone(),
                features: meta.features.clone(),
                graph_variables: meta.variables.clone(),
                graph_configurations: meta.configurations.clone(),
                traversal_source: db_name.to_string(),
            },
            model_definitions: ModelDefinitions::new(
                &meta.property_keys,
                relationship_definitions,
                &sampled.schema,
            ),
            document_template,
        }))
    }

    /// Sample the requested labels of one database.
    pub async fn sample_database(&self, request: &DatabaseRequest) -> Result<ReverseResult> {
        let db_name = request.name.as_str();
        let meta = self.graph_meta(db_name).await?;

        let connections = self.connections(&request.labels).await?;
        debug!(database = db_name, connections = connections.len(), "connections found");
        let sampled = try_join_all(
            connections
                .iter()
                .map(|c| self.relationship_package(db_name, c, &meta.property_keys)),
        )
        .await?;
        let (relationships, schemas): (Vec<_>, Vec<_>) = sampled.into_iter().unzip();
        let relationship_definitions = merge_all(schemas).properties;

        let labels = try_join_all(
            request
                .labels
                .iter()
                .map(|label| self.label_package(db_name, label, &meta, &relationship_definitions)),
        )
        .await?;

        Ok(ReverseResult {
            labels: labels.into_iter().flatten().collect(),
            relationships,
        })
    }

    /// Sample every requested database, one after the other.
    ///
    /// The first failing database stops the run.
    pub async fn sample(&self, requests: &[DatabaseRequest]) -> Result<ReverseResult> {
        let mut result = ReverseResult::default();
        for request in requests {
            match self.sample_database(request).await {
                Ok(database) => {
                    result.labels.extend(database.labels);
                    result.relationships.extend(database.relationships);
                }
                Err(err) => {
                    tracing::error!(database = %request.name, error = %err, "sampling failed");
                    return Err(err);
                }
            }
        }
        Ok(result)
    }
}

/// Sample `requests` with the default progress sink.
pub async fn reverse_engineer(
    session: &Session,
    requests: &[DatabaseRequest],
    config: &SamplingConfig,
) -> Result<ReverseResult> {
    Sampler::new(session, config, &super::progress::TracingProgress)
        .sample(requests)
        .await
}
