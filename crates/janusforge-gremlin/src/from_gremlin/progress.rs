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


//! Progress reporting during a sampling run.

use tracing::info;

/// One progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// What happened.
    pub message: String,
    /// Database being sampled.
    pub container: String,
    /// Label being sampled; empty for database-level events.
    pub entity: String,
}

impl Progress {
    /// A database-level event.
    pub fn container(message: impl Into<String>, container: impl Into<String>) -> Self {
        Self::entity(message, container, "")
    }

    /// A label-level event.
    pub fn entity(
        message: impl Into<String>,
        container: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            container: container.into(),
            entity: entity.into(),
        }
    }
}

/// Receiver of progress events.
pub trait ProgressSink: Send + Sync {
    /// Report one event.
    fn progress(&self, progress: &Progress);
}

/// Forwards progress to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn progress(&self, progress: &Progress) {
        info!(
            container = %progress.container,
            entity = %progress.entity,
            "{}",
            progress.message
        );
    }
}

impl<F> ProgressSink for F
where
    F: Fn(&Progress) + Send + Sync,
{
    fn progress(&self, progress: &Progress) {
        self(progress)
    }
}
