// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for gathering pass lifecycle events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Gathering pass started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use facts::observability::messages::gather::GatherStarted;
///
/// let msg = GatherStarted { graft_count: 5 };
///
/// tracing::info!("{}", msg);
/// ```
pub struct GatherStarted {
    pub graft_count: usize,
}

impl Display for GatherStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Gathering facts from {} grafts", self.graft_count)
    }
}

impl StructuredLog for GatherStarted {
    fn log(&self) {
        tracing::info!(graft_count = self.graft_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("gather", span_name = name, graft_count = self.graft_count)
    }
}

/// Gathering pass completed; every spawned graft has finished.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use facts::observability::messages::gather::GatherCompleted;
/// use std::time::Duration;
///
/// let msg = GatherCompleted {
///     fact_count: 12,
///     failure_count: 1,
///     duration: Duration::from_millis(40),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct GatherCompleted {
    pub fact_count: usize,
    pub failure_count: usize,
    pub duration: std::time::Duration,
}

impl Display for GatherCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Gathered {} top-level facts in {:?} ({} grafts failed)",
            self.fact_count, self.duration, self.failure_count
        )
    }
}

impl StructuredLog for GatherCompleted {
    fn log(&self) {
        tracing::info!(
            fact_count = self.fact_count,
            failure_count = self.failure_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "gather_completed",
            span_name = name,
            fact_count = self.fact_count,
            failure_count = self.failure_count,
            duration = ?self.duration,
        )
    }
}
