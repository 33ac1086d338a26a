// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graft execution and merge events.
//!
//! This module contains message types for logging events related to:
//! * Graft scheduling
//! * Graft completion and the merge of its facts
//! * Graft failures isolated by the accumulator

use crate::errors::GatherError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Graft scheduled on the runtime.
///
/// # Log Level
/// `debug!` - Detailed scheduling information
pub struct GraftSpawned<'a> {
    pub graft: &'a str,
    pub pending: usize,
}

impl Display for GraftSpawned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Graft '{}' spawned: {} pending", self.graft, self.pending)
    }
}

impl StructuredLog for GraftSpawned<'_> {
    fn log(&self) {
        tracing::debug!(graft = self.graft, pending = self.pending, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "graft_spawned",
            span_name = name,
            graft = self.graft,
            pending = self.pending,
        )
    }
}

/// Graft finished and its facts were merged.
///
/// # Log Level
/// `debug!` - Detailed execution information
///
/// # Example
/// ```
/// use facts::observability::messages::graft::GraftCompleted;
/// use std::time::Duration;
///
/// let msg = GraftCompleted {
///     graft: "cpu",
///     namespace: Some("cpu"),
///     merged_keys: 2,
///     pending: 0,
///     duration: Duration::from_millis(3),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct GraftCompleted<'a> {
    pub graft: &'a str,
    pub namespace: Option<&'a str>,
    pub merged_keys: usize,
    pub pending: usize,
    pub duration: std::time::Duration,
}

impl Display for GraftCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.namespace {
            Some(namespace) => write!(
                f,
                "Graft '{}' merged {} keys under '{}' in {:?}",
                self.graft, self.merged_keys, namespace, self.duration
            ),
            None => write!(
                f,
                "Graft '{}' merged {} keys in {:?}",
                self.graft, self.merged_keys, self.duration
            ),
        }
    }
}

impl StructuredLog for GraftCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            graft = self.graft,
            namespace = self.namespace,
            merged_keys = self.merged_keys,
            pending = self.pending,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "graft_completed",
            span_name = name,
            graft = self.graft,
            merged_keys = self.merged_keys,
            duration = ?self.duration,
        )
    }
}

/// Graft did not contribute its facts.
///
/// # Log Level
/// `error!` for structural collisions, which are authoring bugs.
/// `warn!` otherwise; gathering is best-effort and carries on.
pub struct GraftFailed<'a> {
    pub error: &'a GatherError,
    pub pending: usize,
}

impl Display for GraftFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl StructuredLog for GraftFailed<'_> {
    fn log(&self) {
        if self.error.is_collision() {
            tracing::error!(
                graft = self.error.graft(),
                pending = self.pending,
                error = %self.error,
                "{}", self
            );
        } else {
            tracing::warn!(
                graft = self.error.graft(),
                pending = self.pending,
                error = %self.error,
                "{}", self
            );
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "graft_failed",
            span_name = name,
            graft = self.error.graft(),
            error = %self.error,
        )
    }
}
