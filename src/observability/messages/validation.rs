// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation errors.
//!
//! This module contains message types for logging events related to:
//! * Duplicate graft ID detection
//! * Namespace validation
//! * Graft option validation

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Duplicate graft ID detected in configuration.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use facts::observability::messages::validation::DuplicateGraftId;
///
/// let msg = DuplicateGraftId { graft_id: "os" };
///
/// tracing::error!("{}", msg);
/// ```
pub struct DuplicateGraftId<'a> {
    pub graft_id: &'a str,
}

impl Display for DuplicateGraftId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate graft ID: '{}'", self.graft_id)
    }
}

impl StructuredLog for DuplicateGraftId<'_> {
    fn log(&self) {
        tracing::error!(graft_id = self.graft_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            graft_id = self.graft_id,
        )
    }
}

/// Graft namespace in configuration does not parse.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct InvalidNamespaceDetected<'a> {
    pub graft_id: &'a str,
    pub namespace: &'a str,
    pub reason: &'a str,
}

impl Display for InvalidNamespaceDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graft '{}' has invalid namespace '{}': {}",
            self.graft_id, self.namespace, self.reason
        )
    }
}

impl StructuredLog for InvalidNamespaceDetected<'_> {
    fn log(&self) {
        tracing::error!(
            graft_id = self.graft_id,
            namespace = self.namespace,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            graft_id = self.graft_id,
            namespace = self.namespace,
        )
    }
}

/// Graft option missing or malformed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use facts::observability::messages::validation::InvalidGraftOption;
///
/// let msg = InvalidGraftOption {
///     graft_id: "user",
///     option: "path",
///     reason: "required option is missing",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct InvalidGraftOption<'a> {
    pub graft_id: &'a str,
    pub option: &'a str,
    pub reason: &'a str,
}

impl Display for InvalidGraftOption<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graft '{}' option '{}': {}",
            self.graft_id, self.option, self.reason
        )
    }
}

impl StructuredLog for InvalidGraftOption<'_> {
    fn log(&self) {
        tracing::error!(
            graft_id = self.graft_id,
            option = self.option,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            graft_id = self.graft_id,
            option = self.option,
        )
    }
}
