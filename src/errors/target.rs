// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for parsing and resolving path expressions.

use thiserror::Error;

/// Errors produced by [`Target`](crate::targeting::Target) parsing and reads.
///
/// `NotFound` only ever comes out of `read`; `matches` turns an absent fact
/// into `false` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The expression could not be parsed into a non-empty list of segments.
    #[error("Malformed target '{expression}': {reason}")]
    Malformed {
        expression: String,
        reason: &'static str,
    },

    /// The path does not resolve in the fact mapping.
    #[error("Fact '{path}' not found: no value at segment '{segment}'")]
    NotFound { path: String, segment: String },
}

impl TargetError {
    pub(crate) fn malformed(expression: &str, reason: &'static str) -> Self {
        TargetError::Malformed {
            expression: expression.to_string(),
            reason,
        }
    }

    /// True when the error means "fact absent" rather than a bad expression.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TargetError::NotFound { .. })
    }
}
