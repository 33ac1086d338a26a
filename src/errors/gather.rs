// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failures isolated by the accumulator during a gathering pass.

use std::time::Duration;
use thiserror::Error;

/// A graft that did not contribute its facts to the merged mapping.
///
/// None of these abort a gathering pass. The accumulator logs them, keeps
/// them for inspection through `Accumulator::failures`, and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatherError {
    /// The graft returned an error.
    #[error("Graft '{graft}' failed: {message}")]
    GraftFailed { graft: String, message: String },

    /// The graft panicked while running.
    #[error("Graft '{graft}' panicked")]
    GraftPanicked { graft: String },

    /// The graft task was cancelled before it finished.
    #[error("Graft '{graft}' was cancelled")]
    GraftCancelled { graft: String },

    /// The graft did not finish within the configured timeout and was aborted.
    #[error("Graft '{graft}' timed out after {timeout:?}")]
    GraftTimedOut { graft: String, timeout: Duration },

    /// The graft's namespace runs into a value that is not a mapping.
    #[error(
        "Graft '{graft}' namespace '{namespace}' collides with a non-mapping value at '{segment}'"
    )]
    StructuralCollision {
        graft: String,
        namespace: String,
        segment: String,
    },
}

impl GatherError {
    /// Name of the graft this failure belongs to.
    pub fn graft(&self) -> &str {
        match self {
            GatherError::GraftFailed { graft, .. }
            | GatherError::GraftPanicked { graft }
            | GatherError::GraftCancelled { graft }
            | GatherError::GraftTimedOut { graft, .. }
            | GatherError::StructuralCollision { graft, .. } => graft,
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, GatherError::StructuralCollision { .. })
    }
}
