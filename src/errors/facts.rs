// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::{GatherError, TargetError};

/// Errors surfaced by the [`Logical`](crate::logical::Logical) query surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactsError {
    /// The target expression was malformed, or `read` found nothing.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Namespaces collided and the pass was configured to treat that as fatal.
    #[error("Structural collisions while gathering facts: {}", describe(.0))]
    Collisions(Vec<GatherError>),
}

fn describe(errors: &[GatherError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
