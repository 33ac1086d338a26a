// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;

/// An independent producer of facts.
///
/// Grafts take no arguments. Each one does its own probing and completes
/// with a [`GraftOutput`]. The accumulator runs every graft of a pass concurrently,
/// so implementations must not depend on each other.
#[async_trait]
pub trait Graft: Send + Sync {
    async fn run(&self) -> Result<GraftOutput, GraftError>;

    fn name(&self) -> &str;
}
