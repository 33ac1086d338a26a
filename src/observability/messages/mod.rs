// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `gather` - gathering pass lifecycle events
//! * `graft` - graft execution and merge events
//! * `validation` - configuration validation errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use facts::observability::messages::gather::GatherStarted;
//!
//! let msg = GatherStarted { graft_count: 5 };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod gather;
pub mod graft;
pub mod validation;

use tracing::Span;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog: std::fmt::Display {
    /// Emit the message as a `tracing` event at its level.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
