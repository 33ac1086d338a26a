// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational log lines in this crate go through the
//! message types in [`messages`]. Each message is a small struct with a
//! `Display` implementation and a [`StructuredLog`](messages::StructuredLog)
//! implementation that emits a `tracing` event with typed fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::gather` - gathering pass lifecycle (start, completion)
//! * `messages::graft` - individual graft spawn, completion and failure
//! * `messages::validation` - configuration validation errors
//!
//! # Usage
//!
//! ```rust
//! use facts::observability::messages::graft::GraftSpawned;
//! use facts::observability::messages::StructuredLog;
//!
//! let msg = GraftSpawned {
//!     graft: "cpu",
//!     pending: 3,
//! };
//!
//! msg.log();
//! ```
//!
//! Installing a subscriber is left to the binary, which uses
//! `tracing-subscriber` with an `EnvFilter` read from `RUST_LOG`.

pub mod messages;
