// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // config loading + graft registry
pub mod engine;        // concurrent accumulator
pub mod errors;        // error handling
pub mod grafts;        // fact producers
pub mod logical;       // query surface
pub mod observability;
pub mod targeting;     // dotted path expressions
pub mod traits;        // graft abstraction

pub use serde_json::Value;

/// Ordered mapping of fact names to values.
pub type Facts = serde_json::Map<String, Value>;

pub use engine::Accumulator;
pub use logical::Logical;
pub use targeting::{Namespace, Target};
