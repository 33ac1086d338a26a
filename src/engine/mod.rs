// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concurrent gathering engine.
//!
//! [`Accumulator`] fans grafts out onto a tokio runtime and folds their
//! results into one fact mapping using the policy in `merge`.

mod accumulator;
pub(crate) mod merge;

pub use accumulator::Accumulator;
