// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Path expressions for addressing facts.
//!
//! A [`Target`] is compiled once from a string such as `cpu.cores` or
//! `os.family=linux` and can then be evaluated any number of times:
//!
//! * `read` returns the value at the path and fails with
//!   [`TargetError::NotFound`](crate::errors::TargetError::NotFound) when it is absent.
//! * `matches` answers a yes/no question and treats an absent fact as `false`.
//!
//! A [`Namespace`] uses the same grammar without the `=value` part and tells
//! the accumulator where to nest a graft's facts.
//!
//! # Grammar
//!
//! ```text
//! target    := path [ "=" literal ]
//! path      := segment { "." segment }
//! segment   := one or more characters other than "." and "="
//! ```
//!
//! The expression is split on the first `=`, so literals may contain dots
//! (`os.version=10.15`) or further `=` signs. Whitespace around the path is
//! ignored; the literal is everything after the `=`, spaces included, so
//! `motd= hi` expects `" hi"`.

mod namespace;
mod target;
mod value;

pub use namespace::Namespace;
pub use target::Target;
pub use value::{is_truthy, normalize};

/// Separates path segments.
pub const PATH_SEPARATOR: char = '.';
/// Separates the path from the expected literal.
pub const VALUE_SEPARATOR: char = '=';
