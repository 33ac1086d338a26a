// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure raised by a graft while producing its facts.
///
/// What goes wrong inside a graft is the graft's own business; the
/// accumulator only records the message and moves on.
#[derive(Error, Debug)]
pub enum GraftError {
    /// File or system I/O failed while probing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML document could not be parsed into facts.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The graft produced or received data it cannot use.
    #[error("Invalid data: {0}")]
    Invalid(String),
}
