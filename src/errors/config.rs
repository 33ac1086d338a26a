// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors found while validating a graft configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two grafts share the same ID
    DuplicateGraftId {
        /// The duplicate graft ID
        graft_id: String,
    },
    /// A graft declares a namespace that cannot be parsed
    InvalidNamespace {
        /// The graft declaring the namespace
        graft_id: String,
        /// The namespace as written in the configuration
        namespace: String,
        /// Why the namespace was rejected
        reason: String,
    },
    /// A graft type requires an option the configuration does not provide
    MissingOption {
        graft_id: String,
        option: String,
    },
    /// An option is present but has the wrong shape
    InvalidOption {
        graft_id: String,
        option: String,
        reason: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateGraftId { graft_id } => {
                write!(f, "Duplicate graft ID: '{}'", graft_id)
            }
            ValidationError::InvalidNamespace {
                graft_id,
                namespace,
                reason,
            } => {
                write!(
                    f,
                    "Graft '{}' has invalid namespace '{}': {}",
                    graft_id, namespace, reason
                )
            }
            ValidationError::MissingOption { graft_id, option } => {
                write!(f, "Graft '{}' is missing required option '{}'", graft_id, option)
            }
            ValidationError::InvalidOption {
                graft_id,
                option,
                reason,
            } => {
                write!(
                    f,
                    "Graft '{}' has invalid option '{}': {}",
                    graft_id, option, reason
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Validation(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
