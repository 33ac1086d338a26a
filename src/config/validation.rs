// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for graft sets.
//!
//! Two checks run over every graft, and all problems are reported together:
//!
//! 1. **Uniqueness**: graft ids name grafts in logs and failures, so they must
//!    be unique.
//! 2. **Constructibility**: the graft's namespace must parse and its options
//!    must satisfy its type, checked by building it through [`GraftFactory`].
//!
//! Each problem is logged through the validation messages as it is found.
//!
//! ```rust
//! use facts::config::{validate_config, Config, GraftConfig, GraftType};
//!
//! let mut config = Config::default();
//! config.grafts.push(GraftConfig::new("os", GraftType::Os));
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

use std::collections::HashSet;

use crate::config::Config;
use crate::errors::ValidationError;
use crate::grafts::GraftFactory;
use crate::observability::messages::validation::{
    DuplicateGraftId, InvalidGraftOption, InvalidNamespaceDetected,
};
use crate::observability::messages::StructuredLog;

/// Validate every graft in `config`, returning all errors found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_graft_ids(config) {
        errors.extend(duplicate_errors);
    }

    for graft in &config.grafts {
        if let Err(error) = GraftFactory::create_graft(graft) {
            log_validation_error(&error);
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_graft_ids(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();

    for graft in &config.grafts {
        let id = graft.id.as_str();
        if !seen.insert(id) && reported.insert(id) {
            DuplicateGraftId { graft_id: id }.log();
            errors.push(ValidationError::DuplicateGraftId {
                graft_id: id.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn log_validation_error(error: &ValidationError) {
    match error {
        ValidationError::DuplicateGraftId { graft_id } => DuplicateGraftId { graft_id }.log(),
        ValidationError::InvalidNamespace {
            graft_id,
            namespace,
            reason,
        } => InvalidNamespaceDetected {
            graft_id,
            namespace,
            reason,
        }
        .log(),
        ValidationError::MissingOption { graft_id, option } => InvalidGraftOption {
            graft_id,
            option,
            reason: "required option is missing",
        }
        .log(),
        ValidationError::InvalidOption {
            graft_id,
            option,
            reason,
        } => InvalidGraftOption {
            graft_id,
            option,
            reason,
        }
        .log(),
    }
}
