// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{validate_config, Config};
use crate::errors::ConfigError;
use crate::grafts::{GraftFactory, GraftSet};

/// Resolves grafts from config into runtime instances, in configuration order
pub fn build_graft_set(cfg: &Config) -> Result<GraftSet, ConfigError> {
    validate_config(cfg).map_err(ConfigError::Validation)?;

    cfg.grafts
        .iter()
        .map(|graft| GraftFactory::create_graft(graft).map_err(|e| ConfigError::Validation(vec![e])))
        .collect()
}
