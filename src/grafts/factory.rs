// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::builtin::*;
use super::ScopedGraft;
use crate::config::{GraftConfig, GraftType};
use crate::errors::ValidationError;
use crate::targeting::Namespace;
use crate::traits::Graft;

/// Factory for creating built-in graft instances from configuration
pub struct GraftFactory;

impl GraftFactory {
    /// Create a graft instance from configuration
    ///
    /// The `type` field in the config determines which graft to create:
    /// - "os" -> OsGraft
    /// - "cpu" -> CpuGraft
    /// - "hostname" -> HostnameGraft (optional `path` option)
    /// - "env" -> EnvGraft (requires `vars`, a list of variable names)
    /// - "user" -> UserFactsGraft (requires `path`)
    /// - "static" -> StaticGraft (the options are the facts)
    ///
    /// A configured `namespace` wraps the result in a [`ScopedGraft`]. The
    /// graft is named after the config `id`.
    pub fn create_graft(config: &GraftConfig) -> Result<Arc<dyn Graft>, ValidationError> {
        let id = config.id.as_str();

        let graft: Arc<dyn Graft> = match config.kind {
            GraftType::Os => Arc::new(OsGraft::new(id)),
            GraftType::Cpu => Arc::new(CpuGraft::new(id)),
            GraftType::Hostname => match string_option(config, "path")? {
                Some(path) => Arc::new(HostnameGraft::from_file(id, path)),
                None => Arc::new(HostnameGraft::new(id)),
            },
            GraftType::Env => {
                let vars = string_list_option(config, "vars")?.ok_or_else(|| missing(config, "vars"))?;
                Arc::new(EnvGraft::new(id, vars))
            }
            GraftType::User => {
                let path = string_option(config, "path")?.ok_or_else(|| missing(config, "path"))?;
                Arc::new(UserFactsGraft::new(id, path))
            }
            GraftType::Static => Arc::new(StaticGraft::new(id, config.options.clone())),
        };

        match &config.namespace {
            Some(namespace) => {
                let namespace =
                    Namespace::parse(namespace).map_err(|e| ValidationError::InvalidNamespace {
                        graft_id: config.id.clone(),
                        namespace: namespace.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(Arc::new(ScopedGraft::new(graft, namespace)))
            }
            None => Ok(graft),
        }
    }

    /// List all available graft types
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["os", "cpu", "hostname", "env", "user", "static"]
    }

    /// Check if a graft type is available
    pub fn is_implementation_available(kind: &str) -> bool {
        Self::list_available_implementations().contains(&kind)
    }
}

fn missing(config: &GraftConfig, option: &str) -> ValidationError {
    ValidationError::MissingOption {
        graft_id: config.id.clone(),
        option: option.to_string(),
    }
}

fn invalid(config: &GraftConfig, option: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidOption {
        graft_id: config.id.clone(),
        option: option.to_string(),
        reason: reason.to_string(),
    }
}

fn string_option<'a>(config: &'a GraftConfig, option: &str) -> Result<Option<&'a str>, ValidationError> {
    match config.options.get(option) {
        None => Ok(None),
        Some(value) => match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(Some(s)),
            Some(_) => Err(invalid(config, option, "must not be empty")),
            None => Err(invalid(config, option, "must be a string")),
        },
    }
}

fn string_list_option(config: &GraftConfig, option: &str) -> Result<Option<Vec<String>>, ValidationError> {
    let Some(value) = config.options.get(option) else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .ok_or_else(|| invalid(config, option, "must be a list of strings"))?;
    if items.is_empty() {
        return Err(invalid(config, option, "must not be empty"));
    }
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(config, option, "must be a list of strings"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}
