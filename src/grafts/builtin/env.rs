// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::targeting::Namespace;
use crate::traits::Graft;
use crate::Facts;

/// Selected environment variables under `env`.
///
/// Variables that are unset, or not valid unicode, are left out.
pub struct EnvGraft {
    name: String,
    vars: Vec<String>,
}

impl EnvGraft {
    pub fn new(name: impl Into<String>, vars: Vec<String>) -> Self {
        Self {
            name: name.into(),
            vars,
        }
    }
}

#[async_trait]
impl Graft for EnvGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        let facts: Facts = self
            .vars
            .iter()
            .filter_map(|var| {
                std::env::var(var)
                    .ok()
                    .map(|value| (var.clone(), Value::from(value)))
            })
            .collect();

        let namespace = Namespace::parse("env").map_err(|e| GraftError::Invalid(e.to_string()))?;
        Ok(GraftOutput::Namespaced(namespace, facts))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
