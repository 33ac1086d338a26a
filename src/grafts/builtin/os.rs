// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::targeting::Namespace;
use crate::traits::Graft;
use crate::Facts;

/// Operating system facts under `os`: `name`, `family` and `arch`.
pub struct OsGraft {
    name: String,
}

impl OsGraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for OsGraft {
    fn default() -> Self {
        Self::new("os")
    }
}

#[async_trait]
impl Graft for OsGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        let mut facts = Facts::new();
        facts.insert("name".to_string(), Value::from(std::env::consts::OS));
        facts.insert("family".to_string(), Value::from(std::env::consts::FAMILY));
        facts.insert("arch".to_string(), Value::from(std::env::consts::ARCH));

        let namespace = Namespace::parse("os").map_err(|e| GraftError::Invalid(e.to_string()))?;
        Ok(GraftOutput::Namespaced(namespace, facts))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
