// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::targeting::Namespace;
use crate::traits::Graft;
use crate::Facts;

/// CPU facts under `cpu`. Currently only `cores`, the available parallelism.
pub struct CpuGraft {
    name: String,
}

impl CpuGraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for CpuGraft {
    fn default() -> Self {
        Self::new("cpu")
    }
}

#[async_trait]
impl Graft for CpuGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        let cores = std::thread::available_parallelism()?.get();

        let mut facts = Facts::new();
        facts.insert("cores".to_string(), Value::from(cores));

        let namespace = Namespace::parse("cpu").map_err(|e| GraftError::Invalid(e.to_string()))?;
        Ok(GraftOutput::Namespaced(namespace, facts))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
