// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::traits::Graft;
use crate::Facts;

/// Facts written directly in configuration, returned as-is.
pub struct StaticGraft {
    name: String,
    facts: Facts,
}

impl StaticGraft {
    pub fn new(name: impl Into<String>, facts: Facts) -> Self {
        Self {
            name: name.into(),
            facts,
        }
    }
}

#[async_trait]
impl Graft for StaticGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        Ok(GraftOutput::Plain(self.facts.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
