// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::targeting::Namespace;
use crate::traits::Graft;
use crate::Facts;

/// Build a `Facts` map from a `serde_json::json!` object literal.
pub fn facts(value: serde_json::Value) -> Facts {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A graft returning a fixed output, optionally after a delay
pub struct StubGraft {
    pub name: String,
    pub output: GraftOutput,
    pub delay: Duration,
}

impl StubGraft {
    pub fn plain(name: &str, facts: Facts) -> Self {
        Self {
            name: name.to_string(),
            output: GraftOutput::Plain(facts),
            delay: Duration::ZERO,
        }
    }

    pub fn namespaced(name: &str, namespace: &str, facts: Facts) -> Self {
        let namespace = Namespace::parse(namespace).expect("test namespace should parse");
        Self {
            name: name.to_string(),
            output: GraftOutput::Namespaced(namespace, facts),
            delay: Duration::ZERO,
        }
    }

    pub fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            output: GraftOutput::Empty,
            delay: Duration::ZERO,
        }
    }

    pub fn after(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn arc(self) -> Arc<dyn Graft> {
        Arc::new(self)
    }
}

#[async_trait]
impl Graft for StubGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.output.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A graft that always fails for testing failure isolation
pub struct FailingGraft {
    pub name: String,
}

impl FailingGraft {
    pub fn arc(name: &str) -> Arc<dyn Graft> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl Graft for FailingGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        Err(GraftError::Invalid("Simulated graft failure".to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A graft that panics mid-run
pub struct PanickingGraft {
    pub name: String,
}

impl PanickingGraft {
    pub fn arc(name: &str) -> Arc<dyn Graft> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl Graft for PanickingGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        panic!("simulated graft panic");
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A graft that holds its output until the test opens its gate
pub struct GatedGraft {
    pub name: String,
    pub gate: Arc<Notify>,
    pub output: GraftOutput,
}

impl GatedGraft {
    /// Returns the graft and the gate that releases it.
    pub fn plain(name: &str, facts: Facts) -> (Arc<dyn Graft>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let graft = Arc::new(Self {
            name: name.to_string(),
            gate: Arc::clone(&gate),
            output: GraftOutput::Plain(facts),
        });
        (graft, gate)
    }
}

#[async_trait]
impl Graft for GatedGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        self.gate.notified().await;
        Ok(self.output.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A graft that never completes
pub struct HangingGraft {
    pub name: String,
}

impl HangingGraft {
    pub fn arc(name: &str) -> Arc<dyn Graft> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl Graft for HangingGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        std::future::pending::<()>().await;
        Ok(GraftOutput::Empty)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
