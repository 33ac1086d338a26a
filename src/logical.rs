// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Query surface over a gathering pass.
//!
//! [`Logical`] owns a [`GraftSet`] and runs every graft through a fresh
//! [`Accumulator`] each time facts are requested, so every query sees the
//! system as it is now. Target expressions are parsed before any graft runs:
//! a malformed expression costs nothing.
//!
//! ```rust
//! use facts::grafts::{FnGraft, GraftOutput, GraftSet};
//! use facts::logical::Logical;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), facts::errors::FactsError> {
//! let mut grafts = GraftSet::new();
//! grafts.push(Arc::new(FnGraft::new("os", || async {
//!     let os = json!({"os": {"family": "linux"}}).as_object().cloned().unwrap_or_default();
//!     Ok::<_, facts::errors::GraftError>(GraftOutput::Plain(os))
//! })));
//!
//! let logical = Logical::new(grafts, tokio::runtime::Handle::current());
//! assert_eq!(logical.read("os.family").await?, json!("linux"));
//! assert!(logical.matches("os.family=linux").await?);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::Instrument;

use crate::config::{build_graft_set, Config, GatherOptions};
use crate::engine::Accumulator;
use crate::errors::{ConfigError, FactsError, GatherError};
use crate::grafts::GraftSet;
use crate::observability::messages::gather::{GatherCompleted, GatherStarted};
use crate::observability::messages::StructuredLog;
use crate::targeting::Target;
use crate::Facts;

/// Runs gathering passes and answers queries against their results.
#[derive(Debug, Clone)]
pub struct Logical {
    grafts: GraftSet,
    handle: Handle,
    options: GatherOptions,
}

impl Logical {
    /// Gather with `grafts` on `handle`, using the default [`GatherOptions`].
    pub fn new(grafts: GraftSet, handle: Handle) -> Self {
        Self {
            grafts,
            handle,
            options: GatherOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GatherOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the graft set and options from a validated configuration.
    pub fn from_config(config: &Config, handle: Handle) -> Result<Self, ConfigError> {
        let grafts = build_graft_set(config)?;
        Ok(Self::new(grafts, handle).with_options(config.gather.clone()))
    }

    pub fn grafts(&self) -> &GraftSet {
        &self.grafts
    }

    pub fn options(&self) -> &GatherOptions {
        &self.options
    }

    /// Run one gathering pass and return the merged facts.
    ///
    /// Failing grafts are logged and skipped. Only structural collisions can
    /// fail the pass, and only when `fail_on_collision` is set.
    pub async fn gather(&self) -> Result<Facts, FactsError> {
        let started = Instant::now();
        let start = GatherStarted {
            graft_count: self.grafts.len(),
        };
        start.log();

        let accumulator = Accumulator::with_timeout(self.handle.clone(), self.options.timeout());
        for graft in self.grafts.iter() {
            accumulator.spawn(Arc::clone(graft));
        }
        let facts = accumulator.join().instrument(start.span("gather")).await;
        let failures = accumulator.failures();

        GatherCompleted {
            fact_count: facts.len(),
            failure_count: failures.len(),
            duration: started.elapsed(),
        }
        .log();

        if self.options.fail_on_collision {
            let collisions: Vec<GatherError> =
                failures.into_iter().filter(GatherError::is_collision).collect();
            if !collisions.is_empty() {
                return Err(FactsError::Collisions(collisions));
            }
        }

        Ok(facts)
    }

    /// Top-level facts from a fresh pass, in insertion order.
    pub async fn items(&self) -> Result<Vec<(String, Value)>, FactsError> {
        Ok(self.gather().await?.into_iter().collect())
    }

    /// Value at `path` after a fresh pass. Missing paths are an error.
    ///
    /// An `=value` suffix on `path` is accepted and ignored.
    pub async fn read(&self, path: &str) -> Result<Value, FactsError> {
        let target = Target::parse(path)?;
        let facts = self.gather().await?;
        Ok(target.read(&facts)?.clone())
    }

    /// Whether `expression` holds after a fresh pass.
    ///
    /// Only a malformed expression is an error; a missing path is `false`.
    pub async fn matches(&self, expression: &str) -> Result<bool, FactsError> {
        let target = Target::parse(expression)?;
        let facts = self.gather().await?;
        Ok(target.matches(&facts))
    }
}
