// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Fact producers and the types they exchange with the accumulator.
//!
//! # Producer results
//!
//! Every graft completes with one of three shapes:
//!
//! * [`GraftOutput::Empty`] - nothing to contribute
//! * [`GraftOutput::Plain`] - keys merged directly into the top level
//! * [`GraftOutput::Namespaced`] - keys nested under a [`Namespace`]
//!
//! # Built-in grafts
//!
//! The [`builtin`] module carries a handful of small fact sources (`os`, `cpu`,
//! `hostname`, `env`, `user`, `static`) that [`GraftFactory`] builds from
//! configuration. Anything else implements [`Graft`] directly or wraps a
//! closure in [`FnGraft`].
//!
//! ```
//! use facts::grafts::{FnGraft, GraftOutput, GraftSet};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let mut grafts = GraftSet::new();
//! grafts.push(Arc::new(FnGraft::new("answer", || async {
//!     let answer = json!({"answer": 42}).as_object().cloned().unwrap_or_default();
//!     Ok::<_, facts::errors::GraftError>(GraftOutput::Plain(answer))
//! })));
//! assert_eq!(grafts.len(), 1);
//! ```

pub mod builtin;
pub mod factory;
mod scoped;
#[cfg(test)]
pub mod stub;

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::errors::GraftError;
use crate::targeting::Namespace;
use crate::traits::Graft;
use crate::Facts;

pub use factory::GraftFactory;
pub use scoped::ScopedGraft;

/// Result of running a graft.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GraftOutput {
    #[default]
    Empty,
    Plain(Facts),
    Namespaced(Namespace, Facts),
}

impl GraftOutput {
    pub fn is_empty(&self) -> bool {
        matches!(self, GraftOutput::Empty)
    }
}

impl From<Option<Facts>> for GraftOutput {
    fn from(facts: Option<Facts>) -> Self {
        facts.map_or(GraftOutput::Empty, GraftOutput::Plain)
    }
}

/// Newtype wrapper for the enumerable set of grafts run in one pass
#[derive(Clone, Default)]
pub struct GraftSet(pub Vec<Arc<dyn Graft>>);

impl GraftSet {
    /// Create a new empty graft set
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a graft to the set
    pub fn push(&mut self, graft: Arc<dyn Graft>) {
        self.0.push(graft);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Graft>> {
        self.0.iter()
    }

    /// Get all graft names, in set order
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|g| g.name()).collect()
    }
}

impl std::fmt::Debug for GraftSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraftSet")
            .field("graft_count", &self.0.len())
            .field("graft_names", &self.names())
            .finish()
    }
}

impl From<Vec<Arc<dyn Graft>>> for GraftSet {
    fn from(grafts: Vec<Arc<dyn Graft>>) -> Self {
        Self(grafts)
    }
}

impl FromIterator<Arc<dyn Graft>> for GraftSet {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Graft>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for GraftSet {
    type Item = Arc<dyn Graft>;
    type IntoIter = std::vec::IntoIter<Arc<dyn Graft>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Adapts a zero-argument async closure into a [`Graft`].
pub struct FnGraft<F> {
    name: String,
    f: F,
}

impl<F, Fut> FnGraft<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<GraftOutput, GraftError>> + Send + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F, Fut> Graft for FnGraft<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<GraftOutput, GraftError>> + Send + 'static,
{
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        (self.f)().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
