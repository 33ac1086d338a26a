// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::sync::Arc;

use super::GraftOutput;
use crate::errors::GraftError;
use crate::targeting::Namespace;
use crate::traits::Graft;

/// Re-homes another graft's output under a configured namespace.
///
/// Plain output moves under `namespace`; namespaced output is nested one
/// level further (`site` + `meta` becomes `site.meta`); empty output stays
/// empty.
pub struct ScopedGraft {
    inner: Arc<dyn Graft>,
    namespace: Namespace,
}

impl ScopedGraft {
    pub fn new(inner: Arc<dyn Graft>, namespace: Namespace) -> Self {
        Self { inner, namespace }
    }
}

#[async_trait]
impl Graft for ScopedGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        let output = match self.inner.run().await? {
            GraftOutput::Empty => GraftOutput::Empty,
            GraftOutput::Plain(facts) => GraftOutput::Namespaced(self.namespace.clone(), facts),
            GraftOutput::Namespaced(inner, facts) => {
                GraftOutput::Namespaced(self.namespace.join(&inner), facts)
            }
        };
        Ok(output)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
