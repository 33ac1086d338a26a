// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use super::Target;
use crate::errors::TargetError;

/// Where a graft's facts are nested inside the merged mapping.
///
/// Namespaces of any depth are supported: `net.eth0.ipv4` nests the facts
/// three maps deep, creating each level that does not exist yet. A namespace
/// is a [`Target`] without an expected value, and walking it yields its
/// segments in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(Target);

impl Namespace {
    pub fn parse(expression: &str) -> Result<Self, TargetError> {
        let target = Target::parse(expression)?;
        if target.expected().is_some() {
            return Err(TargetError::malformed(
                expression,
                "a namespace cannot carry an expected value",
            ));
        }
        Ok(Self(target))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Target::from_segments(segments).map(Self)
    }

    /// This namespace followed by `inner`, e.g. `site` + `meta` = `site.meta`.
    pub fn join(&self, inner: &Namespace) -> Namespace {
        let segments = self.iter().chain(inner.iter()).cloned().collect::<Vec<_>>();
        Self::from_segments(segments).unwrap_or_else(|_| self.clone())
    }

    pub fn segments(&self) -> &[String] {
        self.0.segments()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl FromStr for Namespace {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::parse(s)
    }
}

impl TryFrom<&str> for Namespace {
    type Error = TargetError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Namespace::parse(s)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.path())
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
