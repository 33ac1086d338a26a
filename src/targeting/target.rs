// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::value::{is_truthy, normalize};
use super::{PATH_SEPARATOR, VALUE_SEPARATOR};
use crate::errors::TargetError;
use crate::Facts;

/// A compiled path expression, optionally carrying an expected value.
///
/// Always holds at least one non-empty segment. Once parsed it is immutable
/// and can be shared and reused across gathering passes.
///
/// # Examples
///
/// ```
/// use facts::targeting::Target;
/// use serde_json::json;
///
/// let facts = json!({"a": {"b": 3}}).as_object().cloned().unwrap();
///
/// let target = Target::parse("a.b").unwrap();
/// assert_eq!(target.read(&facts).unwrap(), &json!(3));
///
/// assert!(Target::parse("a.b=3").unwrap().matches(&facts));
/// assert!(!Target::parse("a.c").unwrap().matches(&facts));
/// assert!(Target::parse("a.c").unwrap().read(&facts).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    segments: Vec<String>,
    expected: Option<String>,
}

impl Target {
    /// Parse `path` or `path=value`.
    ///
    /// Whitespace around the path is ignored. The value is kept exactly as
    /// written after the first `=`.
    pub fn parse(expression: &str) -> Result<Self, TargetError> {
        if expression.trim().is_empty() {
            return Err(TargetError::malformed(expression, "empty expression"));
        }

        let (path, expected) = match expression.split_once(VALUE_SEPARATOR) {
            Some((path, value)) => (path.trim(), Some(value.to_string())),
            None => (expression.trim(), None),
        };

        if path.is_empty() {
            return Err(TargetError::malformed(expression, "empty path"));
        }

        let segments = path
            .split(PATH_SEPARATOR)
            .map(|segment| {
                if segment.is_empty() {
                    Err(TargetError::malformed(expression, "empty path segment"))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments, expected })
    }

    /// Build a target from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        let expression = segments.join(".");

        if segments.is_empty() {
            return Err(TargetError::malformed(&expression, "empty path"));
        }
        for segment in &segments {
            if segment.is_empty() {
                return Err(TargetError::malformed(&expression, "empty path segment"));
            }
            if segment.contains(PATH_SEPARATOR) || segment.contains(VALUE_SEPARATOR) {
                return Err(TargetError::malformed(
                    &expression,
                    "segment contains a separator",
                ));
            }
        }

        Ok(Self {
            segments,
            expected: None,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }

    /// The dotted path without the expected literal.
    pub fn path(&self) -> String {
        self.segments.join(".")
    }

    /// Return the value at this path, or `NotFound` naming the first missing segment.
    pub fn read<'a>(&self, facts: &'a Facts) -> Result<&'a Value, TargetError> {
        self.resolve(facts).map_err(|segment| TargetError::NotFound {
            path: self.path(),
            segment: segment.to_string(),
        })
    }

    /// Test the facts against this target.
    ///
    /// Absent paths never match. With an expected literal the located value
    /// must equal it after [`normalize`]; without one it must be truthy.
    pub fn matches(&self, facts: &Facts) -> bool {
        match (self.resolve(facts), &self.expected) {
            (Err(_), _) => false,
            (Ok(value), Some(expected)) => normalize(value) == expected.as_str(),
            (Ok(value), None) => is_truthy(value),
        }
    }

    /// Walk the facts. On failure returns the segment that could not be found.
    fn resolve<'a, 's>(&'s self, facts: &'a Facts) -> Result<&'a Value, &'s str> {
        let mut map = facts;
        for (index, segment) in self.segments.iter().enumerate() {
            let value = map.get(segment).ok_or(segment.as_str())?;
            match (self.segments.get(index + 1), value) {
                (None, value) => return Ok(value),
                (Some(_), Value::Object(inner)) => map = inner,
                (Some(next), _) => return Err(next.as_str()),
            }
        }
        // Parsing guarantees at least one segment.
        Err(self.segments.first().map(String::as_str).unwrap_or_default())
    }
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::parse(s)
    }
}

impl TryFrom<&str> for Target {
    type Error = TargetError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Target::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())?;
        if let Some(expected) = &self.expected {
            write!(f, "{}{}", VALUE_SEPARATOR, expected)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Target {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
