// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::traits::Graft;

/// Operator-maintained facts loaded from a YAML file.
///
/// The document must be a mapping; its keys are merged at the top level. A
/// missing file contributes nothing, any other read or parse problem fails
/// the graft.
///
/// ```yaml
/// role: database
/// rack:
///   row: 4
///   slot: 12
/// ```
pub struct UserFactsGraft {
    name: String,
    path: PathBuf,
}

impl UserFactsGraft {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl Graft for UserFactsGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(GraftOutput::Empty),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            return Ok(GraftOutput::Empty);
        }

        match serde_yaml::from_str::<Value>(&contents)? {
            Value::Object(facts) => Ok(GraftOutput::Plain(facts)),
            Value::Null => Ok(GraftOutput::Empty),
            other => Err(GraftError::Invalid(format!(
                "user facts in '{}' must be a mapping, found {}",
                self.path.display(),
                kind_of(&other)
            ))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
