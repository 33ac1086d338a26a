// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::config::consts::{HOSTNAME_ENV_VAR, HOSTNAME_PATH};
use crate::errors::GraftError;
use crate::grafts::GraftOutput;
use crate::traits::Graft;
use crate::Facts;

/// Top-level `hostname` fact.
///
/// Taken from the `HOSTNAME` environment variable when it is set and not
/// blank, otherwise from the first line of `/etc/hostname`. When neither
/// source exists the graft contributes nothing.
pub struct HostnameGraft {
    name: String,
    env_var: Option<String>,
    path: PathBuf,
}

impl HostnameGraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            env_var: Some(HOSTNAME_ENV_VAR.to_string()),
            path: PathBuf::from(HOSTNAME_PATH),
        }
    }

    /// Read only from `path`, ignoring the environment.
    pub fn from_file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            env_var: None,
            path: path.into(),
        }
    }

    fn env_hostname(&self) -> Option<String> {
        let var = self.env_var.as_deref()?;
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    async fn file_hostname(&self) -> Result<Option<String>, GraftError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(contents
                .lines()
                .next()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for HostnameGraft {
    fn default() -> Self {
        Self::new("hostname")
    }
}

#[async_trait]
impl Graft for HostnameGraft {
    async fn run(&self) -> Result<GraftOutput, GraftError> {
        let hostname = match self.env_hostname() {
            Some(hostname) => Some(hostname),
            None => self.file_hostname().await?,
        };

        Ok(hostname
            .map(|hostname| {
                let mut facts = Facts::new();
                facts.insert("hostname".to_string(), Value::from(hostname));
                facts
            })
            .into())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_hostname_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  build-01  ").unwrap();
        writeln!(file, "ignored").unwrap();

        let graft = HostnameGraft::from_file("hostname", file.path());

        match graft.run().await.unwrap() {
            GraftOutput::Plain(facts) => assert_eq!(facts.get("hostname"), Some(&json!("build-01"))),
            other => panic!("expected plain output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_hostname_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let graft = HostnameGraft::from_file("hostname", dir.path().join("absent"));

        assert!(graft.run().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_hostname_file_is_empty() {
        let file = NamedTempFile::new().unwrap();
        let graft = HostnameGraft::from_file("hostname", file.path());

        assert!(graft.run().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_hostname_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let graft = HostnameGraft::from_file("hostname", dir.path());

        assert!(matches!(graft.run().await, Err(GraftError::Io(_))));
    }
}
