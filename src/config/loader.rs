// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::DEFAULT_TIMEOUT_SECONDS;
use crate::errors::ConfigError;
use crate::Facts;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for a gathering pass.
///
/// Describes which grafts run and how the pass treats them. It is typically
/// loaded from a YAML file; files ending in `.toml` are read as TOML.
///
/// # Fields
/// * `gather` - Pass-wide options (optional, see [`GatherOptions`])
/// * `grafts` - The grafts to run (optional, defaults to `os`, `cpu` and `hostname`)
///
/// # Example
/// ```yaml
/// gather:
///   timeout_seconds: 30
///   fail_on_collision: false
/// grafts:
///   - id: os
///     type: os
///   - id: site
///     type: static
///     namespace: site.meta
///     options:
///       region: eu-west
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gather: GatherOptions,
    #[serde(default = "default_grafts")]
    pub grafts: Vec<GraftConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gather: GatherOptions::default(),
            grafts: default_grafts(),
        }
    }
}

fn default_grafts() -> Vec<GraftConfig> {
    vec![
        GraftConfig::new("os", GraftType::Os),
        GraftConfig::new("cpu", GraftType::Cpu),
        GraftConfig::new("hostname", GraftType::Hostname),
    ]
}

/// Options that apply to a whole gathering pass.
///
/// # Fields
/// * `timeout_seconds` - Abort any graft running longer than this. Defaults
///   to 30; `null` or `0` waits forever.
/// * `fail_on_collision` - Turn structural collisions into an error from
///   `Logical::gather` instead of only logging them (defaults to `false`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatherOptions {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub fail_on_collision: bool,
}

fn default_timeout_seconds() -> Option<u64> {
    Some(DEFAULT_TIMEOUT_SECONDS)
}

impl Default for GatherOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            fail_on_collision: false,
        }
    }
}

impl GatherOptions {
    /// Per-graft timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

/// One graft in the configuration.
///
/// `options` are graft-specific: `user` needs `path`, `env` needs `vars`,
/// `hostname` accepts `path`, and for `static` the options are the facts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraftConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GraftType,
    /// Re-home this graft's output under a dotted namespace
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub options: Facts,
}

impl GraftConfig {
    pub fn new(id: impl Into<String>, kind: GraftType) -> Self {
        Self {
            id: id.into(),
            kind,
            namespace: None,
            options: Facts::new(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum GraftType {
    Os,
    Cpu,
    Hostname,
    Env,
    User,
    Static,
}

impl GraftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraftType::Os => "os",
            GraftType::Cpu => "cpu",
            GraftType::Hostname => "hostname",
            GraftType::Env => "env",
            GraftType::User => "user",
            GraftType::Static => "static",
        }
    }
}

impl std::fmt::Display for GraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a configuration file, choosing TOML or YAML by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let cfg = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(cfg)
}

pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
gather:
  timeout_seconds: 5
  fail_on_collision: true
grafts:
  - id: os
    type: os
  - id: site
    type: static
    namespace: site.meta
    options:
      region: eu-west
      zone: b
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.gather.timeout(), Some(Duration::from_secs(5)));
        assert!(cfg.gather.fail_on_collision);
        assert_eq!(cfg.grafts.len(), 2);
        assert_eq!(cfg.grafts[1].kind, GraftType::Static);
        assert_eq!(cfg.grafts[1].namespace.as_deref(), Some("site.meta"));
        assert_eq!(
            cfg.grafts[1].options.keys().collect::<Vec<_>>(),
            vec!["region", "zone"]
        );
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let cfg: Config = serde_yaml::from_str("gather: {}\n").unwrap();

        assert_eq!(cfg.gather, GatherOptions::default());
        assert_eq!(
            cfg.gather.timeout(),
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
        );
        let ids: Vec<&str> = cfg.grafts.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["os", "cpu", "hostname"]);
    }

    #[test]
    fn test_null_or_zero_timeout_disables_it() {
        let cfg: Config = serde_yaml::from_str("gather:\n  timeout_seconds: null\ngrafts: []\n").unwrap();
        assert_eq!(cfg.gather.timeout(), None);

        let cfg: Config = serde_yaml::from_str("gather:\n  timeout_seconds: 0\ngrafts: []\n").unwrap();
        assert_eq!(cfg.gather.timeout(), None);
        assert!(cfg.grafts.is_empty());
    }

    #[test]
    fn test_unknown_graft_type_is_rejected() {
        let yaml = "grafts:\n  - id: gpu\n    type: gpu\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_config(
            ".yaml",
            "grafts:\n  - id: user\n    type: user\n    options:\n      path: /tmp/user.yaml\n",
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.grafts[0].kind, GraftType::User);
        assert_eq!(cfg.grafts[0].options.get("path"), Some(&json!("/tmp/user.yaml")));
    }

    #[test]
    fn test_load_toml_file() {
        let toml = r#"
[gather]
timeout_seconds = 10

[[grafts]]
id = "site"
type = "static"
namespace = "site"

[grafts.options]
region = "eu-west"
"#;
        let file = write_config(".toml", toml);

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.gather.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(cfg.grafts[0].id, "site");
        assert_eq!(cfg.grafts[0].options.get("region"), Some(&json!("eu-west")));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        match load_config(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_and_toml() {
        let yaml = write_config(".yaml", "grafts: [\n");
        assert!(matches!(load_config(yaml.path()), Err(ConfigError::Yaml(_))));

        let toml = write_config(".toml", "[[grafts]\n");
        assert!(matches!(load_config(toml.path()), Err(ConfigError::Toml(_))));
    }
}
