//! affinity.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::types::{AFFINITY_ANNOTATION, HOSTNAME_LABEL, ScoreRange, WORKER_MARKER};

/// Name the plugin registers under with the host scheduler.
pub const PLUGIN_NAME: &str = "GitlabRunnerScheduler";

/// Errors raised when a configuration cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("score range is empty: min {min} must be below max {max}")]
    EmptyScoreRange { min: i64, max: i64 },

    #[error("score max {max} must be positive: non-preferred nodes score 0")]
    NonPositiveMax { max: i64 },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AffinityConfig {
    pub plugin: PluginConfig,
    pub pool: PoolConfig,
    pub job: JobConfig,
    pub score: ScoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub name: String,
}

/// How the eligible worker pool is carved out of the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Node label holding the hostname.
    pub hostname_label: String,
    /// Substring the hostname must contain for the node to be a worker.
    pub worker_marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Annotation holding the job's numeric affinity key.
    pub affinity_annotation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub min: i64,
    pub max: i64,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            name: PLUGIN_NAME.to_string(),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            hostname_label: HOSTNAME_LABEL.to_string(),
            worker_marker: WORKER_MARKER.to_string(),
        }
    }
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            affinity_annotation: AFFINITY_ANNOTATION.to_string(),
        }
    }
}

impl Default for ScoreConfig {
    fn default() -> Self {
        let range = ScoreRange::DEFAULT;
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

impl AffinityConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AffinityConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn score_range(&self) -> ScoreRange {
        ScoreRange::new(self.score.min, self.score.max)
    }

    /// Reject configurations the scorer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plugin.name.is_empty() {
            return Err(ConfigError::EmptyField("plugin.name"));
        }
        if self.pool.hostname_label.is_empty() {
            return Err(ConfigError::EmptyField("pool.hostname_label"));
        }
        if self.pool.worker_marker.is_empty() {
            return Err(ConfigError::EmptyField("pool.worker_marker"));
        }
        if self.job.affinity_annotation.is_empty() {
            return Err(ConfigError::EmptyField("job.affinity_annotation"));
        }
        if self.score.min >= self.score.max {
            return Err(ConfigError::EmptyScoreRange {
                min: self.score.min,
                max: self.score.max,
            });
        }
        if self.score.max <= 0 {
            return Err(ConfigError::NonPositiveMax {
                max: self.score.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_toml() {
        let config = AffinityConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("GitlabRunnerScheduler"));
        assert!(toml_str.contains("project.runner.gitlab.com/id"));

        let parsed: AffinityConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config: AffinityConfig = toml::from_str("").unwrap();
        assert_eq!(config, AffinityConfig::default());
        assert_eq!(config.score_range(), ScoreRange::DEFAULT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let toml_str = r#"
[pool]
worker_marker = "runner"

[score]
max = 10
"#;
        let config: AffinityConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pool.worker_marker, "runner");
        assert_eq!(config.pool.hostname_label, HOSTNAME_LABEL);
        assert_eq!(config.score_range(), ScoreRange::new(0, 10));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut config = AffinityConfig::default();
        config.score.min = 100;
        config.score.max = 100;
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyScoreRange { min: 100, max: 100 })
        );
    }

    #[test]
    fn test_rejects_non_positive_max() {
        let mut config = AffinityConfig::default();
        config.score.min = -10;
        config.score.max = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveMax { max: 0 })
        );

        config.score.max = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_marker() {
        let mut config = AffinityConfig::default();
        config.pool.worker_marker.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyField("pool.worker_marker"))
        );
    }

    #[test]
    fn test_from_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("affinity.toml");
        std::fs::write(&path, "[score]\nmin = 5\nmax = 1\n").unwrap();

        let err = AffinityConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("score range is empty"));
    }
}
