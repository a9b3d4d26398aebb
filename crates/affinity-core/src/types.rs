//! Shared types used across runner-affinity crates.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lowest score a host scheduler accepts from a score plugin.
pub const MIN_NODE_SCORE: i64 = 0;

/// Highest score a host scheduler accepts from a score plugin.
pub const MAX_NODE_SCORE: i64 = 100;

/// Label the host sets to a node's hostname.
pub const HOSTNAME_LABEL: &str = "kubernetes.io/hostname";

/// Substring of the hostname label that marks a worker node.
pub const WORKER_MARKER: &str = "worker";

/// Job annotation carrying the numeric affinity key.
pub const AFFINITY_ANNOTATION: &str = "project.runner.gitlab.com/id";

/// A node snapshot as reported by the cluster inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: HashMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

/// A unit of work awaiting placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl Job {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: HashMap::new(),
        }
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

/// One entry of a score vector: the score a job received on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeScore {
    pub name: String,
    pub score: i64,
}

impl NodeScore {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Inclusive score bounds imposed by the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
}

impl ScoreRange {
    pub const DEFAULT: ScoreRange = ScoreRange {
        min: MIN_NODE_SCORE,
        max: MAX_NODE_SCORE,
    };

    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Width of the range. Widened so `i64::MIN..=i64::MAX` does not overflow.
    pub fn span(&self) -> i128 {
        i128::from(self.max) - i128::from(self.min)
    }

    pub fn contains(&self, score: i64) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}
