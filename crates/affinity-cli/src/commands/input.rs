//! Loading inventories, jobs and config from disk.

use std::path::Path;

use affinity_core::{AffinityConfig, Job, Node};
use anyhow::Context;

pub fn load_config(path: Option<&str>) -> anyhow::Result<AffinityConfig> {
    match path {
        Some(p) => AffinityConfig::from_file(Path::new(p))
            .with_context(|| format!("loading config from {p}")),
        None => Ok(AffinityConfig::default()),
    }
}

pub fn load_nodes(path: &str) -> anyhow::Result<Vec<Node>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading inventory {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("parsing inventory {path}"))
}

pub fn load_job(path: &str) -> anyhow::Result<Job> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading job {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("parsing job {path}"))
}
