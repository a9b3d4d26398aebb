//! Host-facing plugin interfaces and the affinity plugin.
//!
//! The host scheduler drives plugins through a small set of capability
//! traits. A plugin implements only the capabilities it offers; this one
//! offers scoring plus the normalization extension.

use std::sync::Arc;

use affinity_core::{AffinityConfig, ConfigError, Job, NodeScore, ScoreRange};
use tracing::{info, warn};

use crate::error::{ScoreError, ScoreResult};
use crate::lister::NodeLister;
use crate::normalize::normalize_scores;
use crate::pool;
use crate::scorer::AffinityScorer;

/// Every plugin has a name the host registers it under.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;
}

/// Scores a job on one candidate node at a time.
///
/// The host calls `score` once per candidate, possibly concurrently, and
/// never shows the plugin the other candidates.
pub trait ScorePlugin: Plugin {
    fn score(&self, job: &Job, node_name: &str) -> ScoreResult<i64>;

    /// Normalization hook run once per cycle over the full score vector.
    fn score_extensions(&self) -> Option<&dyn ScoreExtensions> {
        None
    }
}

pub trait ScoreExtensions: Send + Sync {
    /// Rewrite `scores` in place into the host's score range. Never fails.
    fn normalize_score(&self, job: &Job, scores: &mut [NodeScore]);
}

/// Prefers one worker per job, chosen from the job's affinity key.
pub struct AffinityPlugin {
    config: AffinityConfig,
    scorer: AffinityScorer,
    lister: Arc<dyn NodeLister>,
}

impl AffinityPlugin {
    /// Build the plugin from its config and the host's snapshot lister.
    pub fn new(config: AffinityConfig, lister: Arc<dyn NodeLister>) -> Result<Self, ConfigError> {
        config.validate()?;
        let scorer = AffinityScorer::new(&config.job, &config.pool, config.score_range());
        info!(
            plugin = %config.plugin.name,
            annotation = %config.job.affinity_annotation,
            marker = %config.pool.worker_marker,
            "affinity plugin initialized"
        );
        Ok(Self {
            config,
            scorer,
            lister,
        })
    }

    pub fn score_range(&self) -> ScoreRange {
        self.config.score_range()
    }
}

impl std::fmt::Debug for AffinityPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffinityPlugin")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Plugin for AffinityPlugin {
    fn name(&self) -> &str {
        &self.config.plugin.name
    }
}

impl ScorePlugin for AffinityPlugin {
    fn score(&self, job: &Job, node_name: &str) -> ScoreResult<i64> {
        // Fresh snapshot every call; the pool may have changed since the last one.
        let pool = pool::resolve(self.lister.as_ref(), &self.config.pool).map_err(|source| {
            warn!(job = %job.name, node = node_name, error = %source, "node listing failed");
            ScoreError::ListNodes {
                node: node_name.to_string(),
                source,
            }
        })?;

        self.scorer.score(job, node_name, &pool).inspect_err(|e| {
            warn!(job = %job.name, node = node_name, error = %e, "scoring failed");
        })
    }

    fn score_extensions(&self) -> Option<&dyn ScoreExtensions> {
        Some(self)
    }
}

impl ScoreExtensions for AffinityPlugin {
    fn normalize_score(&self, _job: &Job, scores: &mut [NodeScore]) {
        normalize_scores(scores, self.score_range());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ListError};
    use crate::lister::StaticLister;
    use affinity_core::{AFFINITY_ANNOTATION, HOSTNAME_LABEL, Node, PLUGIN_NAME};

    fn worker(name: &str) -> Node {
        Node::new(name).with_label(HOSTNAME_LABEL, format!("{name}-worker"))
    }

    fn plugin(nodes: Vec<Node>) -> AffinityPlugin {
        AffinityPlugin::new(AffinityConfig::default(), Arc::new(StaticLister::new(nodes))).unwrap()
    }

    #[test]
    fn registers_under_default_name() {
        let p = plugin(vec![]);
        assert_eq!(p.name(), PLUGIN_NAME);
        assert!(p.score_extensions().is_some());
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = AffinityConfig::default();
        config.score.max = -1;
        let err = AffinityPlugin::new(config, Arc::new(StaticLister::default())).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyScoreRange { .. }));
    }

    #[test]
    fn rejects_range_where_preferred_ties_with_others() {
        let mut config = AffinityConfig::default();
        config.score.min = -10;
        config.score.max = 0;
        let err = AffinityPlugin::new(config, Arc::new(StaticLister::default())).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveMax { max: 0 });
    }

    #[test]
    fn scores_against_filtered_sorted_pool() {
        let nodes = vec![
            worker("nodeC"),
            Node::new("control").with_label(HOSTNAME_LABEL, "control-plane"),
            worker("nodeA"),
            worker("nodeB"),
        ];
        let p = plugin(nodes);
        let job = Job::new("build").with_annotation(AFFINITY_ANNOTATION, "5");

        assert_eq!(p.score(&job, "nodeA").unwrap(), 0);
        assert_eq!(p.score(&job, "nodeB").unwrap(), 0);
        assert_eq!(p.score(&job, "nodeC").unwrap(), 100);
        assert_eq!(p.score(&job, "control").unwrap(), 0);
    }

    #[test]
    fn empty_pool_fails_scoring() {
        let p = plugin(vec![Node::new("control").with_label(HOSTNAME_LABEL, "cp")]);
        let job = Job::new("build").with_annotation(AFFINITY_ANNOTATION, "1");

        let err = p.score(&job, "control").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
    }

    #[test]
    fn listing_failure_is_propagated_without_key() {
        let lister = || -> Result<Vec<Node>, ListError> { Err(ListError::Cancelled) };
        let p = AffinityPlugin::new(AffinityConfig::default(), Arc::new(lister)).unwrap();

        let err = p.score(&Job::new("plain"), "n1").unwrap_err();
        assert!(matches!(
            err,
            ScoreError::ListNodes { ref node, source: ListError::Cancelled } if node == "n1"
        ));
    }

    #[test]
    fn normalize_uses_configured_range() {
        let mut config = AffinityConfig::default();
        config.score.min = 1;
        config.score.max = 10;
        let p = AffinityPlugin::new(config, Arc::new(StaticLister::default())).unwrap();

        let mut scores = vec![NodeScore::new("a", 0), NodeScore::new("b", 10)];
        p.normalize_score(&Job::new("j"), &mut scores);
        assert_eq!(scores[0].score, 1);
        assert_eq!(scores[1].score, 10);
    }
}
