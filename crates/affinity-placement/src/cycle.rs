//! One scheduling cycle as the host drives it.
//!
//! Scores every candidate independently, then hands the collected vector to
//! the plugin's normalization extension once. Candidates whose scoring call
//! failed are left out of the vector and reported separately; whether that
//! fails the whole cycle is the caller's decision.

use affinity_core::{Job, NodeScore};
use tracing::{debug, info};

use crate::error::ScoreError;
use crate::plugin::ScorePlugin;

/// A candidate whose scoring call failed.
#[derive(Debug)]
pub struct CandidateFailure {
    pub node: String,
    pub error: ScoreError,
}

/// Result of running a plugin over all candidates for one job.
#[derive(Debug)]
pub struct CycleOutcome {
    pub job: String,
    /// Scores as returned by the plugin, in candidate order.
    pub raw: Vec<NodeScore>,
    /// `raw` after normalization. Same length and order.
    pub normalized: Vec<NodeScore>,
    pub failures: Vec<CandidateFailure>,
}

impl CycleOutcome {
    /// Highest normalized entry; the earliest candidate wins ties.
    pub fn best(&self) -> Option<&NodeScore> {
        self.normalized.iter().fold(None, |best, s| match best {
            Some(b) if b.score >= s.score => Some(b),
            _ => Some(s),
        })
    }

    /// Whether the normalized scores tell any two nodes apart.
    pub fn has_spread(&self) -> bool {
        let mut scores = self.normalized.iter().map(|s| s.score);
        match scores.next() {
            Some(first) => scores.any(|s| s != first),
            None => false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn run_cycle<P>(plugin: &P, job: &Job, candidates: &[String]) -> CycleOutcome
where
    P: ScorePlugin + ?Sized,
{
    let mut raw = Vec::with_capacity(candidates.len());
    let mut failures = Vec::new();

    for node in candidates {
        match plugin.score(job, node) {
            Ok(score) => raw.push(NodeScore::new(node.clone(), score)),
            Err(error) => failures.push(CandidateFailure {
                node: node.clone(),
                error,
            }),
        }
    }

    let mut normalized = raw.clone();
    if let Some(ext) = plugin.score_extensions() {
        ext.normalize_score(job, &mut normalized);
    }
    debug!(job = %job.name, scores = ?normalized, "normalized scores");

    info!(
        job = %job.name,
        plugin = plugin.name(),
        scored = raw.len(),
        failed = failures.len(),
        "scoring cycle finished"
    );

    CycleOutcome {
        job: job.name.clone(),
        raw,
        normalized,
        failures,
    }
}
