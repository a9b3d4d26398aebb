//! Affinity scoring.
//!
//! A job carrying a numeric affinity key prefers exactly one worker: the
//! one at `key mod pool_len` in the name-sorted pool. That node receives
//! the range maximum and every other node zero. Jobs without the key have
//! no preference and score zero everywhere.
//!
//! The index is re-derived from the current pool size on every call, so a
//! job's preferred node can change when workers join or leave.

use affinity_core::config::{JobConfig, PoolConfig};
use affinity_core::{Job, Node, ScoreRange};
use tracing::debug;

use crate::error::{ScoreError, ScoreResult};

/// Scores a (job, candidate node) pair against a resolved worker pool.
#[derive(Debug, Clone)]
pub struct AffinityScorer {
    annotation: String,
    pool: PoolConfig,
    range: ScoreRange,
}

impl AffinityScorer {
    pub fn new(job: &JobConfig, pool: &PoolConfig, range: ScoreRange) -> Self {
        Self {
            annotation: job.affinity_annotation.clone(),
            pool: pool.clone(),
            range,
        }
    }

    /// Read the job's affinity key.
    ///
    /// `Ok(None)` means the annotation is absent and the job has no
    /// preference.
    pub fn affinity_key(&self, job: &Job) -> ScoreResult<Option<u64>> {
        let Some(value) = job.annotation(&self.annotation) else {
            return Ok(None);
        };
        value
            .parse::<u64>()
            .map(Some)
            .map_err(|source| ScoreError::InvalidAffinityKey {
                job: job.name.clone(),
                value: value.to_string(),
                source,
            })
    }

    /// Raw score of `candidate` for `job` given the eligible `pool`.
    ///
    /// `pool` must already be filtered and sorted by name.
    pub fn score(&self, job: &Job, candidate: &str, pool: &[Node]) -> ScoreResult<i64> {
        let Some(key) = self.affinity_key(job)? else {
            debug!(job = %job.name, node = candidate, selected = false, "job has no affinity key");
            return Ok(0);
        };

        let index = preferred_index(key, pool.len()).ok_or_else(|| ScoreError::EmptyPool {
            label: self.pool.hostname_label.clone(),
            marker: self.pool.worker_marker.clone(),
        })?;

        let selected = pool[index].name == candidate;
        debug!(
            job = %job.name,
            node = candidate,
            key,
            index,
            pool_size = pool.len(),
            selected,
            "scored candidate"
        );

        Ok(if selected { self.range.max } else { 0 })
    }
}

/// Index into a pool of `len` nodes for affinity `key`.
///
/// Returns `None` if the pool is empty.
pub fn preferred_index(key: u64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    // The remainder is below `len`, so it fits back into usize.
    Some((key % len as u64) as usize)
}
