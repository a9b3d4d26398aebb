//! runner-affinity scheduler plugin: pins each job to one worker node.
//!
//! Jobs carry a numeric affinity key in an annotation. The plugin resolves
//! the current worker pool, picks `pool[key mod len]` and gives that node
//! the maximum score. A normalization extension then rescales the cycle's
//! scores into the host's range.
//!
//! # Components
//!
//! - **`lister`** - Node inventory access (`NodeLister`)
//! - **`pool`** - Worker pool filtering and ordering
//! - **`scorer`** - Affinity key parsing and per-node scoring
//! - **`normalize`** - Linear rescaling of a score vector
//! - **`plugin`** - Host capability traits and `AffinityPlugin`
//! - **`cycle`** - Drives a plugin over every candidate for one job

pub mod cycle;
pub mod error;
pub mod lister;
pub mod normalize;
pub mod plugin;
pub mod pool;
pub mod scorer;

pub use cycle::{CandidateFailure, CycleOutcome, run_cycle};
pub use error::{ErrorKind, ListError, ScoreError, ScoreResult};
pub use lister::{NodeLister, StaticLister};
pub use normalize::{normalize_scores, normalize_values};
pub use plugin::{AffinityPlugin, Plugin, ScoreExtensions, ScorePlugin};
pub use pool::{eligible_pool, is_worker, resolve};
pub use scorer::{AffinityScorer, preferred_index};
