//! Scoring error types.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors returned by a [`NodeLister`](crate::lister::NodeLister).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("node inventory unavailable: {0}")]
    Unavailable(String),

    #[error("node listing cancelled")]
    Cancelled,
}

/// Who is at fault for a failed scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The job carries data the plugin cannot use.
    Caller,
    /// The cluster view needed to score is missing or unusable.
    Infrastructure,
}

/// Errors that abort a single scoring call.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("converting affinity key {value:?} of job {job} to a non-negative integer: {source}")]
    InvalidAffinityKey {
        job: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("getting node {node:?} from snapshot: {source}")]
    ListNodes {
        node: String,
        #[source]
        source: ListError,
    },

    #[error("no eligible worker nodes: no node has a {label:?} label containing {marker:?}")]
    EmptyPool { label: String, marker: String },
}

impl ScoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoreError::InvalidAffinityKey { .. } => ErrorKind::Caller,
            ScoreError::ListNodes { .. } | ScoreError::EmptyPool { .. } => {
                ErrorKind::Infrastructure
            }
        }
    }
}

pub type ScoreResult<T> = Result<T, ScoreError>;
