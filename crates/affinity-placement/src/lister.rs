//! Node inventory access.
//!
//! The host owns the cluster snapshot. The plugin only sees it through
//! [`NodeLister`], which is handed in at construction and called afresh on
//! every scoring call.

use affinity_core::Node;

use crate::error::ListError;

/// Read-only view of the host's current node inventory.
pub trait NodeLister: Send + Sync {
    /// List every node in the current snapshot, eligible or not.
    fn list_nodes(&self) -> Result<Vec<Node>, ListError>;
}

/// A lister over a fixed in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticLister {
    nodes: Vec<Node>,
}

impl StaticLister {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl NodeLister for StaticLister {
    fn list_nodes(&self) -> Result<Vec<Node>, ListError> {
        Ok(self.nodes.clone())
    }
}

impl<F> NodeLister for F
where
    F: Fn() -> Result<Vec<Node>, ListError> + Send + Sync,
{
    fn list_nodes(&self) -> Result<Vec<Node>, ListError> {
        self()
    }
}
