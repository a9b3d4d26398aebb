//! Eligible worker pool resolution.
//!
//! Filters the inventory down to worker nodes and orders them by name so
//! that index-based selection is reproducible for a given node set. The
//! order is only stable while the set of names is: adding or removing a
//! worker shifts the indices of every node after it.

use affinity_core::Node;
use affinity_core::config::PoolConfig;

use crate::error::ListError;
use crate::lister::NodeLister;

/// A node is a worker iff its hostname label contains the worker marker.
pub fn is_worker(node: &Node, config: &PoolConfig) -> bool {
    node.label(&config.hostname_label)
        .is_some_and(|hostname| hostname.contains(config.worker_marker.as_str()))
}

/// Keep only worker nodes, sorted ascending by name.
pub fn eligible_pool(nodes: Vec<Node>, config: &PoolConfig) -> Vec<Node> {
    let mut pool: Vec<Node> = nodes
        .into_iter()
        .filter(|n| is_worker(n, config))
        .collect();
    pool.sort_by(|a, b| a.name.cmp(&b.name));
    pool
}

/// List the current inventory and resolve the eligible pool from it.
///
/// An empty pool is returned as-is; callers that index into it decide
/// whether that is an error.
pub fn resolve(lister: &dyn NodeLister, config: &PoolConfig) -> Result<Vec<Node>, ListError> {
    let nodes = lister.list_nodes()?;
    Ok(eligible_pool(nodes, config))
}
