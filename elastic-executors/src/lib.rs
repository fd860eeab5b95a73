//!
//! Elastic-Executors provides the schedulers that drive robot nodes.
//!
//! A robot program hands its nodes to an executor which starts them,
//! updates each one at its own period and shuts them down once the
//! executor is interrupted or its time runs out.
//!

#![deny(missing_docs)]

pub mod simple_executor;
pub use simple_executor::SimpleExecutor;

use std::cmp::{Ord, Ordering};

use elastic_core::node::Node;

/// The NodeWrapper wraps nodes giving them a priority based on the timestamp
/// of their next update.
///
/// This ensures that nodes are updated at the correct time
pub(crate) struct NodeWrapper {
    /// The timestamp (in us since the executor started) of the node's next update
    pub priority: u128,
    /// The node this NodeWrapper is wrapping around
    pub node: Box<dyn Node>,
}

impl Ord for NodeWrapper {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority).reverse()
    }
}

impl PartialOrd for NodeWrapper {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for NodeWrapper {}

/// Binary search insertion of `node` into the vector `vec`, which is kept
/// sorted so that the node due soonest is last.
///
/// Nodes sharing a priority are popped in the order they were inserted.
#[inline(always)]
pub(crate) fn insert_into(vec: &mut Vec<NodeWrapper>, node: NodeWrapper) {
    let idx = vec.partition_point(|existing| existing < &node);
    vec.insert(idx, node);
}
