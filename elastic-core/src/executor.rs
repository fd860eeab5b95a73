//!
//! An executor handles the scheduling and execution of nodes.
//!
//! The robot program uses the executor provided in elastic-executors.
//! This trait gives any other executor the same interface so that a
//! robot can swap schedulers without touching its nodes.
//!

use crate::node::Node;

/// The lifecycle state of an executor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutorState {
    /// Nodes have not been started (or have been shut down).
    Stopped,
    /// Nodes have been started but the update loop has not begun.
    Started,
    /// The update loop is running.
    Running,
}

/// An executor owns a set of nodes and drives their lifecycle
pub trait Executor {
    /// Start every node owned by the executor
    fn start(&mut self);

    /// Run the update loop for a set amount of time (in milliseconds), then
    /// shut every node down
    fn update_for_ms(&mut self, ms: u128);

    /// Run the update loop until the executor is interrupted, then shut
    /// every node down
    fn update_loop(&mut self);

    /// Check whether the executor has been interrupted
    ///
    /// Note: This should be called between each Node execution
    fn check_interrupt(&mut self) -> bool;

    /// Add a node to the executor.
    fn add_node(&mut self, node: Box<dyn Node>);
}
