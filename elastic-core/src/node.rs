//!
//! A Singular Unit of Work.
//!
//! Nodes are an individual unit of work that is performed every x
//! microseconds.  On a robot this is the periodic loop: a node reads
//! whatever it needs, does its work and publishes the results to the
//! network table.
//!

/// A Node represents a singular process that performs some singular
/// purpose
pub trait Node: Send {
    /// Return the node's update rate (in us)
    fn get_update_delay_us(&self) -> u128;

    /// Complete the necessary setup functionalities for a Node.
    ///
    /// Note: this method is called on Start for the executor or
    /// (if the executor was not formally started) before the executor
    /// begins updating nodes.
    fn start(&mut self) {}

    /// Update is called by the executor every get_update_delay_us microseconds.
    ///
    /// This is the robot's periodic method and should include the
    /// work completed by this node every "tick".
    fn update(&mut self);

    /// When an executor is stopped or has finished executing nodes, it will call
    /// this method on all of its nodes so this should clean up any work
    /// the node needs to do.
    fn shutdown(&mut self) {}
}
