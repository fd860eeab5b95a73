//!
//! The Simple Executor
//!
//! The simple executor is a singular thread that stores each node in a
//! sorted vector, pops off the node whose update is due soonest, runs its
//! update method and inserts it back with its next due timestamp.
//!
//! This is the executor the robot skeleton runs on: one thread, a fixed
//! period per node, and an interrupt channel wired to Ctrl-C.
//!

use crossbeam::channel::Receiver;

use quanta::{Clock, Instant};

use tracing::{debug, trace};

use elastic_core::{Executor, ExecutorState, Node};

use crate::{insert_into, NodeWrapper};

/// Simple Executor
///
/// This simple executor stores Nodes in a sorted vector where the
/// priority is higher the closer to the current timestamp the Node's
/// next update is.
///
/// Note: The Simple Executor can be interrupted by sending a true value
/// over the channel whose receiving end is owned by the SimpleExecutor
///
/// Addendum: The Simple Executor spins between node executions so do not
/// expect it to yield CPU time to other processes while it is running.
pub struct SimpleExecutor {
    // The sorted backing vector for the executor
    backing: Vec<NodeWrapper>,
    // The quanta high-precision clock backing the executor
    clock: Clock,
    // The current state of the executor
    state: ExecutorState,
    // The Instant the executor was started
    start_instant: Instant,
    // The Interrupt receiver channel
    interrupt: Receiver<bool>,
    // Whether or not the executor has been interrupted
    interrupted: bool,
}

impl SimpleExecutor {
    /// Create a new Simple Executor without any Nodes
    pub fn new(interrupt: Receiver<bool>) -> Self {
        Self::new_with(interrupt, Vec::new())
    }

    /// Creates a new Simple Executor with a number of Nodes
    pub fn new_with(interrupt: Receiver<bool>, nodes: Vec<Box<dyn Node>>) -> Self {
        let backing = nodes
            .into_iter()
            .map(|node| NodeWrapper { priority: 0, node })
            .collect();

        let clock = Clock::new();
        let now = clock.now();

        Self {
            backing,
            clock,
            start_instant: now,
            state: ExecutorState::Stopped,
            interrupt,
            interrupted: false,
        }
    }

    /// The current lifecycle state of the executor
    pub fn state(&self) -> ExecutorState {
        self.state
    }

    /// The number of nodes owned by the executor
    pub fn len(&self) -> usize {
        self.backing.len()
    }

    /// Whether the executor owns no nodes
    pub fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    /// Microseconds elapsed since the executor was started
    fn elapsed_us(&self) -> u128 {
        self.clock.now().duration_since(self.start_instant).as_micros()
    }

    /// Update the node that is due soonest, if its time has come.
    fn update_next(&mut self) {
        let elapsed = self.elapsed_us();
        let due = matches!(self.backing.last(), Some(next) if elapsed >= next.priority);
        if !due {
            std::hint::spin_loop();
            return;
        }

        if let Some(mut node_wrapper) = self.backing.pop() {
            trace!(priority = node_wrapper.priority, elapsed, "updating node");
            node_wrapper.node.update();
            node_wrapper.priority += node_wrapper.node.get_update_delay_us();
            insert_into(&mut self.backing, node_wrapper);
        }
    }

    /// Shut every node down and return to the stopped state
    fn stop(&mut self) {
        for node_wrapper in self.backing.iter_mut() {
            node_wrapper.priority = 0;
            node_wrapper.node.shutdown();
        }
        self.state = ExecutorState::Stopped;
        debug!(nodes = self.backing.len(), "executor stopped");
    }
}

impl Executor for SimpleExecutor {
    /// Reset every node's priority to 0, start every node and record the
    /// start instant.
    ///
    /// Note: `update_for_ms` and `update_loop` both call this so there is no
    /// need to call it beforehand.
    fn start(&mut self) {
        for node_wrapper in self.backing.iter_mut() {
            node_wrapper.priority = 0;
            node_wrapper.node.start();
        }

        self.interrupted = false;
        self.state = ExecutorState::Started;
        self.start_instant = self.clock.now();
        debug!(nodes = self.backing.len(), "executor started");
    }

    /// Start the executor and run it for a given number of milliseconds before
    /// stopping it.  An interrupt will also stop the executor early.
    fn update_for_ms(&mut self, ms: u128) {
        self.start();

        self.state = ExecutorState::Running;
        while self.elapsed_us() < ms * 1_000 && !self.check_interrupt() {
            self.update_next();
        }

        self.stop();
    }

    /// Start the executor and run until an interrupt is received.
    fn update_loop(&mut self) {
        self.start();

        self.state = ExecutorState::Running;
        while !self.check_interrupt() {
            self.update_next();
        }

        self.stop();
    }

    /// Check the interrupt receiver for an interrupt.
    fn check_interrupt(&mut self) -> bool {
        if let Ok(interrupt) = self.interrupt.try_recv() {
            self.interrupted = interrupt;
        }
        self.interrupted
    }

    /// Add a node to the Simple Executor.
    ///
    /// Note: If the executor is already started the node is scheduled for
    /// an immediate update.
    fn add_node(&mut self, node: Box<dyn Node>) {
        if self.state == ExecutorState::Stopped {
            self.backing.push(NodeWrapper { priority: 0, node });
        } else {
            let priority = self.elapsed_us();
            insert_into(&mut self.backing, NodeWrapper { priority, node });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{
        sync::{
            atomic::{AtomicU32, Ordering},
            Arc, Mutex,
        },
        thread,
        time::Duration,
    };

    use crossbeam::channel::unbounded;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum State {
        Stopped,
        Started,
        Updating,
    }

    /// Node whose state and update count are observable from the test
    struct CountingNode {
        update_delay: u128,
        updates: Arc<AtomicU32>,
        state: Arc<Mutex<State>>,
    }

    impl CountingNode {
        fn new(update_delay: u128) -> (Self, Arc<AtomicU32>, Arc<Mutex<State>>) {
            let updates = Arc::new(AtomicU32::new(0));
            let state = Arc::new(Mutex::new(State::Stopped));
            (
                Self {
                    update_delay,
                    updates: updates.clone(),
                    state: state.clone(),
                },
                updates,
                state,
            )
        }
    }

    impl Node for CountingNode {
        fn get_update_delay_us(&self) -> u128 {
            self.update_delay
        }

        fn start(&mut self) {
            *self.state.lock().unwrap() = State::Started;
        }

        fn update(&mut self) {
            *self.state.lock().unwrap() = State::Updating;
            self.updates.fetch_add(1, Ordering::SeqCst);
        }

        fn shutdown(&mut self) {
            *self.state.lock().unwrap() = State::Stopped;
        }
    }

    #[test]
    fn test_simple_executor_start() {
        let (_, rx) = unbounded();
        let (fast, _, fast_state) = CountingNode::new(100_000);
        let (slow, _, slow_state) = CountingNode::new(250_000);

        let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(fast), Box::new(slow)]);
        let original_start_instant = executor.start_instant;

        executor.start();

        assert!(executor.backing.iter().all(|wrapper| wrapper.priority == 0));
        assert_eq!(*fast_state.lock().unwrap(), State::Started);
        assert_eq!(*slow_state.lock().unwrap(), State::Started);
        assert!(!executor.interrupted);
        assert_eq!(executor.state(), ExecutorState::Started);
        assert!(executor.start_instant >= original_start_instant);
    }

    #[test]
    fn test_update_for_ms() {
        let (_, rx) = unbounded();
        let (fast, fast_updates, fast_state) = CountingNode::new(10_000);
        let (slow, slow_updates, slow_state) = CountingNode::new(25_000);

        let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(fast), Box::new(slow)]);

        let start = executor.clock.now();
        executor.update_for_ms(100);
        let elapsed = executor.clock.now() - start;

        assert!(executor.backing.iter().all(|wrapper| wrapper.priority == 0));
        assert_eq!(*fast_state.lock().unwrap(), State::Stopped);
        assert_eq!(*slow_state.lock().unwrap(), State::Stopped);
        assert_eq!(executor.state(), ExecutorState::Stopped);

        // The first update happens at t = 0 so a 10ms node runs ~10 times in 100ms
        let fast_updates = fast_updates.load(Ordering::SeqCst);
        let slow_updates = slow_updates.load(Ordering::SeqCst);
        assert!((5..=11).contains(&fast_updates), "fast node ran {fast_updates} times");
        assert!((2..=5).contains(&slow_updates), "slow node ran {slow_updates} times");
        assert!(fast_updates > slow_updates);

        assert!(elapsed >= Duration::from_millis(100));
    }

    #[test]
    fn test_check_interrupt() {
        let (tx, rx) = unbounded();
        let mut executor = SimpleExecutor::new(rx);

        assert!(!executor.check_interrupt());
        tx.send(true).unwrap();
        assert!(executor.check_interrupt());
        // The interrupt latches until the executor is restarted
        assert!(executor.check_interrupt());
    }

    #[test]
    fn test_interrupt_stops_update_for_ms_early() {
        let (tx, rx) = unbounded();
        let (node, _, state) = CountingNode::new(1_000);
        let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(node)]);

        tx.send(true).unwrap();
        let start = executor.clock.now();
        executor.update_for_ms(5_000);

        assert!(executor.clock.now() - start < Duration::from_millis(1_000));
        assert_eq!(*state.lock().unwrap(), State::Stopped);
    }

    #[test]
    fn test_add_node_stopped() {
        let (_, rx) = unbounded();
        let (first, _, _) = CountingNode::new(10_000);
        let (second, _, _) = CountingNode::new(25_000);
        let (third, _, _) = CountingNode::new(1_000);

        let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(first), Box::new(second)]);
        executor.add_node(Box::new(third));

        assert_eq!(executor.len(), 3);
        assert!(executor.backing.iter().all(|wrapper| wrapper.priority == 0));
    }

    #[test]
    fn test_add_node_started() {
        let (_, rx) = unbounded();
        let mut executor = SimpleExecutor::new(rx);
        assert!(executor.is_empty());
        executor.start();

        thread::sleep(Duration::from_millis(5));
        let (node, _, _) = CountingNode::new(1_000);
        executor.add_node(Box::new(node));

        assert_eq!(executor.len(), 1);
        assert!(!executor.is_empty());
        assert!(executor.backing[0].priority >= 5_000);
    }

    #[test]
    fn test_update_loop() {
        let (tx, rx) = unbounded();
        let (fast, fast_updates, fast_state) = CountingNode::new(10_000);
        let (slow, slow_updates, slow_state) = CountingNode::new(25_000);

        let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(fast), Box::new(slow)]);

        let handle = thread::spawn(move || {
            executor.update_loop();
            executor
        });

        thread::sleep(Duration::from_millis(100));
        tx.send(true).unwrap();

        let executor = handle.join().unwrap();
        assert!(executor.backing.iter().all(|wrapper| wrapper.priority == 0));
        assert_eq!(*fast_state.lock().unwrap(), State::Stopped);
        assert_eq!(*slow_state.lock().unwrap(), State::Stopped);
        assert!(fast_updates.load(Ordering::SeqCst) >= 5);
        assert!(slow_updates.load(Ordering::SeqCst) >= 2);

        assert!(executor.interrupted);
        assert_eq!(executor.state(), ExecutorState::Stopped);
    }
}
