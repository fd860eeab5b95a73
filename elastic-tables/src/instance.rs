//!
//! Network Table Instances
//!
//! An instance owns every topic by name.  Handles to the same name share
//! the same topic, so a publisher created from one handle reaches the
//! subscribers created from any other.
//!

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use tracing::debug;

use crate::{
    topic::{PubSubOptions, Topic, TopicState},
    TableError, TopicType, Value,
};

static DEFAULT_INSTANCE: OnceLock<NetworkTableInstance> = OnceLock::new();

/// A collection of named topics
#[derive(Clone, Default)]
pub struct NetworkTableInstance {
    topics: Arc<Mutex<HashMap<String, Arc<TopicState>>>>,
}

impl NetworkTableInstance {
    /// Create a new, empty instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide default instance, creating it on first use.
    ///
    /// Every call returns a handle to the same topics.
    pub fn get_default() -> Self {
        DEFAULT_INSTANCE.get_or_init(NetworkTableInstance::new).clone()
    }

    fn topic_state(&self, name: &str) -> Arc<TopicState> {
        let mut topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(topic = name, "creating topic");
                Arc::new(TopicState::new(name.to_string()))
            })
            .clone()
    }

    fn find_topic_state(&self, name: &str) -> Option<Arc<TopicState>> {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        topics.get(name).cloned()
    }

    /// Get a typed handle to the topic with the given name
    pub fn get_topic<T: TopicType>(&self, name: &str) -> Topic<T> {
        Topic::new(self.topic_state(name))
    }

    /// Get a handle to a string topic
    pub fn get_string_topic(&self, name: &str) -> Topic<String> {
        self.get_topic(name)
    }

    /// Get a handle to a double topic
    pub fn get_double_topic(&self, name: &str) -> Topic<f64> {
        self.get_topic(name)
    }

    /// Get a handle to a boolean topic
    pub fn get_boolean_topic(&self, name: &str) -> Topic<bool> {
        self.get_topic(name)
    }

    /// Get the table rooted at `path`, e.g. `SmartDashboard`
    pub fn get_table(&self, path: &str) -> NetworkTable {
        let trimmed = path.trim_matches('/');
        NetworkTable {
            instance: self.clone(),
            path: format!("/{trimmed}"),
        }
    }

    /// The names of every topic that has been created, sorted
    pub fn topic_names(&self) -> Vec<String> {
        let topics = self.topics.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = topics.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether `other` is a handle to the same topics as this instance
    pub fn same_instance(&self, other: &NetworkTableInstance) -> bool {
        Arc::ptr_eq(&self.topics, &other.topics)
    }
}

/// A keyed view of the topics below one path of an instance
#[derive(Clone)]
pub struct NetworkTable {
    instance: NetworkTableInstance,
    path: String,
}

impl NetworkTable {
    /// The path of the table, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full topic name of `key` in this table
    pub fn topic_name(&self, key: &str) -> String {
        format!("{}/{}", self.path, key)
    }

    fn put(&self, key: &str, value: Value) -> Result<(), TableError> {
        self.instance
            .topic_state(&self.topic_name(key))
            .set(value, PubSubOptions::default())
    }

    fn get<T: TopicType>(&self, key: &str) -> Option<T> {
        self.instance
            .find_topic_state(&self.topic_name(key))
            .and_then(|state| state.current())
            .as_ref()
            .and_then(T::from_value)
    }

    /// Put a number in the table
    pub fn put_number(&self, key: &str, value: f64) -> Result<(), TableError> {
        self.put(key, Value::Double(value))
    }

    /// Put a string in the table
    pub fn put_string(&self, key: &str, value: impl Into<String>) -> Result<(), TableError> {
        self.put(key, Value::String(value.into()))
    }

    /// Put a boolean in the table
    pub fn put_boolean(&self, key: &str, value: bool) -> Result<(), TableError> {
        self.put(key, Value::Boolean(value))
    }

    /// Get a number from the table
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key)
    }

    /// Get a string from the table
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key)
    }

    /// Get a boolean from the table
    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.get(key)
    }
}
