//!
//! Elastic Tables
//!
//! An in-process network table: named, typed topics that publishers write
//! values to and subscribers read values from.  Every value published to a
//! topic is delivered to every live subscriber of that topic in publish
//! order.
//!
//! ```
//! use elastic_core::{Publisher, Subscriber};
//! use elastic_tables::{NetworkTableInstance, PubSubOptions};
//!
//! let instance = NetworkTableInstance::new();
//! let topic = instance.get_string_topic("/Elastic/SelectedTab");
//! let mut subscriber = topic.subscribe();
//! let mut publisher = topic.publish(PubSubOptions::default());
//!
//! publisher.publish(String::from("Autonomous")).unwrap();
//! assert_eq!(subscriber.get().as_deref(), Some("Autonomous"));
//! ```
//!

#![deny(missing_docs)]

pub mod error;
pub use error::TableError;

pub mod value;
pub use value::{TopicType, Value};

pub mod topic;
pub use topic::{PubSubOptions, Topic, TopicPublisher, TopicSubscriber};

pub mod instance;
pub use instance::{NetworkTable, NetworkTableInstance};

/// Publisher of string values, as used for notifications and tab selection
pub type StringPublisher = TopicPublisher<String>;
