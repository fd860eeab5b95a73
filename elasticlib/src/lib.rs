//!
//! # elasticlib
//!
//! A small client for the Elastic dashboard.  Robot code builds a
//! [`Notification`], hands it to an [`Elastic`] client and the client
//! publishes it as JSON on the `/Elastic/RobotNotifications` topic, where
//! the dashboard picks it up and pops up an alert.  The same client can
//! switch the dashboard's visible tab through `/Elastic/SelectedTab`.
//!
//! ```
//! use elastic_tables::NetworkTableInstance;
//! use elasticlib::{Elastic, Notification, NotificationLevel};
//!
//! let instance = NetworkTableInstance::new();
//! let mut elastic = Elastic::new(&instance);
//!
//! elastic.send_notification(
//!     &Notification::default()
//!         .with_level(NotificationLevel::Warning)
//!         .with_title("Battery low")
//!         .with_description("Swap the battery before the next match")
//!         .with_display_seconds(5.0),
//! );
//! elastic.select_tab("Autonomous");
//! ```
//!
//! Sending never fails from the caller's point of view: a notification that
//! cannot be serialized or published is logged and dropped.  Callers that
//! want to know use the `try_` variants, which return an [`ElasticError`].
//!

#![deny(missing_docs)]

pub mod error;
pub use error::{ElasticError, Result};

pub mod notification;
pub use notification::{Notification, NotificationLevel};

pub mod publisher;
pub use publisher::NotificationPublisher;

pub mod tab;
pub use tab::TabSelector;

pub mod client;
pub use client::Elastic;

/// The topic notifications are published to
pub const NOTIFICATION_TOPIC: &str = "/Elastic/RobotNotifications";

/// The topic the selected tab is published to
pub const SELECTED_TAB_TOPIC: &str = "/Elastic/SelectedTab";
