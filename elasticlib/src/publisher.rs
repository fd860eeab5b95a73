//!
//! The Notification Publisher
//!
//! Serializes notifications to JSON and writes them to the
//! `/Elastic/RobotNotifications` topic, one publish per notification.
//!

use std::fmt::Display;

use tracing::{debug, error};

use elastic_core::Publisher;
use elastic_tables::{NetworkTableInstance, PubSubOptions, StringPublisher};

use crate::{ElasticError, Notification, Result, NOTIFICATION_TOPIC};

/// Publishes notifications to the dashboard
#[derive(Clone)]
pub struct NotificationPublisher<P = StringPublisher> {
    publisher: P,
}

impl NotificationPublisher<StringPublisher> {
    /// Bind the notification topic of `instance`.
    ///
    /// Every notification is delivered, including repeats of the previous one.
    pub fn new(instance: &NetworkTableInstance) -> Self {
        let options = PubSubOptions::default()
            .with_send_all(true)
            .with_keep_duplicates(true);
        Self::with_publisher(instance.get_string_topic(NOTIFICATION_TOPIC).publish(options))
    }
}

impl<P> NotificationPublisher<P> {
    /// Publish notifications through an existing string publisher
    pub fn with_publisher(publisher: P) -> Self {
        Self { publisher }
    }
}

impl<P> NotificationPublisher<P>
where
    P: Publisher<Data = String>,
    P::Error: Display,
{
    /// Serialize and publish a notification, returning any failure
    pub fn try_send(&mut self, notification: &Notification) -> Result<()> {
        let json = notification.to_json()?;
        self.publisher
            .publish(json)
            .map_err(|err| ElasticError::publish(NOTIFICATION_TOPIC, err))?;

        debug!(
            level = %notification.level(),
            title = notification.title(),
            "sent notification"
        );
        Ok(())
    }

    /// Serialize and publish a notification.
    ///
    /// A notification that fails is logged and dropped.
    pub fn send(&mut self, notification: &Notification) {
        if let Err(err) = self.try_send(notification) {
            error!(
                error = %err,
                title = notification.title(),
                "dropping notification"
            );
        }
    }
}
