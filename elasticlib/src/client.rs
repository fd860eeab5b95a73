//!
//! The Elastic Client
//!
//! One client is created at startup from the network table instance the
//! robot uses and handed to whatever needs to talk to the dashboard.
//! Clones share the same topics.
//!

use std::fmt::Display;

use elastic_core::Publisher;
use elastic_tables::{NetworkTableInstance, StringPublisher};

use crate::{Notification, NotificationPublisher, Result, TabSelector};

/// A client for the Elastic dashboard
#[derive(Clone)]
pub struct Elastic<P = StringPublisher> {
    notifications: NotificationPublisher<P>,
    tabs: TabSelector<P>,
}

impl Elastic<StringPublisher> {
    /// Create a client publishing to the topics of `instance`
    pub fn new(instance: &NetworkTableInstance) -> Self {
        Self {
            notifications: NotificationPublisher::new(instance),
            tabs: TabSelector::new(instance),
        }
    }
}

impl Default for Elastic<StringPublisher> {
    /// A client bound to the process-wide default instance
    fn default() -> Self {
        Self::new(&NetworkTableInstance::get_default())
    }
}

impl<P> Elastic<P> {
    /// Create a client from existing publishers
    pub fn with_publishers(notifications: P, selected_tab: P) -> Self {
        Self {
            notifications: NotificationPublisher::with_publisher(notifications),
            tabs: TabSelector::with_publisher(selected_tab),
        }
    }
}

impl<P> Elastic<P>
where
    P: Publisher<Data = String>,
    P::Error: Display,
{
    /// Send a notification to the dashboard.  Failures are logged and the
    /// notification is dropped.
    pub fn send_notification(&mut self, notification: &Notification) {
        self.notifications.send(notification);
    }

    /// Send a notification to the dashboard, returning any failure
    pub fn try_send_notification(&mut self, notification: &Notification) -> Result<()> {
        self.notifications.try_send(notification)
    }

    /// Select the dashboard tab with the given name, or the tab at the
    /// given index if the name is a number.  Failures are logged.
    pub fn select_tab(&mut self, name: impl Into<String>) {
        self.tabs.select(name);
    }

    /// Select the dashboard tab with the given name, returning any failure
    pub fn try_select_tab(&mut self, name: impl Into<String>) -> Result<()> {
        self.tabs.try_select(name)
    }

    /// Select the dashboard tab at the given index
    pub fn select_tab_index(&mut self, index: i32) {
        self.tabs.select_index(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use elastic_core::Subscriber;

    use crate::{ElasticError, NotificationLevel, NOTIFICATION_TOPIC, SELECTED_TAB_TOPIC};

    #[test]
    fn test_default_notification_on_the_wire() {
        let instance = NetworkTableInstance::new();
        let mut subscriber = instance.get_string_topic(NOTIFICATION_TOPIC).subscribe();
        let mut elastic = Elastic::new(&instance);

        elastic.send_notification(&Notification::default());

        assert_eq!(
            subscriber.get().as_deref(),
            Some(r#"{"level":"INFO","title":"","description":"","displayTime":3000,"width":350,"height":-1}"#)
        );
    }

    #[test]
    fn test_failed_send_returns_normally() {
        let instance = NetworkTableInstance::new();
        let mut subscriber = instance.get_string_topic(NOTIFICATION_TOPIC).subscribe();
        let mut elastic = Elastic::new(&instance);
        let broken = Notification::default().with_height(f64::NEG_INFINITY);

        elastic.send_notification(&broken);
        assert_eq!(subscriber.get(), &None);

        assert!(matches!(
            elastic.try_send_notification(&broken),
            Err(ElasticError::Serialize(_))
        ));
    }

    #[test]
    fn test_select_tab_and_index() {
        let instance = NetworkTableInstance::new();
        let mut subscriber = instance.get_string_topic(SELECTED_TAB_TOPIC).subscribe();
        let mut elastic = Elastic::new(&instance);

        elastic.select_tab("Pit");
        elastic.try_select_tab("Autonomous").unwrap();
        elastic.select_tab_index(0);

        assert_eq!(subscriber.read_queue(), vec!["0"]);
    }

    #[test]
    fn test_clones_share_topics() {
        let instance = NetworkTableInstance::new();
        let mut subscriber = instance.get_string_topic(NOTIFICATION_TOPIC).subscribe();
        let elastic = Elastic::new(&instance);

        let handles: Vec<_> = (0..4)
            .map(|index| {
                let mut elastic = elastic.clone();
                thread::spawn(move || {
                    elastic.send_notification(
                        &Notification::default()
                            .with_level(NotificationLevel::Warning)
                            .with_title(format!("thread {index}")),
                    );
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let sent = subscriber.read_queue();
        assert_eq!(sent.len(), 4);
        for index in 0..4 {
            assert!(sent.iter().any(|json| json.contains(&format!("thread {index}"))));
        }
    }

    #[test]
    fn test_default_client_uses_default_instance() {
        let mut subscriber = NetworkTableInstance::get_default()
            .get_string_topic(SELECTED_TAB_TOPIC)
            .subscribe();

        Elastic::default().select_tab("From default client");
        assert_eq!(subscriber.get().as_deref(), Some("From default client"));
    }
}
