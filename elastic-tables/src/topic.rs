//!
//! Topics, Publishers and Subscribers
//!
//! A topic stores its most recent value and a crossbeam channel per
//! subscriber.  Publishers push values into every subscriber's channel;
//! subscribers drain their channel whenever they are read.
//!

use std::{
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};

use crossbeam::channel::{self, Receiver, Sender};

use tracing::trace;

use elastic_core::{Publisher, Subscriber};

use crate::{TableError, TopicType, Value};

/// Options controlling how a publisher delivers values to subscribers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PubSubOptions {
    /// Queue every published value for subscribers.  When false, a newly
    /// published value replaces the unread values that were also published
    /// without send_all; values queued with send_all are kept.
    pub send_all: bool,
    /// Deliver a value even when it is equal to the topic's current value.
    /// When false, such a publish is dropped.
    pub keep_duplicates: bool,
}

impl PubSubOptions {
    /// Enable or disable queueing of every value
    pub fn with_send_all(mut self, send_all: bool) -> Self {
        self.send_all = send_all;
        self
    }

    /// Enable or disable delivery of repeated values
    pub fn with_keep_duplicates(mut self, keep_duplicates: bool) -> Self {
        self.keep_duplicates = keep_duplicates;
        self
    }
}

/// A value waiting in a subscriber's queue
struct Queued {
    value: Value,
    // Published without send_all, so a later such publish may replace it
    replaceable: bool,
}

/// One subscriber's queue as seen from the topic
struct SubscriberQueue {
    tx: Sender<Queued>,
    // Held so that a publisher without send_all can discard unread values
    rx: Receiver<Queued>,
    // Dead once the subscriber is dropped
    alive: Weak<()>,
}

struct TopicInner {
    /// The type of the topic, fixed by the first value published to it
    type_name: Option<&'static str>,
    /// The most recent value
    value: Option<Value>,
    /// The queues of every subscriber of the topic
    subscribers: Vec<SubscriberQueue>,
}

/// The state of a topic, shared by every handle to it
pub(crate) struct TopicState {
    name: String,
    inner: Mutex<TopicInner>,
}

impl TopicState {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            inner: Mutex::new(TopicInner {
                type_name: None,
                value: None,
                subscribers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TopicInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The type of the topic, if any value has been published to it
    pub(crate) fn type_name(&self) -> Option<&'static str> {
        self.lock().type_name
    }

    /// The most recent value of the topic
    pub(crate) fn current(&self) -> Option<Value> {
        self.lock().value.clone()
    }

    /// Set the value of the topic and deliver it to every live subscriber
    pub(crate) fn set(&self, value: Value, options: PubSubOptions) -> Result<(), TableError> {
        let mut inner = self.lock();

        let found = value.type_name();
        let topic_type = inner.type_name;
        match topic_type {
            Some(expected) if expected != found => {
                return Err(TableError::TypeMismatch {
                    topic: self.name.clone(),
                    expected,
                    found,
                });
            }
            Some(_) => {}
            None => inner.type_name = Some(found),
        }

        if !options.keep_duplicates {
            if let Some(current) = inner.value.as_ref() {
                if *current == value {
                    trace!(topic = %self.name, "dropping duplicate value");
                    return Ok(());
                }
            }
        }

        inner
            .subscribers
            .retain(|subscriber| subscriber.alive.strong_count() > 0);
        for subscriber in inner.subscribers.iter() {
            // The topic holds a receiver so the channel cannot be disconnected
            if !options.send_all {
                // Unread latest-only values are replaced, send_all values stay
                let kept: Vec<Queued> = subscriber
                    .rx
                    .try_iter()
                    .filter(|queued| !queued.replaceable)
                    .collect();
                for queued in kept {
                    let _ = subscriber.tx.send(queued);
                }
            }
            let _ = subscriber.tx.send(Queued {
                value: value.clone(),
                replaceable: !options.send_all,
            });
        }

        trace!(
            topic = %self.name,
            subscribers = inner.subscribers.len(),
            %value,
            "published value"
        );
        inner.value = Some(value);
        Ok(())
    }

    /// Register a new subscriber queue, returning its receiver and the
    /// current value of the topic
    fn subscribe(&self) -> (Receiver<Queued>, Arc<()>, Option<Value>) {
        let mut inner = self.lock();
        let (tx, rx) = channel::unbounded();
        let alive = Arc::new(());
        inner.subscribers.push(SubscriberQueue {
            tx,
            rx: rx.clone(),
            alive: Arc::downgrade(&alive),
        });

        let current = inner.value.clone();
        (rx, alive, current)
    }
}

/// A handle to a typed topic of a network table instance
pub struct Topic<T: TopicType> {
    state: Arc<TopicState>,
    phantom: PhantomData<T>,
}

impl<T: TopicType> Topic<T> {
    pub(crate) fn new(state: Arc<TopicState>) -> Self {
        Self {
            state,
            phantom: PhantomData,
        }
    }

    /// Whether any value has been published to the topic
    pub fn exists(&self) -> bool {
        self.state.type_name().is_some()
    }

    /// Create a publisher for the topic
    pub fn publish(&self, options: PubSubOptions) -> TopicPublisher<T> {
        TopicPublisher {
            state: self.state.clone(),
            options,
            phantom: PhantomData,
        }
    }

    /// Create a subscriber for the topic.
    ///
    /// Note: the subscriber starts out holding the topic's current value, if
    /// the topic has one of the subscriber's type.
    pub fn subscribe(&self) -> TopicSubscriber<T> {
        let (rx, alive, current) = self.state.subscribe();
        TopicSubscriber {
            rx,
            data: current.as_ref().and_then(T::from_value),
            _alive: alive,
        }
    }
}

impl<T: TopicType> Clone for Topic<T> {
    fn clone(&self) -> Self {
        Self::new(self.state.clone())
    }
}

/// A publisher of values of type `T` to a single topic
pub struct TopicPublisher<T: TopicType> {
    state: Arc<TopicState>,
    options: PubSubOptions,
    phantom: PhantomData<T>,
}

impl<T: TopicType> Clone for TopicPublisher<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            options: self.options,
            phantom: PhantomData,
        }
    }
}

impl<T: TopicType> Publisher for TopicPublisher<T> {
    type Data = T;
    type Error = TableError;

    fn publish(&mut self, data: Self::Data) -> Result<(), Self::Error> {
        self.state.set(data.into_value(), self.options)
    }
}

/// A subscriber to values of type `T` on a single topic
pub struct TopicSubscriber<T: TopicType> {
    /// The receiving end of this subscriber's queue
    rx: Receiver<Queued>,
    /// The most recent value read by the subscriber
    data: Option<T>,
    /// Keeps this subscriber's queue registered with the topic
    _alive: Arc<()>,
}

impl<T: TopicType> TopicSubscriber<T> {
    /// Drain every value queued for this subscriber, oldest first.
    ///
    /// Values of another type are skipped.
    pub fn read_queue(&mut self) -> Vec<T> {
        let values: Vec<T> = self
            .rx
            .try_iter()
            .filter_map(|queued| T::from_value(&queued.value))
            .collect();

        if let Some(last) = values.last() {
            self.data = Some(last.clone());
        }

        values
    }
}

impl<T: TopicType> Subscriber for TopicSubscriber<T> {
    type Target = Option<T>;

    fn get(&mut self) -> &Self::Target {
        if let Some(data) = self
            .rx
            .try_iter()
            .filter_map(|queued| T::from_value(&queued.value))
            .last()
        {
            self.data = Some(data);
        }

        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use rand::Rng;

    fn string_topic(name: &str) -> Topic<String> {
        Topic::new(Arc::new(TopicState::new(name.to_string())))
    }

    #[test]
    fn test_publish_to_subscriber() {
        let topic = string_topic("/test/string");
        let mut subscriber = topic.subscribe();
        let mut publisher = topic.publish(PubSubOptions::default());

        assert_eq!(subscriber.get(), &None);
        publisher.publish(String::from("hello")).unwrap();
        assert_eq!(subscriber.get().as_deref(), Some("hello"));
        assert!(topic.exists());
    }

    #[test]
    fn test_new_subscriber_sees_current_value() {
        let topic = string_topic("/test/current");
        let mut publisher = topic.publish(PubSubOptions::default());
        publisher.publish(String::from("first")).unwrap();

        let mut subscriber = topic.subscribe();
        assert_eq!(subscriber.get().as_deref(), Some("first"));
        assert!(subscriber.read_queue().is_empty());
    }

    #[test]
    fn test_send_all_queues_every_value() {
        let topic = string_topic("/test/send_all");
        let mut subscriber = topic.subscribe();
        let mut publisher = topic.publish(PubSubOptions::default().with_send_all(true));

        for value in ["a", "b", "c"] {
            publisher.publish(value.to_string()).unwrap();
        }

        assert_eq!(subscriber.read_queue(), vec!["a", "b", "c"]);
        assert_eq!(subscriber.get().as_deref(), Some("c"));
    }

    #[test]
    fn test_without_send_all_only_latest_is_queued() {
        let topic = string_topic("/test/latest");
        let mut subscriber = topic.subscribe();
        let mut publisher = topic.publish(PubSubOptions::default());

        for value in ["a", "b", "c"] {
            publisher.publish(value.to_string()).unwrap();
        }

        assert_eq!(subscriber.read_queue(), vec!["c"]);
    }

    #[test]
    fn test_latest_only_publisher_keeps_queued_values_of_others() {
        let topic = string_topic("/test/mixed");
        let mut subscriber = topic.subscribe();
        let mut alerts = topic.publish(
            PubSubOptions::default()
                .with_send_all(true)
                .with_keep_duplicates(true),
        );
        let mut status = topic.publish(PubSubOptions::default());

        alerts.publish(String::from("alert-1")).unwrap();
        status.publish(String::from("status-1")).unwrap();
        alerts.publish(String::from("alert-2")).unwrap();
        status.publish(String::from("status-2")).unwrap();

        assert_eq!(
            subscriber.read_queue(),
            vec!["alert-1", "alert-2", "status-2"]
        );
    }

    #[test]
    fn test_duplicates_dropped_without_keep_duplicates() {
        let topic = string_topic("/test/duplicates");
        let mut subscriber = topic.subscribe();
        let mut publisher = topic.publish(PubSubOptions::default().with_send_all(true));

        publisher.publish(String::from("same")).unwrap();
        publisher.publish(String::from("same")).unwrap();

        assert_eq!(subscriber.read_queue(), vec!["same"]);
    }

    #[test]
    fn test_keep_duplicates_delivers_repeats() {
        let topic = string_topic("/test/keep_duplicates");
        let mut subscriber = topic.subscribe();
        let options = PubSubOptions::default()
            .with_send_all(true)
            .with_keep_duplicates(true);
        let mut publisher = topic.publish(options);

        publisher.publish(String::from("same")).unwrap();
        publisher.publish(String::from("same")).unwrap();

        assert_eq!(subscriber.read_queue(), vec!["same", "same"]);
    }

    #[test]
    fn test_type_mismatch() {
        let state = Arc::new(TopicState::new(String::from("/test/typed")));
        let mut string_publisher = Topic::<String>::new(state.clone()).publish(PubSubOptions::default());
        let mut double_publisher = Topic::<f64>::new(state).publish(PubSubOptions::default());

        string_publisher.publish(String::from("text")).unwrap();
        assert_eq!(
            double_publisher.publish(1.0),
            Err(TableError::TypeMismatch {
                topic: String::from("/test/typed"),
                expected: "string",
                found: "double",
            })
        );
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let topic = string_topic("/test/pruned");
        let subscriber = topic.subscribe();
        let mut publisher = topic.publish(PubSubOptions::default());
        drop(subscriber);

        publisher.publish(String::from("value")).unwrap();
        assert!(topic.state.lock().subscribers.is_empty());
    }

    #[test]
    fn test_order_preserved_across_threads() {
        let topic = string_topic("/test/ordered");
        let mut subscriber = topic.subscribe();
        let options = PubSubOptions::default()
            .with_send_all(true)
            .with_keep_duplicates(true);

        let mut rng = rand::thread_rng();
        let values: Vec<String> = (0..100)
            .map(|_| rng.gen_range(0..1_000u32).to_string())
            .collect();

        let mut publisher = topic.publish(options);
        let sent = values.clone();
        thread::spawn(move || {
            for value in sent {
                publisher.publish(value).unwrap();
            }
        })
        .join()
        .unwrap();

        assert_eq!(subscriber.read_queue(), values);
    }
}
