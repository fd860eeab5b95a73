//!
//! The Tab Selector
//!
//! Switches the dashboard to a tab by publishing its name (or its index as
//! text) to `/Elastic/SelectedTab`.  A name that matches no tab has no
//! effect on the dashboard.
//!

use std::fmt::Display;

use tracing::{debug, error};

use elastic_core::Publisher;
use elastic_tables::{NetworkTableInstance, PubSubOptions, StringPublisher};

use crate::{ElasticError, Result, SELECTED_TAB_TOPIC};

/// Selects the tab shown by the dashboard
#[derive(Clone)]
pub struct TabSelector<P = StringPublisher> {
    publisher: P,
}

impl TabSelector<StringPublisher> {
    /// Bind the selected tab topic of `instance`.
    ///
    /// Selecting the same tab twice is delivered twice so that the dashboard
    /// switches back after the user has navigated away.
    pub fn new(instance: &NetworkTableInstance) -> Self {
        let options = PubSubOptions::default().with_keep_duplicates(true);
        Self::with_publisher(instance.get_string_topic(SELECTED_TAB_TOPIC).publish(options))
    }
}

impl<P> TabSelector<P> {
    /// Select tabs through an existing string publisher
    pub fn with_publisher(publisher: P) -> Self {
        Self { publisher }
    }
}

impl<P> TabSelector<P>
where
    P: Publisher<Data = String>,
    P::Error: Display,
{
    /// Select the tab with the given name, returning any failure.
    ///
    /// If the name is a number the dashboard selects the tab at that index.
    pub fn try_select(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        debug!(tab = %name, "selecting tab");
        self.publisher
            .publish(name)
            .map_err(|err| ElasticError::publish(SELECTED_TAB_TOPIC, err))
    }

    /// Select the tab with the given name.  Failures are logged.
    pub fn select(&mut self, name: impl Into<String>) {
        if let Err(err) = self.try_select(name) {
            error!(error = %err, "failed to select tab");
        }
    }

    /// Select the tab at the given index.  The index is sent as given; one
    /// that is negative or past the last tab has no effect on the dashboard.
    pub fn select_index(&mut self, index: i32) {
        self.select(index.to_string());
    }
}
