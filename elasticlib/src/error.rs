//! Error types for the Elastic client

/// Result type alias using ElasticError
pub type Result<T> = std::result::Result<T, ElasticError>;

/// An error from sending a notification or selecting a tab
#[derive(Debug, thiserror::Error)]
pub enum ElasticError {
    /// The notification could not be encoded as JSON
    #[error("failed to serialize notification: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The topic rejected the value
    #[error("failed to publish to {topic}: {reason}")]
    Publish {
        /// The topic the value was published to
        topic: &'static str,
        /// Why the publish failed
        reason: String,
    },
}

impl ElasticError {
    /// Build a publish error for `topic` from any displayable transport error
    pub(crate) fn publish(topic: &'static str, err: impl std::fmt::Display) -> Self {
        ElasticError::Publish {
            topic,
            reason: err.to_string(),
        }
    }
}
