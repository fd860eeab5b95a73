//!
//! Network table errors.
//!

/// An error from publishing to a topic
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The topic already carries values of another type
    #[error("topic {topic} has type {expected} but a {found} value was published")]
    TypeMismatch {
        /// The name of the topic
        topic: String,
        /// The type the topic was created with
        expected: &'static str,
        /// The type of the rejected value
        found: &'static str,
    },
}
