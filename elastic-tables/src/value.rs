//!
//! Values carried by topics.
//!

use std::fmt;

/// A single value stored in a topic
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean value
    Boolean(bool),
    /// A double precision number
    Double(f64),
    /// A string
    String(String),
}

impl Value {
    /// The name of the value's type as it appears in topic metadata
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => bool::TYPE_NAME,
            Value::Double(_) => f64::TYPE_NAME,
            Value::String(_) => String::TYPE_NAME,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{value}"),
            Value::Double(value) => write!(f, "{value}"),
            Value::String(value) => f.write_str(value),
        }
    }
}

/// Rust types that can be carried by a topic
pub trait TopicType: Clone + Send + 'static {
    /// The name of the type as it appears in topic metadata
    const TYPE_NAME: &'static str;

    /// Wrap this value into a table value
    fn into_value(self) -> Value;

    /// Read this type out of a table value, if the value has this type
    fn from_value(value: &Value) -> Option<Self>;
}

impl TopicType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl TopicType for f64 {
    const TYPE_NAME: &'static str = "double";

    fn into_value(self) -> Value {
        Value::Double(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }
}

impl TopicType for String {
    const TYPE_NAME: &'static str = "string";

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}
