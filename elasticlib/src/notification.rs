//!
//! Notifications
//!
//! A notification holds everything the dashboard needs to display one
//! alert: its level, title and description, how long it stays on screen
//! and how large it is drawn.
//!
//! None of the fields are validated.  Unknown levels, negative sizes and
//! negative display times are passed to the dashboard as they are.
//!

use std::fmt;

use serde::{
    de::Deserializer,
    ser::{Error as _, SerializeStruct, Serializer},
    Deserialize, Serialize,
};

/// The default time a notification stays on screen (in ms)
pub const DEFAULT_DISPLAY_TIME_MILLIS: i32 = 3000;
/// The default width of a notification
pub const DEFAULT_WIDTH: f64 = 350.0;
/// The height that makes the dashboard size a notification to its text
pub const AUTOMATIC_HEIGHT: f64 = -1.0;
/// The display time that keeps a notification on screen until dismissed
pub const NO_AUTO_DISMISS: i32 = 0;

/// The severity of a notification
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    /// Informational message
    #[default]
    Info,
    /// Warning message
    Warning,
    /// Error message
    Error,
    /// Any other level, sent to the dashboard verbatim
    Other(String),
}

impl NotificationLevel {
    /// The level as it appears on the wire
    pub fn as_str(&self) -> &str {
        match self {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARNING",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Other(level) => level,
        }
    }
}

impl From<&str> for NotificationLevel {
    fn from(level: &str) -> Self {
        match level {
            "INFO" => NotificationLevel::Info,
            "WARNING" => NotificationLevel::Warning,
            "ERROR" => NotificationLevel::Error,
            other => NotificationLevel::Other(other.to_string()),
        }
    }
}

impl From<String> for NotificationLevel {
    fn from(level: String) -> Self {
        match level.as_str() {
            "INFO" | "WARNING" | "ERROR" => NotificationLevel::from(level.as_str()),
            _ => NotificationLevel::Other(level),
        }
    }
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NotificationLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NotificationLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(NotificationLevel::from)
    }
}

/// A notification to be displayed by the Elastic dashboard
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Notification {
    level: NotificationLevel,
    title: String,
    description: String,
    #[serde(rename = "displayTime")]
    display_time_millis: i32,
    width: f64,
    height: f64,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            level: NotificationLevel::Info,
            title: String::new(),
            description: String::new(),
            display_time_millis: DEFAULT_DISPLAY_TIME_MILLIS,
            width: DEFAULT_WIDTH,
            height: AUTOMATIC_HEIGHT,
        }
    }
}

impl Notification {
    /// Create a notification with the default display time and size
    pub fn new(
        level: impl Into<NotificationLevel>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Create a notification with a display time (in ms) and the default size
    pub fn with_time(
        level: impl Into<NotificationLevel>,
        title: impl Into<String>,
        description: impl Into<String>,
        display_time_millis: i32,
    ) -> Self {
        Self::new(level, title, description).with_display_milliseconds(display_time_millis)
    }

    /// Create a notification with a size and the default display time.
    ///
    /// A height below zero is sized automatically by the dashboard.
    pub fn with_size(
        level: impl Into<NotificationLevel>,
        title: impl Into<String>,
        description: impl Into<String>,
        width: f64,
        height: f64,
    ) -> Self {
        Self::new(level, title, description)
            .with_width(width)
            .with_height(height)
    }

    /// Create a notification with every property specified
    pub fn with_all(
        level: impl Into<NotificationLevel>,
        title: impl Into<String>,
        description: impl Into<String>,
        display_time_millis: i32,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            level: level.into(),
            title: title.into(),
            description: description.into(),
            display_time_millis,
            width,
            height,
        }
    }

    /// The level of the notification
    pub fn level(&self) -> &NotificationLevel {
        &self.level
    }

    /// Update the level of the notification
    pub fn set_level(&mut self, level: impl Into<NotificationLevel>) {
        self.level = level.into();
    }

    /// The title of the notification
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Update the title of the notification
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The description of the notification
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Update the description of the notification
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// How long the notification stays on screen (in ms)
    pub fn display_time_millis(&self) -> i32 {
        self.display_time_millis
    }

    /// Update how long the notification stays on screen (in ms)
    pub fn set_display_time_millis(&mut self, display_time_millis: i32) {
        self.display_time_millis = display_time_millis;
    }

    /// Update how long the notification stays on screen (in seconds),
    /// rounded to the nearest millisecond
    pub fn set_display_time_seconds(&mut self, seconds: f64) {
        self.display_time_millis = (seconds * 1000.0).round() as i32;
    }

    /// The width of the notification
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Update the width of the notification
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    /// The height of the notification
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Update the height of the notification.
    ///
    /// A height of -1 is sized automatically by the dashboard.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    /// Whether the dashboard dismisses this notification on its own
    pub fn is_auto_dismissed(&self) -> bool {
        self.display_time_millis != NO_AUTO_DISMISS
    }

    /// Set the level
    pub fn with_level(mut self, level: impl Into<NotificationLevel>) -> Self {
        self.set_level(level);
        self
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.set_title(title);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.set_description(description);
        self
    }

    /// Set the display time in seconds
    pub fn with_display_seconds(mut self, seconds: f64) -> Self {
        self.set_display_time_seconds(seconds);
        self
    }

    /// Set the display time in milliseconds
    pub fn with_display_milliseconds(mut self, display_time_millis: i32) -> Self {
        self.set_display_time_millis(display_time_millis);
        self
    }

    /// Set the width
    pub fn with_width(mut self, width: f64) -> Self {
        self.set_width(width);
        self
    }

    /// Set the height
    pub fn with_height(mut self, height: f64) -> Self {
        self.set_height(height);
        self
    }

    /// Let the dashboard size the notification to its text
    pub fn with_automatic_height(self) -> Self {
        self.with_height(AUTOMATIC_HEIGHT)
    }

    /// Keep the notification on screen until it is dismissed.
    ///
    /// Setting a display time above zero re-enables auto dismissal.
    pub fn with_no_auto_dismiss(self) -> Self {
        self.with_display_milliseconds(NO_AUTO_DISMISS)
    }

    /// The notification as a JSON object with the keys `level`, `title`,
    /// `description`, `displayTime`, `width` and `height`
    pub fn to_map(&self) -> Result<serde_json::Map<String, serde_json::Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde_json::Error::custom(format_args!(
                "notification serialized to {other} instead of an object"
            ))),
        }
    }

    /// The notification as a compact JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Notification", 6)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("displayTime", &self.display_time_millis)?;
        state.serialize_field("width", &Dimension("width", self.width))?;
        state.serialize_field("height", &Dimension("height", self.height))?;
        state.end()
    }
}

/// A width or height on the wire.
///
/// Whole numbers are written as integers (`350`, not `350.0`).  JSON has no
/// representation for NaN or infinity so those fail to serialize.
struct Dimension(&'static str, f64);

/// Largest magnitude at which every whole f64 is exactly an i64
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Dimension(name, value) = *self;
        if !value.is_finite() {
            return Err(S::Error::custom(format_args!(
                "{name} must be a finite number, got {value}"
            )));
        }

        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}
