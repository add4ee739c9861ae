//! Event payloads, replies, and common result types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use serde_with::{DefaultOnNull, Map, serde_as};

/// Error type used throughout the crate.
pub type Err = anyhow::Error;
/// Result type used throughout the crate.
pub type Res<T> = Result<T, Err>;
/// Result of an operation that produces nothing.
pub type Void = Res<()>;

// Events.

/// Event type emitted once an image sent to the chat has been analyzed.
pub const IMAGE_PROCESSED_EVENT: &str = "telegram.image.processed";

/// Event type emitted for a plain text chat message.
pub const TEXT_EVENT: &str = "telegram.text";

fn default_specversion() -> String {
    "1.0".to_string()
}

/// A CloudEvent as delivered to the responder.
///
/// Only the attributes the responder cares about are modeled; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudEvent {
    /// Event id.
    #[serde(default)]
    pub id: String,
    /// Producer of the event.
    #[serde(default)]
    pub source: String,
    /// CloudEvents version the event conforms to.
    #[serde(default = "default_specversion")]
    pub specversion: String,
    /// Event type, which decides the reply.
    #[serde(rename = "type")]
    pub ty: String,
    /// Media type of `data`, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacontenttype: Option<String>,
    /// Payload; `null` when the event carries none.
    #[serde(default)]
    pub data: Value,
}

impl CloudEvent {
    /// Creates a new event of the given type carrying `data`.
    pub fn new(ty: impl Into<String>, data: Value) -> Self {
        Self {
            id: String::new(),
            source: String::new(),
            specversion: default_specversion(),
            ty: ty.into(),
            datacontenttype: None,
            data,
        }
    }

    /// Classifies the event by its declared type.
    pub fn kind(&self) -> EventKind<'_> {
        match self.ty.as_str() {
            IMAGE_PROCESSED_EVENT => EventKind::ImageProcessed,
            TEXT_EVENT => EventKind::Text,
            other => EventKind::Unrecognized(other),
        }
    }
}

/// The closed set of event types the responder knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind<'a> {
    /// `telegram.image.processed`
    ImageProcessed,
    /// `telegram.text`
    Text,
    /// Anything else.
    Unrecognized(&'a str),
}

/// Opaque identifier of the chat a reply goes to.
///
/// Accepts either a JSON string or a JSON number, since Telegram chat ids are numeric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChatTarget(pub String);

impl<'de> Deserialize<'de> for ChatTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatTarget {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Emotion scores of a face, in the order the analysis reported them.
pub type Emotion = Vec<(String, Number)>;

/// A single face found by the image analysis.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Estimated age.
    pub age: Number,
    /// Emotion scores by name; missing or `null` means none.
    #[serde_as(as = "DefaultOnNull<Map<_, _>>")]
    #[serde(default)]
    pub emotion: Emotion,
}

/// Payload of a `telegram.image.processed` event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageProcessedData {
    /// Faces found in the image.
    pub faces: Vec<Face>,
    /// Chat the image came from.
    pub chat: ChatTarget,
}

/// Payload of a `telegram.text` event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextData {
    /// Chat the message came from.
    pub chat: ChatTarget,
}

/// A reply ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Destination chat.
    pub chat: ChatTarget,
    /// Message text.
    pub text: String,
}

/// The value handed back to the caller once an event has been handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Acknowledgment {
    /// The event was dispatched; carries `statusCode: 204`.
    NoContent {
        /// HTTP-style status code.
        #[serde(rename = "statusCode")]
        status_code: u16,
    },
    /// Nothing was dispatched; carries only a message and no status code.
    Message {
        /// Why nothing was dispatched.
        message: String,
    },
}

impl Acknowledgment {
    /// Acknowledges a dispatched event.
    pub fn no_content() -> Self {
        Self::NoContent { status_code: 204 }
    }

    /// Acknowledges a request that dispatched nothing.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message { message: message.into() }
    }
}

// Tests.
