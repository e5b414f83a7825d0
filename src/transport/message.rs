use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::broker::Message;

/// Frames a client sends over the cable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "subscribe")]
    Subscribe { channel: String },

    #[serde(rename = "unsubscribe")]
    Unsubscribe { channel: String },

    #[serde(rename = "perform")]
    Perform {
        channel: String,
        action: String,
        #[serde(default)]
        data: Value,
    },
}

/// Frames the server sends over the cable.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "welcome")]
    Welcome {},

    /// Heartbeat; `message` is the server's unix time in seconds.
    #[serde(rename = "ping")]
    Ping { message: i64 },

    #[serde(rename = "confirm_subscription")]
    ConfirmSubscription { channel: String },

    #[serde(rename = "reject_subscription")]
    RejectSubscription { channel: String },

    #[serde(rename = "message")]
    Message { stream: String, message: Value },

    #[serde(rename = "error")]
    Error { message: String },
}

impl ServerMessage {
    pub fn ping() -> Self {
        Self::Ping {
            message: chrono::Utc::now().timestamp(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

impl From<Message> for ServerMessage {
    fn from(msg: Message) -> Self {
        Self::Message {
            stream: msg.topic,
            message: msg.payload,
        }
    }
}
