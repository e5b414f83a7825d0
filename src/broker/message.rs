//! Message definitions for the broker
//!
//! `Message` is the envelope handed to every subscriber of a topic on
//! publish. It is immutable once built.
//!
//! Notes on fields:
//! - `topic`: topic name used for routing
//! - `payload`: the JSON body as published, e.g. `{"message": "hi"}`
//! - `timestamp`: milliseconds since UNIX epoch, stamped on construction

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub topic: String,
    pub payload: Value,
    pub timestamp: i64,
}

impl Message {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}
