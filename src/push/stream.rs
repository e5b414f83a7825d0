//! Framed-write primitives the push loop writes through.
//!
//! Both implementations are backed by an unbounded channel whose receiving
//! half is the HTTP response body. When the client goes away hyper drops
//! the body, the receiver goes with it, and the next write reports
//! `WriteError::Disconnected`.

use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::Event;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::PushSettings;
use crate::utils::error::WriteError;

/// Payload of every push: the server's current time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickPayload {
    pub time: DateTime<Local>,
}

impl TickPayload {
    pub fn now() -> Self {
        Self { time: Local::now() }
    }
}

/// A connection the push loop can write to and must eventually close.
pub trait EventStream: Send {
    fn write(&mut self, payload: &TickPayload) -> Result<(), WriteError>;

    /// Releases the connection. Called exactly once by `PushLoop::run`.
    fn close(&mut self);
}

/// SSE metadata attached to every event. Not part of the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SseOptions {
    pub event: String,
    pub id: String,
    pub retry: Duration,
}

impl From<&PushSettings> for SseOptions {
    fn from(settings: &PushSettings) -> Self {
        Self {
            event: settings.event.clone(),
            id: settings.event_id.clone(),
            retry: Duration::from_millis(settings.retry_ms),
        }
    }
}

pub type SseSender = UnboundedSender<Result<Event, Infallible>>;

/// Writes each payload as a `text/event-stream` event with a JSON `data` line.
pub struct SseStream {
    sender: Option<SseSender>,
    options: SseOptions,
}

impl SseStream {
    pub fn new(sender: SseSender, options: SseOptions) -> Self {
        Self {
            sender: Some(sender),
            options,
        }
    }
}

impl EventStream for SseStream {
    fn write(&mut self, payload: &TickPayload) -> Result<(), WriteError> {
        let sender = self.sender.as_ref().ok_or(WriteError::Disconnected)?;
        let event = Event::default()
            .event(self.options.event.as_str())
            .id(self.options.id.as_str())
            .retry(self.options.retry)
            .json_data(payload)
            .map_err(|e| WriteError::Encode(e.to_string()))?;

        sender.send(Ok(event)).map_err(|_| WriteError::Disconnected)
    }

    fn close(&mut self) {
        // dropping the sender ends the response body
        self.sender.take();
    }
}

pub type TickerSender = UnboundedSender<Result<String, Infallible>>;

/// Writes each payload as one line of a chunked HTML body.
pub struct TickerStream {
    sender: Option<TickerSender>,
}

impl TickerStream {
    pub fn new(sender: TickerSender) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn render(payload: &TickPayload) -> String {
        format!("Olá!: {} <br>", payload.time.format("%Y-%m-%d %H:%M:%S %z"))
    }
}

impl EventStream for TickerStream {
    fn write(&mut self, payload: &TickPayload) -> Result<(), WriteError> {
        let sender = self.sender.as_ref().ok_or(WriteError::Disconnected)?;
        sender
            .send(Ok(Self::render(payload)))
            .map_err(|_| WriteError::Disconnected)
    }

    fn close(&mut self) {
        self.sender.take();
    }
}
