//! The `error` module defines the error types used within `livecast`.
//!
//! Errors are split by the layer that produces them. Delivery and write
//! errors never escape their connection; only `ServerError` reaches `main`.

use thiserror::Error;

use crate::broker::topic::SubscriberId;

/// A single subscriber could not be handed a broadcast.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("subscriber {0} is no longer connected")]
    Disconnected(SubscriberId),

    #[error("no client registered with id {0}")]
    UnknownSubscriber(SubscriberId),
}

/// Result of the framed-write primitive used by the push loop.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The receiving side of the connection is gone.
    #[error("client disconnected")]
    Disconnected,

    #[error("failed to encode event: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("unknown action '{action}' for {channel}")]
    UnknownAction {
        channel: &'static str,
        action: String,
    },

    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

/// Fatal startup and serve errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid cable mount path '{path}': {reason}")]
    InvalidMountPath { path: String, reason: &'static str },

    #[error("can't bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
