//! Channels are the server-side half of a cable subscription.
//!
//! A connection joins a channel by name; the channel decides which broker
//! topics the connection streams from and what each client action does.
//! The connection layer drives the lifecycle through the `Channel` trait.

pub mod chat;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::broker::{Message, SharedBroker, SubscriberId};
use crate::utils::error::ChannelError;

pub use chat::{CHAT_STREAM, ChatChannel, ChatMessage};

/// Lifecycle hooks for one channel type.
pub trait Channel: Send + Sync {
    /// Name clients use to address the channel, e.g. `ChatChannel`.
    fn name(&self) -> &'static str;

    fn on_subscribe(&self, ctx: &ChannelContext<'_>);

    fn on_unsubscribe(&self, ctx: &ChannelContext<'_>);

    /// Handles a client `perform` for `action`.
    fn on_message(
        &self,
        ctx: &ChannelContext<'_>,
        action: &str,
        data: Value,
    ) -> Result<(), ChannelError>;
}

/// What a channel hook may touch: the calling subscriber and the registry.
pub struct ChannelContext<'a> {
    pub subscriber: &'a SubscriberId,
    pub broker: &'a SharedBroker,
}

impl<'a> ChannelContext<'a> {
    pub fn new(subscriber: &'a SubscriberId, broker: &'a SharedBroker) -> Self {
        Self { subscriber, broker }
    }

    /// Start delivering broadcasts on `topic` to this subscriber.
    pub fn stream_from(&self, topic: &str) {
        self.broker.lock().subscribe(topic, self.subscriber.clone());
    }

    pub fn stop_stream_from(&self, topic: &str) {
        self.broker.lock().unsubscribe(topic, self.subscriber);
    }

    /// Publish `payload` to everyone streaming from `topic`.
    pub fn broadcast<T: Serialize>(&self, topic: &str, payload: &T) -> Result<usize, ChannelError> {
        let payload = serde_json::to_value(payload)?;
        Ok(self.broker.lock().publish(Message::new(topic, payload)))
    }
}

/// Channel implementations by name.
#[derive(Clone, Default)]
pub struct ChannelRegistry {
    channels: HashMap<&'static str, Arc<dyn Channel>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every channel this application serves.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ChatChannel));
        registry
    }

    pub fn register(&mut self, channel: Arc<dyn Channel>) {
        self.channels.insert(channel.name(), channel);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Channel>> {
        self.channels.get(name).cloned()
    }
}

impl std::fmt::Debug for ChannelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelRegistry")
            .field("channels", &self.channels.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests;
