//! Per-connection cable state.
//!
//! A `Connection` tracks which channels one WebSocket has joined and turns
//! client frames into channel hook calls. It holds no socket, so the
//! protocol can be exercised without a network.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::broker::{Message, SharedBroker, SubscriberId};
use crate::channel::{Channel, ChannelContext, ChannelRegistry};
use crate::client::Client;
use crate::transport::message::{ClientMessage, ServerMessage};

pub struct Connection {
    id: SubscriberId,
    broker: SharedBroker,
    channels: Arc<ChannelRegistry>,
    subscriptions: HashMap<String, Arc<dyn Channel>>,
}

impl Connection {
    /// Registers a new client with the broker; broadcasts for it arrive on
    /// `sender`.
    pub fn open(
        broker: SharedBroker,
        channels: Arc<ChannelRegistry>,
        sender: UnboundedSender<Message>,
    ) -> Self {
        let client = Client::new(sender);
        let id = client.id.clone();
        broker.lock().register_client(client);
        info!("{id} connected");

        Self {
            id,
            broker,
            channels,
            subscriptions: HashMap::new(),
        }
    }

    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    pub fn is_subscribed(&self, channel: &str) -> bool {
        self.subscriptions.contains_key(channel)
    }

    /// Parses and handles one text frame.
    pub fn handle_text(&mut self, text: &str) -> Option<ServerMessage> {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(msg) => self.handle(msg),
            Err(err) => {
                warn!(
                    "Invalid client message from {}: {err} | {}",
                    self.id,
                    text.chars().take(100).collect::<String>()
                );
                Some(ServerMessage::error(format!("invalid message: {err}")))
            }
        }
    }

    /// Handles one client frame and returns the reply for this client, if any.
    pub fn handle(&mut self, msg: ClientMessage) -> Option<ServerMessage> {
        match msg {
            ClientMessage::Subscribe { channel } => Some(self.subscribe(channel)),
            ClientMessage::Unsubscribe { channel } => {
                self.unsubscribe(&channel);
                None
            }
            ClientMessage::Perform {
                channel,
                action,
                data,
            } => {
                let Some(handler) = self.subscriptions.get(&channel) else {
                    return Some(ServerMessage::error(format!(
                        "not subscribed to {channel}"
                    )));
                };
                let ctx = ChannelContext::new(&self.id, &self.broker);
                match handler.on_message(&ctx, &action, data) {
                    Ok(()) => None,
                    Err(e) => {
                        warn!("{} perform {channel}#{action} failed: {e}", self.id);
                        Some(ServerMessage::error(e.to_string()))
                    }
                }
            }
        }
    }

    fn subscribe(&mut self, channel: String) -> ServerMessage {
        if self.subscriptions.contains_key(&channel) {
            return ServerMessage::ConfirmSubscription { channel };
        }

        let Some(handler) = self.channels.get(&channel) else {
            warn!("{} asked for unknown channel {channel}", self.id);
            return ServerMessage::RejectSubscription { channel };
        };

        handler.on_subscribe(&ChannelContext::new(&self.id, &self.broker));
        info!("{} subscribed to {channel}", self.id);
        self.subscriptions.insert(channel.clone(), handler);
        ServerMessage::ConfirmSubscription { channel }
    }

    fn unsubscribe(&mut self, channel: &str) {
        if let Some(handler) = self.subscriptions.remove(channel) {
            handler.on_unsubscribe(&ChannelContext::new(&self.id, &self.broker));
            info!("{} unsubscribed from {channel}", self.id);
        } else {
            debug!("{} was not subscribed to {channel}", self.id);
        }
    }

    /// Teardown hook: leaves every channel and drops the client from the
    /// broker.
    pub fn close(mut self) {
        for (channel, handler) in self.subscriptions.drain() {
            handler.on_unsubscribe(&ChannelContext::new(&self.id, &self.broker));
            debug!("{} left {channel} on disconnect", self.id);
        }
        self.broker.lock().cleanup_client(&self.id);
        info!("{} disconnected", self.id);
    }
}
