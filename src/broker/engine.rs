//! Broker engine
//!
//! This module contains the in-memory topic registry responsible for:
//! - managing topics and subscriber sets
//! - fanning a published message out to every current subscriber
//! - dropping a client from every topic when its connection goes away
//!
//! Concurrency and usage notes:
//! - The API is synchronous and designed to be held behind a lock
//!   (`SharedBroker`) by the transport layer. Delivery only enqueues onto
//!   each client's outbound channel, so no network I/O happens under the lock.
//! - Delivery is best-effort and at-most-once. A subscriber that joins after
//!   a publish never sees that message.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::broker::message::Message;
use crate::broker::topic::{SubscriberId, Topic};
use crate::client::Client;
use crate::utils::error::DeliveryError;

#[derive(Debug, Default)]
pub struct Broker {
    pub(crate) topics: HashMap<String, Topic>,
    pub(crate) clients: HashMap<SubscriberId, Client>,
}

impl Broker {
    pub fn new() -> Self {
        Self {
            topics: HashMap::new(),
            clients: HashMap::new(),
        }
    }

    pub fn register_client(&mut self, client: Client) {
        debug!("Registered client {}", client.id);
        self.clients.insert(client.id.clone(), client);
    }

    pub fn remove_client(&mut self, client_id: &SubscriberId) {
        self.clients.remove(client_id);
    }

    /// Subscribes a client to a topic. Automatically creates the topic if it doesn't exist.
    pub fn subscribe(&mut self, topic: &str, subscriber: SubscriberId) {
        self.topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic))
            .subscribe(subscriber);
    }

    /// Unsubscribes a client from a topic. The topic entry goes away with its
    /// last subscriber.
    pub fn unsubscribe(&mut self, topic: &str, subscriber: &SubscriberId) {
        if let Some(t) = self.topics.get_mut(topic) {
            t.unsubscribe(subscriber);
            if t.is_empty() {
                self.topics.remove(topic);
            }
        }
    }

    /// Delivers `msg` to every subscriber of `msg.topic` and returns how many
    /// deliveries succeeded.
    ///
    /// A failed delivery is logged and skipped; it never aborts the fan-out
    /// and is never reported to the publisher.
    pub fn publish(&self, msg: Message) -> usize {
        let Some(topic) = self.topics.get(&msg.topic) else {
            debug!("Topic '{}' has no subscribers", msg.topic);
            return 0;
        };

        let mut delivered = 0;
        for sub_id in &topic.subscribers {
            match self.deliver_to(sub_id, &msg) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Failed to deliver on '{}': {e}", msg.topic),
            }
        }

        debug!(
            "Published to '{}': {delivered}/{} delivered",
            msg.topic,
            topic.subscribers.len()
        );
        delivered
    }

    fn deliver_to(&self, sub_id: &SubscriberId, msg: &Message) -> Result<(), DeliveryError> {
        self.clients
            .get(sub_id)
            .ok_or_else(|| DeliveryError::UnknownSubscriber(sub_id.clone()))?
            .deliver(msg.clone())
    }

    /// Removes a client and unsubscribes it from every topic.
    /// Used when a connection closes.
    pub fn cleanup_client(&mut self, client_id: &SubscriberId) {
        self.remove_client(client_id);

        self.topics.retain(|name, topic| {
            if topic.unsubscribe(client_id) {
                debug!("Unsubscribed {client_id} from topic {name}");
            }
            !topic.is_empty()
        });

        debug!("Cleaned up client {client_id}");
    }

    /// Current subscribers of `topic`, empty when the topic does not exist.
    pub fn subscribers(&self, topic: &str) -> Vec<SubscriberId> {
        self.topics
            .get(topic)
            .map(|t| t.subscribers.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn topic_names(&self) -> Vec<String> {
        self.topics.keys().cloned().collect()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}
