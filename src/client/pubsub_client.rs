//! Client representation
//!
//! `Client` models a connected subscriber and holds the sending side of a
//! per-connection channel. The broker pushes broadcasts into it; the
//! connection's writer task drains it onto the socket.

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::broker::message::Message;
use crate::broker::topic::SubscriberId;
use crate::utils::error::DeliveryError;

#[derive(Debug)]
pub struct Client {
    /// Unique identifier for the client, a UUID assigned on connect.
    pub id: SubscriberId,

    sender: UnboundedSender<Message>,
}

impl Client {
    /// Create a new client with a sender channel. The `id` is a UUID used
    /// to identify the client across broker operations.
    pub fn new(sender: UnboundedSender<Message>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), sender)
    }

    pub fn with_id(id: impl Into<SubscriberId>, sender: UnboundedSender<Message>) -> Self {
        Self {
            id: id.into(),
            sender,
        }
    }

    /// Queue a broadcast for this client. Fails once the connection's
    /// receiving side has been dropped.
    pub fn deliver(&self, msg: Message) -> Result<(), DeliveryError> {
        self.sender
            .send(msg)
            .map_err(|_| DeliveryError::Disconnected(self.id.clone()))
    }

    pub fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }
}
