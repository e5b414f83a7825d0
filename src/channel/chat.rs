use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{Channel, ChannelContext};
use crate::utils::error::ChannelError;

/// Topic every chat subscriber streams from.
pub const CHAT_STREAM: &str = "es_chat";

/// Body of a chat broadcast and of the `send_msg` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message: String,
}

/// Single-room chat: everyone subscribed hears every `send_msg`.
#[derive(Debug, Default)]
pub struct ChatChannel;

impl Channel for ChatChannel {
    fn name(&self) -> &'static str {
        "ChatChannel"
    }

    fn on_subscribe(&self, ctx: &ChannelContext<'_>) {
        ctx.stream_from(CHAT_STREAM);
    }

    fn on_unsubscribe(&self, ctx: &ChannelContext<'_>) {
        ctx.stop_stream_from(CHAT_STREAM);
    }

    fn on_message(
        &self,
        ctx: &ChannelContext<'_>,
        action: &str,
        data: Value,
    ) -> Result<(), ChannelError> {
        match action {
            "send_msg" => {
                let msg: ChatMessage = serde_json::from_value(data)?;
                let delivered = ctx.broadcast(CHAT_STREAM, &msg)?;
                debug!("{} sent a chat message to {delivered} subscribers", ctx.subscriber);
                Ok(())
            }
            other => Err(ChannelError::UnknownAction {
                channel: self.name(),
                action: other.to_string(),
            }),
        }
    }
}
