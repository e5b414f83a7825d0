use super::{CHAT_STREAM, Channel, ChannelContext, ChannelRegistry, ChatChannel};
use crate::broker::{Message, SharedBroker};
use crate::client::Client;
use crate::utils::error::ChannelError;
use serde_json::json;
use tokio::sync::mpsc;

fn connect(broker: &SharedBroker, id: &str) -> mpsc::UnboundedReceiver<Message> {
    let (tx, rx) = mpsc::unbounded_channel();
    broker.lock().register_client(Client::with_id(id, tx));
    rx
}

#[test]
fn test_registry_with_defaults_serves_chat() {
    let registry = ChannelRegistry::with_defaults();
    assert_eq!(registry.get("ChatChannel").unwrap().name(), "ChatChannel");
    assert!(registry.get("NoSuchChannel").is_none());
}

#[test]
fn test_chat_subscribe_streams_from_es_chat() {
    let broker = SharedBroker::default();
    let id = "a".to_string();
    ChatChannel.on_subscribe(&ChannelContext::new(&id, &broker));
    assert_eq!(broker.lock().subscribers(CHAT_STREAM), vec![id.clone()]);

    ChatChannel.on_unsubscribe(&ChannelContext::new(&id, &broker));
    assert!(broker.lock().subscribers(CHAT_STREAM).is_empty());
}

#[test]
fn test_send_msg_broadcasts_message_field() {
    let broker = SharedBroker::default();
    let mut a = connect(&broker, "a");
    let mut b = connect(&broker, "b");
    let (a_id, b_id) = ("a".to_string(), "b".to_string());
    ChatChannel.on_subscribe(&ChannelContext::new(&a_id, &broker));
    ChatChannel.on_subscribe(&ChannelContext::new(&b_id, &broker));

    ChatChannel
        .on_message(
            &ChannelContext::new(&a_id, &broker),
            "send_msg",
            json!({ "message": "hi" }),
        )
        .unwrap();

    for rx in [&mut a, &mut b] {
        let msg = rx.try_recv().unwrap();
        assert_eq!(msg.topic, CHAT_STREAM);
        assert_eq!(msg.payload, json!({ "message": "hi" }));
    }
}

#[test]
fn test_send_msg_with_bad_payload_is_rejected() {
    let broker = SharedBroker::default();
    let id = "a".to_string();
    let err = ChatChannel
        .on_message(&ChannelContext::new(&id, &broker), "send_msg", json!({ "text": 1 }))
        .unwrap_err();
    assert!(matches!(err, ChannelError::InvalidPayload(_)));
}

#[test]
fn test_unknown_action_is_rejected() {
    let broker = SharedBroker::default();
    let id = "a".to_string();
    let err = ChatChannel
        .on_message(&ChannelContext::new(&id, &broker), "shout", json!({}))
        .unwrap_err();
    assert!(matches!(
        err,
        ChannelError::UnknownAction { channel: "ChatChannel", ref action } if action == "shout"
    ));
}
