use super::pubsub_client::Client;
use crate::broker::Message;
use crate::utils::error::DeliveryError;
use serde_json::json;
use tokio::sync::mpsc;

#[test]
fn test_client_new() {
    let (tx, _) = mpsc::unbounded_channel::<Message>();
    let client = Client::new(tx);
    assert!(!client.id.is_empty());
}

#[test]
fn test_client_ids_are_unique() {
    let (tx, _rx) = mpsc::unbounded_channel::<Message>();
    let a = Client::new(tx.clone());
    let b = Client::new(tx);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_deliver_queues_message() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let client = Client::with_id("a", tx);

    let msg = Message::new("es_chat", json!({ "message": "hi" }));
    client.deliver(msg.clone()).unwrap();

    assert_eq!(rx.try_recv().unwrap(), msg);
}

#[test]
fn test_deliver_after_disconnect_fails() {
    let (tx, rx) = mpsc::unbounded_channel::<Message>();
    let client = Client::with_id("gone", tx);
    drop(rx);

    assert!(!client.is_connected());
    let err = client
        .deliver(Message::new("es_chat", json!({ "message": "hi" })))
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Disconnected(id) if id == "gone"));
}
