use futures_util::{SinkExt, StreamExt};
use livecast::broker::SharedBroker;
use livecast::config::Settings;
use livecast::transport::{AppState, ClientMessage, ServerMessage, serve};
use serde_json::json;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tungstenite::protocol::Message as WsMessage;

type Ws = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start(settings: Settings) -> (String, SharedBroker) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let broker = SharedBroker::default();

    tokio::spawn(serve(listener, AppState::new(settings, broker.clone())));

    (format!("ws://{addr}/cable"), broker)
}

fn quiet_settings() -> Settings {
    let mut settings = Settings::default();
    settings.cable.heartbeat_secs = 0;
    settings
}

async fn send(ws: &mut Ws, msg: &ClientMessage) {
    ws.send(WsMessage::Text(serde_json::to_string(msg).unwrap().into()))
        .await
        .expect("send frame");
}

async fn recv(ws: &mut Ws) -> ServerMessage {
    let frame = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for a frame")
        .expect("stream ended")
        .expect("websocket error");
    serde_json::from_str(frame.to_text().unwrap()).unwrap()
}

async fn join_chat(url: &str) -> Ws {
    let (mut ws, _) = connect_async(url).await.expect("connect");
    assert_eq!(recv(&mut ws).await, ServerMessage::Welcome {});

    send(
        &mut ws,
        &ClientMessage::Subscribe {
            channel: "ChatChannel".into(),
        },
    )
    .await;
    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::ConfirmSubscription {
            channel: "ChatChannel".into()
        }
    );
    ws
}

async fn wait_until(mut done: impl FnMut() -> bool) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("condition not reached");
}

#[tokio::test]
async fn chat_message_is_broadcast_to_every_subscriber() {
    let (url, _broker) = start(quiet_settings()).await;
    let mut a = join_chat(&url).await;
    let mut b = join_chat(&url).await;

    send(
        &mut a,
        &ClientMessage::Perform {
            channel: "ChatChannel".into(),
            action: "send_msg".into(),
            data: json!({ "message": "hello world" }),
        },
    )
    .await;

    let expected = ServerMessage::Message {
        stream: "es_chat".into(),
        message: json!({ "message": "hello world" }),
    };
    assert_eq!(recv(&mut a).await, expected);
    assert_eq!(recv(&mut b).await, expected);
}

#[tokio::test]
async fn unknown_channel_is_rejected() {
    let (url, _broker) = start(quiet_settings()).await;
    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();
    assert_eq!(recv(&mut ws).await, ServerMessage::Welcome {});

    send(
        &mut ws,
        &ClientMessage::Subscribe {
            channel: "LobbyChannel".into(),
        },
    )
    .await;
    assert_eq!(
        recv(&mut ws).await,
        ServerMessage::RejectSubscription {
            channel: "LobbyChannel".into()
        }
    );
}

#[tokio::test]
async fn disconnect_removes_client_from_every_topic() {
    let (url, broker) = start(quiet_settings()).await;
    let mut a = join_chat(&url).await;
    let _b = join_chat(&url).await;
    assert_eq!(broker.lock().subscribers("es_chat").len(), 2);

    a.close(None).await.unwrap();

    wait_until(|| broker.lock().subscribers("es_chat").len() == 1).await;
    assert_eq!(broker.lock().client_count(), 1);
}

#[tokio::test]
async fn heartbeat_pings_arrive() {
    let mut settings = Settings::default();
    settings.cable.heartbeat_secs = 1;
    let (url, _broker) = start(settings).await;

    let (mut ws, _) = connect_async(url.as_str()).await.unwrap();
    assert_eq!(recv(&mut ws).await, ServerMessage::Welcome {});
    assert!(matches!(recv(&mut ws).await, ServerMessage::Ping { .. }));
}
