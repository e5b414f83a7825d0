//! WebSocket transport
//!
//! The cable endpoint. Each upgraded socket gets:
//! - a `Connection` registered with the broker,
//! - a writer task that forwards broadcasts, replies and heartbeats to the
//!   socket,
//! - a read loop that hands client frames to the `Connection`.
//!
//! Whichever side ends first (client close, read error, failed write) ends
//! the connection, and `Connection::close` removes it from every topic.

use axum::extract::State;
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, error};

use crate::broker::Message;
use crate::transport::connection::Connection;
use crate::transport::message::ServerMessage;
use crate::transport::state::AppState;

pub async fn cable(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // broker -> client
    let (broadcast_tx, mut broadcast_rx) = mpsc::unbounded_channel::<Message>();
    // connection -> client
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ServerMessage>();

    let mut connection = Connection::open(
        state.broker.clone(),
        state.channels.clone(),
        broadcast_tx,
    );
    let _ = reply_tx.send(ServerMessage::Welcome {});

    let mut heartbeat = heartbeat(state.settings.cable.heartbeat_secs);
    let client_id = connection.id().clone();

    let mut send_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                biased;
                Some(reply) = reply_rx.recv() => reply,
                Some(msg) = broadcast_rx.recv() => ServerMessage::from(msg),
                _ = next_beat(&mut heartbeat) => ServerMessage::ping(),
                else => break,
            };

            let text = match serde_json::to_string(&frame) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize frame for {client_id}: {e}");
                    continue;
                }
            };

            if let Err(e) = ws_sender.send(WsMessage::Text(text)).await {
                debug!("Failed to send message to {client_id}: {e}");
                break;
            }
        }

        debug!("Send loop closed for {client_id}");
    });

    loop {
        tokio::select! {
            incoming = ws_receiver.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => {
                    if let Some(reply) = connection.handle_text(&text) {
                        let _ = reply_tx.send(reply);
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("WebSocket error for {}: {e}", connection.id());
                    break;
                }
            },
            _ = &mut send_task => break,
        }
    }

    send_task.abort();
    connection.close();
}

/// Ping interval, or `None` when `secs` is zero. The first ping is one
/// period after connect.
fn heartbeat(secs: u64) -> Option<Interval> {
    (secs > 0).then(|| {
        let period = Duration::from_secs(secs);
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    })
}

async fn next_beat(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
