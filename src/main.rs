//! CLI for livecast
//!
//! Subcommands:
//! - `server`: run the HTTP/WebSocket server
//! - `client`: join the chat over the cable and send one message (smoke test)

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use livecast::broker::SharedBroker;
use livecast::config::load_config;
use livecast::transport::{ClientMessage, ServerMessage, start_server};
use livecast::utils::error::ServerError;
use livecast::utils::logging;
use tokio_tungstenite::connect_async;
use tracing::{debug, error, info};
use tungstenite::protocol::Message as WsMessage;

#[derive(Parser)]
#[command(name = "livecast")]
enum Command {
    /// Start the server
    Server,
    /// Subscribe to the chat, send a message and print the broadcast
    Client {
        /// Cable URL to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080/cable")]
        url: String,
        /// Chat message to send
        #[arg(long, default_value = "Hello from livecast")]
        message: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    match Command::parse() {
        Command::Server => {
            if let Err(e) = run_server().await {
                error!("Server failed: {e}");
            }
        }
        Command::Client { url, message } => {
            logging::init("info");
            if let Err(e) = run_client(&url, &message).await {
                error!("Client failed: {e}");
            }
        }
    }
}

async fn run_server() -> Result<(), ServerError> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            return Err(ServerError::Config(e));
        }
    };
    logging::init(&config.log.level);

    let broker = SharedBroker::default();

    tokio::select! {
        res = start_server(config, broker) => {
            res?;
            error!("Server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}

async fn run_client(url: &str, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (mut ws_stream, _response) = connect_async(url).await?;
    let channel = "ChatChannel".to_string();

    let subscribe = ClientMessage::Subscribe {
        channel: channel.clone(),
    };
    ws_stream
        .send(WsMessage::Text(serde_json::to_string(&subscribe)?.into()))
        .await?;

    while let Some(frame) = ws_stream.next().await {
        let WsMessage::Text(text) = frame? else {
            continue;
        };

        match serde_json::from_str::<ServerMessage>(text.as_str())? {
            ServerMessage::ConfirmSubscription { .. } => {
                let perform = ClientMessage::Perform {
                    channel: channel.clone(),
                    action: "send_msg".to_string(),
                    data: serde_json::json!({ "message": message }),
                };
                ws_stream
                    .send(WsMessage::Text(serde_json::to_string(&perform)?.into()))
                    .await?;
            }
            ServerMessage::RejectSubscription { channel } => {
                return Err(format!("subscription to {channel} was rejected").into());
            }
            ServerMessage::Message { stream, message } => {
                println!("{stream}: {message}");
                break;
            }
            ServerMessage::Error { message } => {
                return Err(message.into());
            }
            other => debug!("Ignoring {other:?}"),
        }
    }

    ws_stream.close(None).await?;
    Ok(())
}
