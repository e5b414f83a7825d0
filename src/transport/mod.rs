//! The `transport` module handles network communication with clients.
//!
//! It defines the cable protocol, the per-connection state machine, the
//! WebSocket and server-push handlers, and the HTTP router that exposes
//! them next to the static pages.

pub mod connection;
pub mod message;
pub mod pages;
pub mod routes;
pub mod server;
pub mod sse;
pub mod state;
pub mod websocket;

pub use message::{ClientMessage, ServerMessage};
pub use routes::create_router;
pub use server::{serve, start_server};
pub use state::AppState;
