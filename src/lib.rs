//! # livecast
//!
//! `livecast` is a small real-time web server built with Rust. It shows two
//! delivery patterns side by side: a publish/subscribe chat carried over a
//! WebSocket "cable", and server-pushed events over SSE.
//!
//! ## Core Modules
//!
//! - `broker`: the topic registry that maps topic names to subscribers and fans messages out.
//! - `channel`: channel lifecycle hooks and the chat channel.
//! - `client`: the subscriber handle the broker delivers into.
//! - `config`: loading server configuration from file and environment.
//! - `push`: the per-connection push loop and the streams it writes to.
//! - `transport`: the cable protocol, HTTP handlers and router.
//! - `utils`: error types and logging setup.

pub mod broker;
pub mod channel;
pub mod client;
pub mod config;
pub mod push;
pub mod transport;
pub mod utils;
