//! The `client` module defines the subscriber handle of the registry.
//!
//! It provides the `Client` struct, which encapsulates a single connected
//! client: its unique identifier and the channel used to push broadcasts
//! to it.

pub mod pubsub_client;
pub use pubsub_client::Client;

#[cfg(test)]
mod tests;
