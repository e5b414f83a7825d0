//! Topic registry: maps topic names to live subscriber sets and fans
//! published messages out to them.

pub mod engine;
pub mod message;
pub mod shared;
pub mod topic;

pub use engine::Broker;
pub use message::Message;
pub use shared::SharedBroker;
pub use topic::SubscriberId;
