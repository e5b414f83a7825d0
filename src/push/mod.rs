//! Server push: a loop that writes a timestamp to one connection at a fixed
//! interval, and the streams it writes through.

pub mod pusher;
pub mod stream;

pub use pusher::{PushLoop, PushOutcome, Termination};
pub use stream::{EventStream, SseOptions, SseStream, TickPayload, TickerStream};
