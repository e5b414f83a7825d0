//! The per-connection push loop.
//!
//! `PushLoop::run` owns its stream through a guard that closes it on drop,
//! so the stream is closed once whether the loop completes, hits a write
//! error, or has its future dropped mid-sleep.

use std::time::Duration;

use tracing::{debug, error, info};

use crate::config::PushSettings;
use crate::push::stream::{EventStream, TickPayload};
use crate::utils::error::WriteError;

/// When a push loop stops on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Write this many payloads, then close.
    Bounded(u32),
    /// Keep writing until a write fails.
    UntilDisconnect,
}

/// How a finished loop ended and how many payloads reached the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Completed { sent: u32 },
    Disconnected { sent: u32 },
    Failed { sent: u32 },
}

#[derive(Debug, Clone)]
pub struct PushLoop {
    interval: Duration,
    termination: Termination,
}

impl PushLoop {
    pub fn new(interval: Duration, termination: Termination) -> Self {
        Self {
            interval,
            termination,
        }
    }

    /// Bounded loop for the ticker endpoint.
    pub fn ticker(settings: &PushSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.interval_ms),
            Termination::Bounded(settings.ticker_iterations),
        )
    }

    /// Unbounded loop for the SSE endpoint.
    pub fn live(settings: &PushSettings) -> Self {
        Self::new(
            Duration::from_millis(settings.interval_ms),
            Termination::UntilDisconnect,
        )
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub async fn run<S: EventStream>(&self, stream: S) -> PushOutcome {
        let mut stream = CloseOnDrop(stream);
        let mut sent = 0u32;

        if self.termination == Termination::Bounded(0) {
            return PushOutcome::Completed { sent };
        }

        loop {
            match stream.0.write(&TickPayload::now()) {
                Ok(()) => sent += 1,
                Err(WriteError::Disconnected) => {
                    info!("Client disconnected after {sent} events, stopping push loop");
                    return PushOutcome::Disconnected { sent };
                }
                Err(e) => {
                    error!("Push loop write failed after {sent} events: {e}");
                    return PushOutcome::Failed { sent };
                }
            }

            if let Termination::Bounded(limit) = self.termination {
                if sent >= limit {
                    debug!("Push loop finished after {sent} events");
                    return PushOutcome::Completed { sent };
                }
            }

            tokio::time::sleep(self.interval).await;
        }
    }
}

/// Owns a stream and closes it when dropped.
struct CloseOnDrop<S: EventStream>(S);

impl<S: EventStream> Drop for CloseOnDrop<S> {
    fn drop(&mut self) {
        self.0.close();
    }
}
