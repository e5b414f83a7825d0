use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::broker::Broker;

/// Handle to the one `Broker` owned by the application.
///
/// Built once at startup and cloned into every connection. A panic while
/// holding the lock leaves the registry usable: the guard is recovered from
/// the poison error instead of propagating the panic to every other
/// connection.
#[derive(Debug, Clone, Default)]
pub struct SharedBroker(Arc<Mutex<Broker>>);

impl SharedBroker {
    pub fn new(broker: Broker) -> Self {
        Self(Arc::new(Mutex::new(broker)))
    }

    pub fn lock(&self) -> MutexGuard<'_, Broker> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
