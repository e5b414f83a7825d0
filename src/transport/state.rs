use std::sync::Arc;

use crate::broker::SharedBroker;
use crate::channel::ChannelRegistry;
use crate::config::Settings;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub broker: SharedBroker,
    pub channels: Arc<ChannelRegistry>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings, broker: SharedBroker) -> Self {
        Self {
            broker,
            channels: Arc::new(ChannelRegistry::with_defaults()),
            settings: Arc::new(settings),
        }
    }
}
