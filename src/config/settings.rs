use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the HTTP server, the WebSocket cable, the push
/// endpoints and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub cable: CableSettings,
    pub push: PushSettings,
    pub log: LogSettings,
}

/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Settings for the bidirectional channel transport.
#[derive(Debug, Deserialize, Clone)]
pub struct CableSettings {
    /// Route the WebSocket endpoint is mounted on.
    pub mount_path: String,
    /// Seconds between `ping` frames. `0` disables the heartbeat.
    pub heartbeat_secs: u64,
}

/// Settings for the server-push endpoints.
///
/// `event`, `event_id` and `retry_ms` are SSE transport metadata attached to
/// every event written by `/home/live`.
#[derive(Debug, Deserialize, Clone)]
pub struct PushSettings {
    pub interval_ms: u64,
    pub ticker_iterations: u32,
    pub event: String,
    pub event_id: String,
    pub retry_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub cable: Option<PartialCableSettings>,
    pub push: Option<PartialPushSettings>,
    pub log: Option<PartialLogSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct PartialCableSettings {
    pub mount_path: Option<String>,
    pub heartbeat_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialPushSettings {
    pub interval_ms: Option<u64>,
    pub ticker_iterations: Option<u32>,
    pub event: Option<String>,
    pub event_id: Option<String>,
    pub retry_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLogSettings {
    pub level: Option<String>,
}

impl Settings {
    /// Fills every field missing from `partial` with the value from `Settings::default()`.
    pub fn merge(partial: PartialSettings) -> Self {
        let default = Self::default();
        let server = partial.server;
        let cable = partial.cable;
        let push = partial.push;
        let log = partial.log;

        Self {
            server: ServerSettings {
                host: server
                    .as_ref()
                    .and_then(|s| s.host.clone())
                    .unwrap_or(default.server.host),
                port: server
                    .as_ref()
                    .and_then(|s| s.port)
                    .unwrap_or(default.server.port),
            },
            cable: CableSettings {
                mount_path: cable
                    .as_ref()
                    .and_then(|c| c.mount_path.clone())
                    .unwrap_or(default.cable.mount_path),
                heartbeat_secs: cable
                    .as_ref()
                    .and_then(|c| c.heartbeat_secs)
                    .unwrap_or(default.cable.heartbeat_secs),
            },
            push: PushSettings {
                interval_ms: push
                    .as_ref()
                    .and_then(|p| p.interval_ms)
                    .unwrap_or(default.push.interval_ms),
                ticker_iterations: push
                    .as_ref()
                    .and_then(|p| p.ticker_iterations)
                    .unwrap_or(default.push.ticker_iterations),
                event: push
                    .as_ref()
                    .and_then(|p| p.event.clone())
                    .unwrap_or(default.push.event),
                event_id: push
                    .as_ref()
                    .and_then(|p| p.event_id.clone())
                    .unwrap_or(default.push.event_id),
                retry_ms: push
                    .as_ref()
                    .and_then(|p| p.retry_ms)
                    .unwrap_or(default.push.retry_ms),
            },
            log: LogSettings {
                level: log
                    .as_ref()
                    .and_then(|l| l.level.clone())
                    .unwrap_or(default.log.level),
            },
        }
    }

    /// `host:port` string for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Provides default values for `Settings`.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            cable: CableSettings {
                mount_path: "/cable".to_string(),
                heartbeat_secs: 3,
            },
            push: PushSettings {
                interval_ms: 2000,
                ticker_iterations: 5,
                event: "other-event".to_string(),
                event_id: "10".to_string(),
                retry_ms: 500,
            },
            log: LogSettings {
                level: "info".to_string(),
            },
        }
    }
}
