//! The `utils` module provides the shared pieces used across `livecast`:
//! error types and logging setup.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::error::ServerError;
    use super::logging;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("warn");
    }

    #[test]
    fn parse_level_falls_back_to_info() {
        assert_eq!(logging::parse_level("WARN"), tracing::Level::WARN);
        assert_eq!(logging::parse_level("trace"), tracing::Level::TRACE);
        assert_eq!(logging::parse_level("loud"), tracing::Level::INFO);
        assert_eq!(logging::parse_level(""), tracing::Level::INFO);
    }

    #[test]
    fn config_errors_convert_into_server_error() {
        let err = ServerError::from(::config::ConfigError::NotFound("server.port".into()));
        assert!(matches!(err, ServerError::Config(_)));
        assert!(err.to_string().starts_with("failed to load configuration"));
    }
}
