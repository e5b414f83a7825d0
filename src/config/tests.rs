use super::load_config;
use super::settings::Settings;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.cable.mount_path, "/cable");
    assert_eq!(settings.cable.heartbeat_secs, 3);
    assert_eq!(settings.push.interval_ms, 2000);
    assert_eq!(settings.push.ticker_iterations, 5);
    assert_eq!(settings.push.event, "other-event");
    assert_eq!(settings.push.event_id, "10");
    assert_eq!(settings.push.retry_ms, 500);
    assert_eq!(settings.log.level, "info");
    assert_eq!(settings.bind_addr(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    // load_config reads config/default.* relative to the working directory
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [server]
        host = "0.0.0.0"
        port = 9000

        [push]
        interval_ms = 250
        event = "tick"
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let cfg = load_config();
    env::set_current_dir(orig).expect("restore cwd");

    let cfg = cfg.expect("load_config failed");
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.push.interval_ms, 250);
    assert_eq!(cfg.push.event, "tick");
    // untouched sections keep their defaults
    assert_eq!(cfg.push.ticker_iterations, 5);
    assert_eq!(cfg.cable.mount_path, "/cable");
}

#[test]
#[serial]
fn load_config_reads_prefixed_environment() {
    temp_env::with_vars(
        [
            ("LIVECAST_SERVER__PORT", Some("9100")),
            ("LIVECAST_CABLE__HEARTBEAT_SECS", Some("0")),
            ("LIVECAST_LOG__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.server.port, 9100);
            assert_eq!(cfg.cable.heartbeat_secs, 0);
            assert_eq!(cfg.log.level, "debug");
            assert_eq!(cfg.server.host, "127.0.0.1");
        },
    );
}
