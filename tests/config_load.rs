use countdown_overlay::settings::{config_path, AppConfig, CONFIG_FILE};
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let cfg = AppConfig::load(dir.path().join("absent.json")).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.tick_ms, 1000);
    assert_eq!(cfg.defaults.time, "18:00");
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "debug_logging": true, "defaults": { "time": "17:30" }, "overlay": { "x": 10.0 } }"#,
    )
    .unwrap();
    let cfg = AppConfig::load(&path).unwrap();
    assert!(cfg.debug_logging);
    assert_eq!(cfg.defaults.time, "17:30");
    assert_eq!(cfg.defaults.font_size, 48);
    assert_eq!(cfg.defaults.end_message, "到点儿啦！");
    assert_eq!(cfg.overlay.x, 10.0);
    assert_eq!(cfg.overlay.width, 300.0);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = AppConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn zero_tick_interval_is_replaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "tick_ms": 0 }"#).unwrap();
    assert_eq!(AppConfig::load(&path).unwrap().tick_ms, 1000);
}

#[test]
#[serial]
fn local_config_file_takes_precedence() {
    let dir = tempdir().unwrap();
    let prev = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    std::fs::write(CONFIG_FILE, "{}").unwrap();
    let path = config_path();
    std::env::set_current_dir(prev).unwrap();
    assert_eq!(path, std::path::PathBuf::from(CONFIG_FILE));
}

#[test]
fn unreadable_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();
    let err = AppConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("reading"));

    assert!(AppConfig::load(dir.path()).is_err());
}
