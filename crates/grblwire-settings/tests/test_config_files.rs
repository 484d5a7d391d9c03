use grblwire_core::{CoordinateStore, StatusReportMask};
use grblwire_protocol::MessageLevel;
use grblwire_settings::{Config, ConfigError, SettingsError};
use std::fs;
use tempfile::TempDir;

fn sample_config() -> Config {
    let mut config = Config::default();
    config.features.use_line_numbers = true;
    config.features.refresh.override_idle = 5;
    config.settings.report_inches = true;
    config.settings.status_report_mask = 3;
    config.settings.steps_per_mm = [80.0, 80.0, 400.0];
    config.report.message_level = MessageLevel::Warning;
    config.coordinates.g54 = [10.0, 20.0, -1.5];
    config.startup_lines = vec!["G21 G90".to_string()];
    config.build_line = "bench mill".to_string();
    config
}

#[test]
fn test_toml_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = sample_config();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded, config);
    assert_eq!(
        loaded.settings.report_mask(),
        StatusReportMask::POSITION_TYPE | StatusReportMask::BUFFER_STATE
    );
}

#[test]
fn test_json_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = sample_config();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
build_line = "router"

[settings]
report_inches = true

[report]
message_level = "error"
alarm_flush_delay_ms = 0

[coordinates]
g56 = [1.0, 2.0, 3.0]
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.build_line, "router");
    assert!(config.settings.report_inches);
    assert_eq!(config.settings.steps_per_mm, [250.0; 3]);
    assert_eq!(config.report.message_level, MessageLevel::Error);
    assert_eq!(config.report.alarm_flush_delay_ms, 0);
    assert!(config.features.variable_spindle);

    let store = config.coordinates.to_store();
    assert_eq!(store.read_coordinate_frame(2), Ok([1.0, 2.0, 3.0]));
    assert_eq!(store.read_coordinate_frame(0), Ok([0.0, 0.0, 0.0]));
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[settings]\nsteps_per_mm = [250.0, -1.0, 250.0]\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::ValueOutOfRange { .. })
    ));
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}
