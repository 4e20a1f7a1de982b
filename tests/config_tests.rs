//! Configuration file loading and validation


use crouch_start_analysis::{
    config::{Config, EXAMPLE_CONFIG},
    Error,
};
use test_helpers::scratch_dir;

#[test]
fn test_config_file_round_trip() {
    let dir = scratch_dir("config_round_trip");
    let path = dir.join("config.yaml");

    let mut config = Config::default();
    config.detector.backend = "onnx".to_string();
    config.analysis.default_height_cm = 181.5;
    config.analysis.landing.knee_gap_max_percent = 12.0;
    config.overlay.color = [255, 0, 0];
    config.output.format = "yaml".to_string();
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.detector.backend, "onnx");
    assert_eq!(loaded.analysis.default_height_cm, 181.5);
    assert_eq!(loaded.analysis.landing.knee_gap_max_percent, 12.0);
    assert_eq!(loaded.overlay.color, [255, 0, 0]);
    assert_eq!(loaded.output.format, "yaml");

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_example_config_is_valid() {
    let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_config_file() {
    let result = Config::from_file("does/not/exist/config.yaml");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_config() {
    let result = Config::from_yaml("analysis:\n  default_height_cm: tall\n");
    match result {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("Failed to parse config")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_validation_messages() {
    let mut config = Config::default();
    config.analysis.default_height_cm = -10.0;
    match config.validate() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("height")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let mut config = Config::default();
    config.analysis.parallax_factor = 1.2;
    match config.validate() {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("Parallax")),
        other => panic!("Expected ConfigError, got {other:?}"),
    }

    let mut config = Config::default();
    config.analysis.com_upper_weight = 0.3;
    config.analysis.com_lower_weight = 0.7;
    assert!(config.validate().is_ok());
}
