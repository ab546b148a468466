//! Config file loading, layering and validation.

use saarthi_dash::{
    cli::{render_config, validate_config},
    config::{generate_example_config, load_config_file, ConfigOverrides, DashboardConfig},
    DashboardError,
};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_file_values_are_loaded() {
    let file = write_config(
        "api:\n  base_url: http://10.0.0.5:8000\n  timeout_secs: 15\ntui:\n  theme: light\n",
    );
    let config = load_config_file(file.path()).expect("load config");

    assert_eq!(config.api.resolved_base_url(), "http://10.0.0.5:8000");
    assert_eq!(config.api.timeout(), Some(Duration::from_secs(15)));
    assert_eq!(config.tui.theme, "light");
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_cli_overrides_win_over_file() {
    let file = write_config(
        "api:\n  base_url: http://10.0.0.5:8000\ntui:\n  theme: light\nlogging:\n  level: warn\n",
    );
    let overrides = ConfigOverrides {
        base_url: Some("http://127.0.0.1:9000".to_string()),
        log_level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    let (config, loaded_from) =
        DashboardConfig::from_file_with_overrides(Some(file.path()), &overrides)
            .expect("load config");

    assert_eq!(loaded_from.as_deref(), Some(file.path()));
    assert_eq!(config.api.resolved_base_url(), "http://127.0.0.1:9000");
    assert_eq!(config.tui.theme, "light", "unset overrides leave the file alone");
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_theme_flag_equal_to_default_beats_file() {
    let file = write_config("tui:\n  theme: light\n");
    let overrides = ConfigOverrides {
        theme: Some("dark".to_string()),
        ..ConfigOverrides::default()
    };

    let (config, _) = DashboardConfig::from_file_with_overrides(Some(file.path()), &overrides)
        .expect("load config");
    assert_eq!(config.tui.theme, "dark");
}

#[test]
fn test_malformed_explicit_config_is_reported() {
    let file = write_config("tui:\n  theme: [light\n");
    let err = DashboardConfig::from_file_with_overrides(
        Some(file.path()),
        &ConfigOverrides::default(),
    )
    .map_err(DashboardError::from)
    .unwrap_err();

    assert!(matches!(err, DashboardError::Config(_)));
    assert!(err.to_string().contains("parse"), "{err}");
}

#[test]
fn test_missing_explicit_config_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nowhere.yaml");
    let err = DashboardConfig::from_file_with_overrides(Some(&missing), &ConfigOverrides::default())
        .map_err(DashboardError::from)
        .unwrap_err();

    assert!(matches!(err, DashboardError::Config(_)));
    assert!(err.to_string().contains("nowhere.yaml"), "{err}");
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let file = write_config("tui:\n  theme: neon\n");
    let config = load_config_file(file.path()).expect("load config");
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("tui.theme"));
}

#[test]
fn test_example_config_parses() {
    let config: DashboardConfig =
        serde_yaml::from_str(&generate_example_config()).expect("example parses");
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_rendered_config_reloads() {
    let config = DashboardConfig::builder()
        .base_url("http://localhost:8000")
        .timeout_secs(5)
        .theme("high-contrast")
        .build();
    let file = write_config(&render_config(&config).expect("render"));
    assert_eq!(load_config_file(file.path()).expect("reload"), config);
}
