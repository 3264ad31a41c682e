//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;
use tourguide_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};

fn clear_env() {
    for key in [
        "TOURGUIDE_ENDPOINT",
        "TOURGUIDE_LANGUAGE",
        "TOURGUIDE_DESTINATION",
        "TOURGUIDE_VOICE",
        "TOURGUIDE_VOICE_COMMANDS",
        "TOURGUIDE_KNOWLEDGE",
        "TOURGUIDE_LATITUDE",
        "TOURGUIDE_LONGITUDE",
        "TOURGUIDE_PROBE_INTERVAL",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
endpoint = "http://from-file:5000"
language = "es"
"#
    )
    .unwrap();

    env::set_var("TOURGUIDE_ENDPOINT", "http://from-env:5000");

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.endpoint.value, "http://from-env:5000");
    assert_eq!(config.endpoint.source, ConfigSource::Environment);
    assert_eq!(config.language.value, "es");
    assert_eq!(config.language.source, ConfigSource::File);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("TOURGUIDE_LANGUAGE", "fr");
    env::set_var("TOURGUIDE_VOICE", "yes");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    assert_eq!(config.language.value, "fr");
    assert!(config.voice_enabled.value);

    config.update_from_cli(CliConfigOverrides {
        language: Some("ja".to_string()),
        ..Default::default()
    });

    assert_eq!(config.language.value, "ja");
    assert_eq!(config.language.source, ConfigSource::Cli);
    assert_eq!(config.voice_enabled.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();
    env::set_var("TOURGUIDE_LANGUAGE", "klingon");
    env::set_var("TOURGUIDE_VOICE", "perhaps");
    env::set_var("TOURGUIDE_LATITUDE", "123.0");
    env::set_var("TOURGUIDE_PROBE_INTERVAL", "0");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.language.value, "en");
    assert_eq!(config.language.source, ConfigSource::Default);
    assert!(!config.voice_enabled.value);
    assert_eq!(config.latitude.source, ConfigSource::Default);
    assert_eq!(config.probe_interval_secs.value, 10);

    clear_env();
}

#[test]
#[serial]
fn test_blank_destination_env_clears_destination() {
    clear_env();
    env::set_var("TOURGUIDE_DESTINATION", "  ");

    let config = LayeredConfig::with_defaults().load_from_env();
    assert_eq!(config.destination.value, None);
    assert_eq!(config.destination.source, ConfigSource::Environment);

    clear_env();
}
