//! Configuration loading tests
//!
//! Each test uses its own environment prefix so tests can run in parallel.

use cadence_playback::{PlaybackConfig, PlaybackEngine, PlaybackError, RepeatMode};
use std::io::Write;
use tempfile::NamedTempFile;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("cadence_playback=debug")
        .with_test_writer()
        .try_init();
}

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn no_sources_yields_defaults() {
    let config = PlaybackConfig::load_with_prefix(None, "CADENCE_TEST_DEFAULTS").unwrap();
    assert_eq!(config, PlaybackConfig::default());
}

#[test]
fn file_overrides_defaults() {
    init_tracing();
    let file = toml_file(
        r#"
volume = 0.35
repeat = "all"
restart_threshold_secs = 5.0
"#,
    );

    let config =
        PlaybackConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_FILE").unwrap();

    assert_eq!(config.volume, 0.35);
    assert_eq!(config.repeat, RepeatMode::All);
    assert_eq!(config.restart_threshold_secs, 5.0);
    assert!(!config.muted);
    assert!(!config.shuffle);
}

#[test]
fn environment_overrides_file() {
    init_tracing();
    let file = toml_file("volume = 0.35\nmuted = false\n");
    std::env::set_var("CADENCE_TEST_ENV_MUTED", "true");
    std::env::set_var("CADENCE_TEST_ENV_VOLUME", "0.6");

    let config = PlaybackConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_ENV").unwrap();

    std::env::remove_var("CADENCE_TEST_ENV_MUTED");
    std::env::remove_var("CADENCE_TEST_ENV_VOLUME");

    assert!(config.muted);
    assert_eq!(config.volume, 0.6);
}

#[test]
fn out_of_range_file_value_is_rejected() {
    init_tracing();
    let file = toml_file("volume = 4.0\n");

    let result = PlaybackConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_INVALID");
    assert!(matches!(result, Err(PlaybackError::InvalidConfig(_))));
}

#[test]
fn malformed_file_is_a_config_error() {
    init_tracing();
    let file = toml_file("repeat = \"sometimes\"\n");

    let result = PlaybackConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_MALFORMED");
    assert!(matches!(result, Err(PlaybackError::Config(_))));
}

#[test]
fn loaded_config_seeds_engine() {
    let file = toml_file("volume = 0.5\nrepeat = \"one\"\nshuffle = true\n");
    let config =
        PlaybackConfig::load_with_prefix(Some(file.path()), "CADENCE_TEST_ENGINE").unwrap();

    let engine: PlaybackEngine = PlaybackEngine::new(config);
    assert_eq!(engine.get_volume(), 0.5);
    assert_eq!(engine.get_repeat(), RepeatMode::One);
    assert!(engine.is_shuffle_enabled());
}
