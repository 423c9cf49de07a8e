//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::path::PathBuf;
use std::time::Instant;
use serial_test::serial;
use sushirun::config::AppConfig;
use sushirun::input::InputAction;
use sushirun::systems::RunSession;
use sushirun_math::Vec2;

/// Fresh config directory under the system temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sushirun-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_checked_in_defaults_load() {
    std::env::remove_var("SUSHI_WINDOW__TITLE");
    std::env::remove_var("SUSHI_TREADMILL__MAX_SPEED");

    let config = AppConfig::load().unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.treadmill.max_speed, defaults.treadmill.max_speed);
    assert_eq!(config.treadmill.tick_interval_ms, 1000);
    assert_eq!(config.panel.expanded_size, defaults.panel.expanded_size);
    assert_eq!(config.rendering.clear_color, 0xf8fafc);
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SUSHI_WINDOW__TITLE", "Test From Env");
    std::env::set_var("SUSHI_TREADMILL__MAX_SPEED", "4.5");
    let config = AppConfig::load();
    std::env::remove_var("SUSHI_WINDOW__TITLE");
    std::env::remove_var("SUSHI_TREADMILL__MAX_SPEED");

    let config = config.unwrap();
    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.treadmill.max_speed, 4.5);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = scratch_dir("user-override");
    std::fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"From Default\"\nwidth = 640\n\n[treadmill]\nspeed_step = 0.25\n",
    )
    .unwrap();
    std::fs::write(dir.join("user.toml"), "[window]\ntitle = \"From User\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "From User");
    assert_eq!(config.window.width, 640);
    assert_eq!(config.treadmill.speed_step, 0.25);
    // Untouched sections fall back to built-in defaults
    assert_eq!(config.orbit.min_distance, 2.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = scratch_dir("missing").join("nope");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "Sushi Run Club");
}

#[test]
#[serial]
fn test_invalid_value_is_an_error() {
    let dir = scratch_dir("invalid");
    std::fs::write(dir.join("default.toml"), "[treadmill]\nmax_speed = \"fast\"\n").unwrap();

    let err = AppConfig::load_from(&dir).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
#[serial]
fn test_loaded_limits_drive_the_session() {
    let dir = scratch_dir("session");
    std::fs::write(
        dir.join("default.toml"),
        "[treadmill]\nmax_speed = 2.0\ninitial_speed = 2.0\n",
    )
    .unwrap();
    let config = AppConfig::load_from(&dir).unwrap();
    let _ = std::fs::remove_dir_all(&dir);

    let now = Instant::now();
    let mut session = RunSession::new(&config, Vec2::new(800.0, 600.0), now);
    assert_eq!(session.treadmill.speed(), 2.0);
    assert!(!session.treadmill.can_increase());

    session.apply(InputAction::IncreaseSpeed, now);
    assert_eq!(session.treadmill.speed(), 2.0);
}
