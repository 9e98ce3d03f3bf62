//! Integration tests for loading configuration files.

#![allow(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;

use clockface::{
    ClockConfig, ClockError,
    config::{Config, ConfigPaths, ElementRole, LogLevel},
};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn loads_general_and_clock_sections() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "config.toml",
        r#"
        [general]
        log_level = "debug"

        [clock]
        show_digital_block = true
        active_skin = "night"

        [clock.skins.night]
        width = "200px"

        [clock.skins.night.styles]
        analog = "background: #123;"
        "#,
    );

    let config = Config::load_with_imports(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config.general.log_level, LogLevel::Debug);

    let mut clock = ClockConfig::default();
    clock.apply(config.clock);
    let style = clock.effective_style(None);

    assert_eq!(style.skin, "night");
    assert_eq!(style.width, "200px");
    assert!(style.show_digital_block);
    assert_eq!(style.styles.get(ElementRole::Analog), Some("background: #123;"));
    assert_eq!(style.styles.get(ElementRole::HourHand), None);
}

#[test]
fn imports_merge_beneath_the_main_file() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "skins/night.toml",
        r#"
        [clock]
        width = "90px"
        show_day = false

        [clock.skins.night]
        height = "300px"
        "#,
    );
    write(
        &dir,
        "config.toml",
        r#"
        "@skins/night" = true

        [clock]
        width = "120px"
        "#,
    );

    let config = Config::load_with_imports(&dir.path().join("config.toml")).unwrap();

    assert_eq!(config.clock.width.as_deref(), Some("120px"));
    assert_eq!(config.clock.show_day, Some(false));
    let skins = config.clock.skins.unwrap();
    assert_eq!(skins["night"].height.as_deref(), Some("300px"));
}

#[test]
fn missing_import_is_reported() {
    let dir = TempDir::new().unwrap();
    write(&dir, "config.toml", r#""@absent" = true"#);

    let error = Config::load_with_imports(&dir.path().join("config.toml")).unwrap_err();

    assert!(matches!(error, ClockError::ImportError { .. }));
}

#[test]
fn invalid_toml_is_reported_with_location() {
    let dir = TempDir::new().unwrap();
    write(&dir, "config.toml", "[clock\nwidth = ");

    let error = Config::load_with_imports(&dir.path().join("config.toml")).unwrap_err();

    match error {
        ClockError::TomlParseError { location, .. } => assert!(location.ends_with("config.toml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wrong_option_type_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "config.toml",
        r#"
        [clock]
        show_day = "yes"
        "#,
    );

    assert!(Config::load_with_imports(&dir.path().join("config.toml")).is_err());
}

#[test]
fn negative_animation_in_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "config.toml",
        r#"
        [clock.skins.night]
        animate_seconds = -0.5
        "#,
    );

    let error = Config::load_with_imports(&dir.path().join("config.toml")).unwrap_err();

    match error {
        ClockError::InvalidConfig { field, .. } => {
            assert_eq!(field, "skins.night.animate_seconds");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn default_location_follows_xdg_config_home() {
    let dir = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
    }

    assert_eq!(
        ConfigPaths::main_config().unwrap(),
        dir.path().join("clockface/config.toml")
    );
    assert_eq!(Config::load_default().unwrap(), Config::default());

    write(
        &dir,
        "clockface/config.toml",
        r#"
        [clock]
        frozen = true
        "#,
    );
    assert_eq!(Config::load_default().unwrap().clock.frozen, Some(true));
}
