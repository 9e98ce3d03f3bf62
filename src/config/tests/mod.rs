//! Unit tests for config module
//!
//! Tests configuration types, defaults, overrides and serialization.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::panic)]

use crate::{
    config::{ClockConfig, Config, ConfigOverrides, LogLevel, Skin},
    core::ClockError,
};

#[test]
fn clock_config_defaults() {
    let config = ClockConfig::default();

    assert_eq!(config.width, "150px");
    assert_eq!(config.height, "150px");
    assert_eq!(config.animate_seconds, 0.0);
    assert!(!config.frozen);
    assert!(config.show_time_as_tooltip);
    assert!(config.show_day);
    assert!(!config.show_digital_block);
    assert!(!config.show_seconds_text);
    assert!(config.show_second_hand);
    assert!(!config.use_offset);
    assert_eq!(config.offset_minutes, 0);
    assert_eq!(config.active_skin, "default");
    assert!(config.skins.contains("default"));
    assert!(config.trigger_element_ids().is_none());
}

#[test]
fn apply_round_trips_digital_block() {
    let mut config = ClockConfig::default();

    config.apply(ConfigOverrides {
        show_digital_block: Some(true),
        ..Default::default()
    });

    assert!(config.show_digital_block);
}

#[test]
fn apply_leaves_unset_options_untouched() {
    let mut config = ClockConfig::default();
    config.apply(ConfigOverrides {
        width: Some("90px".to_string()),
        ..Default::default()
    });

    config.apply(ConfigOverrides {
        show_day: Some(false),
        ..Default::default()
    });

    assert_eq!(config.width, "90px");
    assert!(!config.show_day);
    assert_eq!(config.height, "150px");
}

#[test]
fn apply_replaces_skins_without_deep_merge() {
    let mut config = ClockConfig::default();
    config.apply(ConfigOverrides::default().with_skin(
        "night",
        Skin {
            width: Some("200px".to_string()),
            show_day: Some(false),
            ..Default::default()
        },
    ));

    config.apply(ConfigOverrides::default().with_skin(
        "night",
        Skin {
            height: Some("180px".to_string()),
            ..Default::default()
        },
    ));

    let night = config.skins.get("night").unwrap();
    assert_eq!(night.width, None);
    assert_eq!(night.show_day, None);
    assert_eq!(night.height.as_deref(), Some("180px"));
}

#[test]
fn unrecognized_keys_are_captured_and_ignored() {
    let overrides = ConfigOverrides::from_toml_str(
        r#"
        show_day = false
        blink_rate = 3
        "#,
    )
    .unwrap();

    assert!(overrides.unrecognized.contains_key("blink_rate"));

    let mut config = ClockConfig::default();
    config.apply(overrides);

    let mut expected = ClockConfig::default();
    expected.show_day = false;
    assert_eq!(config, expected);
}

#[test]
fn overrides_reject_wrong_types() {
    let result = ConfigOverrides::from_toml_str(r#"show_day = "yes""#);
    assert!(result.is_err());
}

#[test]
fn triggers_require_both_ids() {
    let only_start = ConfigOverrides {
        start_trigger_element_id: Some("go".to_string()),
        ..Default::default()
    };
    assert!(!only_start.binds_triggers());

    let both = ConfigOverrides {
        start_trigger_element_id: Some("go".to_string()),
        stop_trigger_element_id: Some("halt".to_string()),
        ..Default::default()
    };
    assert!(both.binds_triggers());

    let mut config = ClockConfig::default();
    config.apply(both);
    assert_eq!(config.trigger_element_ids(), Some(("go", "halt")));
}

#[test]
fn config_file_deserializes_sections() {
    let toml_str = r##"
        [general]
        log_level = "debug"

        [clock]
        show_seconds_text = true
        active_skin = "night"

        [clock.skins.night]
        width = "200px"

        [clock.skins.night.styles]
        analog = "background: #000;"
    "##;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.clock.show_seconds_text, Some(true));
    assert_eq!(config.clock.active_skin.as_deref(), Some("night"));

    let skins = config.clock.skins.unwrap();
    assert_eq!(skins["night"].width.as_deref(), Some("200px"));
    assert_eq!(
        skins["night"].styles.analog.as_deref(),
        Some("background: #000;")
    );
}

#[test]
fn config_empty_toml() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn clock_config_serialize_roundtrip() {
    let original = ClockConfig::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized: ClockConfig = toml::from_str(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [general
        invalid syntax here
    "#;

    let result: Result<Config, toml::de::Error> = toml::from_str(invalid_toml);
    assert!(result.is_err());
}

#[test]
fn merge_prefers_later_overrides() {
    let file = ConfigOverrides {
        width: Some("120px".to_string()),
        show_day: Some(false),
        active_skin: Some("night".to_string()),
        ..ConfigOverrides::default().with_skin(
            "night",
            Skin {
                width: Some("200px".to_string()),
                ..Default::default()
            },
        )
    };
    let flags = ConfigOverrides {
        active_skin: Some("plain".to_string()),
        show_seconds_text: Some(true),
        ..ConfigOverrides::default().with_skin("plain", Skin::default())
    };

    let merged = file.merge(flags);

    assert_eq!(merged.width.as_deref(), Some("120px"));
    assert_eq!(merged.show_day, Some(false));
    assert_eq!(merged.show_seconds_text, Some(true));
    assert_eq!(merged.active_skin.as_deref(), Some("plain"));

    let skins = merged.skins.unwrap();
    assert!(skins.contains_key("night"));
    assert!(skins.contains_key("plain"));
}

#[test]
fn skin_typos_are_registered_without_effect() {
    let overrides = ConfigOverrides::from_toml_str(
        r#"
        active_skin = "night"

        [skins.night]
        widht = "200px"

        [skins.night.options]
        width = "300px"
        "#,
    )
    .unwrap();

    assert!(overrides.unrecognized.is_empty());
    let night = &overrides.skins.as_ref().unwrap()["night"];
    assert_eq!(
        night.unrecognized_keys().collect::<Vec<_>>(),
        ["options", "widht"]
    );

    let mut config = ClockConfig::default();
    config.apply(overrides);

    let style = config.effective_style(None);
    assert_eq!(style.skin, "night");
    assert_eq!(style.width, "150px");
}

#[test]
fn unusable_durations_are_rejected() {
    let error = ConfigOverrides::from_toml_str("animate_seconds = -1.0").unwrap_err();
    match error {
        ClockError::InvalidConfig { field, .. } => assert_eq!(field, "animate_seconds"),
        other => panic!("unexpected error: {other}"),
    }

    let error = ConfigOverrides::from_toml_str("[skins.night]\nanimate_seconds = nan").unwrap_err();
    match error {
        ClockError::InvalidConfig { field, .. } => {
            assert_eq!(field, "skins.night.animate_seconds");
        }
        other => panic!("unexpected error: {other}"),
    }

    let overrides = ConfigOverrides::from_toml_str("animate_seconds = 0.5").unwrap();
    assert_eq!(overrides.animate_seconds, Some(0.5));
}
