use schemars::JsonSchema;
use serde::Serialize;

use crate::config::{ClockConfig, SkinStyles};

use super::{ResolvedSkin, SkinRegistry};

/// Render-ready style for one paint cycle.
///
/// Every field is populated. A `None` style fragment is the "no custom
/// override" sentinel: the renderer keeps the base style for that role.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct EffectiveStyle {
    /// Name of the skin that was actually applied.
    pub skin: String,
    /// Width of the analog face.
    pub width: String,
    /// Height of the analog face.
    pub height: String,
    /// Hand transition duration, in seconds.
    pub animate_seconds: f64,
    /// Day-of-month label visible.
    pub show_day: bool,
    /// Seconds visible in the digital block.
    pub show_seconds_text: bool,
    /// Analog second hand visible.
    pub show_second_hand: bool,
    /// Digital block present.
    pub show_digital_block: bool,
    /// Date and time exposed as tooltip.
    pub show_time_as_tooltip: bool,
    /// Skin fragments per element role.
    pub styles: SkinStyles,
}

impl EffectiveStyle {
    /// Whether anything on the face changes every second.
    pub fn shows_seconds(&self) -> bool {
        self.show_seconds_text || self.show_second_hand
    }
}

/// Merges the global configuration with one skin.
///
/// `requested` selects the skin; `None` uses the configured active skin. An
/// unknown name falls back through the registry and never fails. Scalar
/// options come from the skin only where the skin defines them, otherwise
/// from `config`.
pub fn resolve_style(config: &ClockConfig, requested: Option<&str>) -> EffectiveStyle {
    let name = match requested {
        Some(name) => name,
        None if config.active_skin.is_empty() => SkinRegistry::BUILTIN_SKIN,
        None => config.active_skin.as_str(),
    };

    let ResolvedSkin { name, skin } = config.skins.resolve(name);

    EffectiveStyle {
        skin: name.to_string(),
        width: skin.width.clone().unwrap_or_else(|| config.width.clone()),
        height: skin.height.clone().unwrap_or_else(|| config.height.clone()),
        animate_seconds: skin.animate_seconds.unwrap_or(config.animate_seconds),
        show_day: skin.show_day.unwrap_or(config.show_day),
        show_seconds_text: skin.show_seconds_text.unwrap_or(config.show_seconds_text),
        show_second_hand: skin.show_second_hand.unwrap_or(config.show_second_hand),
        show_digital_block: config.show_digital_block,
        show_time_as_tooltip: config.show_time_as_tooltip,
        styles: SkinStyles {
            unrecognized: Default::default(),
            ..skin.styles.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigOverrides, ElementRole, Skin};

    fn night_config() -> ClockConfig {
        let mut config = ClockConfig::default();
        config.apply(ConfigOverrides::default().with_skin(
            "night",
            Skin {
                width: Some("200px".to_string()),
                ..Default::default()
            },
        ));
        config
    }

    #[test]
    fn default_skin_keeps_global_options() {
        let style = resolve_style(&ClockConfig::default(), None);

        assert_eq!(style.skin, "default");
        assert_eq!(style.width, "150px");
        assert!(style.show_second_hand);
        assert!(!style.show_seconds_text);
        assert!(style.styles.get(ElementRole::Analog).is_some());
        assert_eq!(style.styles.get(ElementRole::Digital), None);
    }

    #[test]
    fn night_skin_overrides_width_only() {
        let mut config = night_config();
        config.active_skin = "night".to_string();

        let style = resolve_style(&config, None);

        let expected = EffectiveStyle {
            skin: "night".to_string(),
            width: "200px".to_string(),
            height: "150px".to_string(),
            animate_seconds: 0.0,
            show_day: true,
            show_seconds_text: false,
            show_second_hand: true,
            show_digital_block: false,
            show_time_as_tooltip: true,
            styles: SkinStyles::default(),
        };
        assert_eq!(style, expected);
    }

    #[test]
    fn requested_skin_wins_over_active_skin() {
        let config = night_config();

        assert_eq!(resolve_style(&config, Some("night")).width, "200px");
        assert_eq!(resolve_style(&config, None).width, "150px");
    }

    #[test]
    fn unknown_skin_matches_fallback() {
        let config = night_config();

        let unknown = resolve_style(&config, Some("solarized"));
        let fallback = resolve_style(&config, Some(config.skins.fallback()));

        assert_eq!(unknown, fallback);
    }

    #[test]
    fn empty_active_skin_uses_builtin() {
        let mut config = night_config();
        config.active_skin.clear();

        assert_eq!(resolve_style(&config, None).skin, "default");
    }

    #[test]
    fn skin_flags_override_global_flags() {
        let mut config = ClockConfig::default();
        config.apply(ConfigOverrides {
            show_seconds_text: Some(true),
            show_digital_block: Some(true),
            active_skin: Some("calm".to_string()),
            ..ConfigOverrides::default().with_skin(
                "calm",
                Skin {
                    show_seconds_text: Some(false),
                    show_second_hand: Some(false),
                    ..Default::default()
                },
            )
        });

        let style = resolve_style(&config, None);

        assert!(!style.show_seconds_text);
        assert!(!style.show_second_hand);
        assert!(!style.shows_seconds());
        assert!(style.show_digital_block);
    }

    #[test]
    fn digital_seconds_scenario() {
        let mut config = ClockConfig::default();
        config.apply(ConfigOverrides {
            show_digital_block: Some(true),
            show_seconds_text: Some(true),
            ..Default::default()
        });

        let style = resolve_style(&config, None);

        assert!(style.show_digital_block);
        assert!(style.show_seconds_text);
        assert!(style.shows_seconds());
    }
}
