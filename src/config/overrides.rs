use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{ClockError, Result};

use super::Skin;

/// A partial set of clock options.
///
/// Used at construction and by `set_configuration`. Only the options that are
/// `Some` take effect. Keys that are not recognized land in `unrecognized` and
/// are ignored when the overrides are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConfigOverrides {
    /// Width of the analog face.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Height of the analog face.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    /// Transition duration of hand movement, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate_seconds: Option<f64>,

    /// Freeze the displayed time and stop the scheduler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frozen: Option<bool>,

    /// Expose the date and time as a hover tooltip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_time_as_tooltip: Option<bool>,

    /// Show the day-of-month label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_day: Option<bool>,

    /// Show the digital time block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_digital_block: Option<bool>,

    /// Show seconds in the digital block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_seconds_text: Option<bool>,

    /// Show the analog second hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_second_hand: Option<bool>,

    /// Anchor the time to UTC plus `offset_minutes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_offset: Option<bool>,

    /// Offset from UTC in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_minutes: Option<i32>,

    /// Skins to register or replace, by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skins: Option<BTreeMap<String, Skin>>,

    /// Name of the skin to activate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_skin: Option<String>,

    /// Element that starts the clock when clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger_element_id: Option<String>,

    /// Element that stops the clock when clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_trigger_element_id: Option<String>,

    /// Keys that no option matches.
    #[serde(flatten)]
    #[schemars(skip)]
    pub unrecognized: BTreeMap<String, toml::Value>,
}

impl ConfigOverrides {
    /// Parses overrides from a TOML table.
    ///
    /// # Errors
    /// Returns `ClockError::TomlParseError` if the string is not valid TOML or
    /// a recognized key carries a value of the wrong type, and
    /// `ClockError::InvalidConfig` if a value is out of range.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let overrides: Self =
            toml::from_str(source).map_err(|e| ClockError::toml_parse(e, None))?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// Checks values that parse but cannot be used.
    ///
    /// # Errors
    /// Returns `ClockError::InvalidConfig` if an animation duration, global
    /// or per skin, is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        check_duration("animate_seconds", self.animate_seconds)?;
        for (name, skin) in self.skins.iter().flatten() {
            check_duration(&format!("skins.{name}.animate_seconds"), skin.animate_seconds)?;
        }
        Ok(())
    }

    /// Whether both trigger element ids are supplied, which requests a
    /// re-binding of the start and stop actions.
    pub fn binds_triggers(&self) -> bool {
        self.start_trigger_element_id.is_some() && self.stop_trigger_element_id.is_some()
    }

    /// Layers `later` on top of these overrides.
    ///
    /// Options set in `later` win. Skins from both are kept, with `later`
    /// replacing same-named skins entirely.
    pub fn merge(self, later: ConfigOverrides) -> Self {
        let skins = match (self.skins, later.skins) {
            (Some(mut earlier), Some(later)) => {
                earlier.extend(later);
                Some(earlier)
            }
            (earlier, later) => later.or(earlier),
        };
        let mut unrecognized = self.unrecognized;
        unrecognized.extend(later.unrecognized);

        Self {
            width: later.width.or(self.width),
            height: later.height.or(self.height),
            animate_seconds: later.animate_seconds.or(self.animate_seconds),
            frozen: later.frozen.or(self.frozen),
            show_time_as_tooltip: later.show_time_as_tooltip.or(self.show_time_as_tooltip),
            show_day: later.show_day.or(self.show_day),
            show_digital_block: later.show_digital_block.or(self.show_digital_block),
            show_seconds_text: later.show_seconds_text.or(self.show_seconds_text),
            show_second_hand: later.show_second_hand.or(self.show_second_hand),
            use_offset: later.use_offset.or(self.use_offset),
            offset_minutes: later.offset_minutes.or(self.offset_minutes),
            skins,
            active_skin: later.active_skin.or(self.active_skin),
            start_trigger_element_id: later
                .start_trigger_element_id
                .or(self.start_trigger_element_id),
            stop_trigger_element_id: later
                .stop_trigger_element_id
                .or(self.stop_trigger_element_id),
            unrecognized,
        }
    }

    /// Registers a single skin in these overrides.
    pub fn with_skin(mut self, name: impl Into<String>, skin: Skin) -> Self {
        self.skins
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), skin);
        self
    }
}

fn check_duration(field: &str, seconds: Option<f64>) -> Result<()> {
    match seconds {
        Some(seconds) if !seconds.is_finite() || seconds < 0.0 => Err(ClockError::InvalidConfig {
            field: field.to_string(),
            reason: format!("expected a non-negative number of seconds, got {seconds}"),
        }),
        _ => Ok(()),
    }
}
