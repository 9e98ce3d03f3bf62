use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::skins::{EffectiveStyle, SkinRegistry, resolve_style};

use super::ConfigOverrides;

/// Fully populated configuration of one clock widget.
///
/// Every option has a built-in default, so a `ClockConfig` is always complete.
/// Partial changes arrive as [`ConfigOverrides`] and are folded in with
/// [`ClockConfig::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ClockConfig {
    /// Width of the analog face.
    pub width: String,

    /// Height of the analog face.
    pub height: String,

    /// Transition duration of hand movement, in seconds.
    pub animate_seconds: f64,

    /// Keep the scheduler stopped and the displayed time fixed.
    pub frozen: bool,

    /// Expose a human-readable date and time as a hover tooltip.
    pub show_time_as_tooltip: bool,

    /// Show the day-of-month label inside the face.
    pub show_day: bool,

    /// Show the digital time block below the face.
    pub show_digital_block: bool,

    /// Show seconds in the digital block.
    pub show_seconds_text: bool,

    /// Show the analog second hand.
    pub show_second_hand: bool,

    /// Anchor the time to UTC plus `offset_minutes` instead of local time.
    pub use_offset: bool,

    /// Offset from UTC in minutes, used when `use_offset` is set.
    pub offset_minutes: i32,

    /// Name of the skin handed to the option resolver.
    pub active_skin: String,

    /// Element that starts the clock when clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_trigger_element_id: Option<String>,

    /// Element that stops the clock when clicked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_trigger_element_id: Option<String>,

    /// Registered skins.
    pub skins: SkinRegistry,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            width: "150px".to_string(),
            height: "150px".to_string(),
            animate_seconds: 0.0,
            frozen: false,
            show_time_as_tooltip: true,
            show_day: true,
            show_digital_block: false,
            show_seconds_text: false,
            show_second_hand: true,
            use_offset: false,
            offset_minutes: 0,
            active_skin: SkinRegistry::BUILTIN_SKIN.to_string(),
            start_trigger_element_id: None,
            stop_trigger_element_id: None,
            skins: SkinRegistry::default(),
        }
    }
}

impl ClockConfig {
    /// Folds partial overrides into this configuration.
    ///
    /// Recognized options replace the current value. Skins are registered,
    /// replacing any existing skin of the same name entirely. Unrecognized keys
    /// are logged and ignored.
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            width,
            height,
            animate_seconds,
            frozen,
            show_time_as_tooltip,
            show_day,
            show_digital_block,
            show_seconds_text,
            show_second_hand,
            use_offset,
            offset_minutes,
            skins,
            active_skin,
            start_trigger_element_id,
            stop_trigger_element_id,
            unrecognized,
        } = overrides;

        replace(&mut self.width, width);
        replace(&mut self.height, height);
        replace(&mut self.animate_seconds, animate_seconds);
        replace(&mut self.frozen, frozen);
        replace(&mut self.show_time_as_tooltip, show_time_as_tooltip);
        replace(&mut self.show_day, show_day);
        replace(&mut self.show_digital_block, show_digital_block);
        replace(&mut self.show_seconds_text, show_seconds_text);
        replace(&mut self.show_second_hand, show_second_hand);
        replace(&mut self.use_offset, use_offset);
        replace(&mut self.offset_minutes, offset_minutes);
        replace(&mut self.active_skin, active_skin);

        if start_trigger_element_id.is_some() {
            self.start_trigger_element_id = start_trigger_element_id;
        }
        if stop_trigger_element_id.is_some() {
            self.stop_trigger_element_id = stop_trigger_element_id;
        }

        for (name, skin) in skins.unwrap_or_default() {
            debug!(skin = %name, "registering skin");
            for key in skin.unrecognized_keys() {
                warn!(skin = %name, option = %key, "ignoring unrecognized skin option");
            }
            self.skins.register(name, skin);
        }

        for key in unrecognized.keys() {
            warn!(option = %key, "ignoring unrecognized clock option");
        }
    }

    /// Resolves the effective style for `skin`, or for the active skin.
    pub fn effective_style(&self, skin: Option<&str>) -> EffectiveStyle {
        resolve_style(self, skin)
    }

    /// Both trigger element ids, when both are configured.
    pub fn trigger_element_ids(&self) -> Option<(&str, &str)> {
        match (&self.start_trigger_element_id, &self.stop_trigger_element_id) {
            (Some(start), Some(stop)) => Some((start.as_str(), stop.as_str())),
            _ => None,
        }
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
