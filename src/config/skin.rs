use std::{collections::BTreeMap, fmt};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A visual element of the clock face that a skin can style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    /// The round analog face.
    Analog,
    /// Shared styling for all three hands.
    Hands,
    /// Hour hand.
    HourHand,
    /// Minute hand.
    MinuteHand,
    /// Second hand.
    SecondHand,
    /// Day-of-month label inside the face.
    Day,
    /// Digital time block below the face.
    Digital,
    /// Tick marks for hours that are not a multiple of three.
    MinorTick,
    /// Tick marks at 3, 6, 9 and 12.
    MajorTick,
}

impl ElementRole {
    /// Every role, in paint order.
    pub const ALL: [ElementRole; 9] = [
        ElementRole::Analog,
        ElementRole::MinorTick,
        ElementRole::MajorTick,
        ElementRole::Hands,
        ElementRole::HourHand,
        ElementRole::MinuteHand,
        ElementRole::SecondHand,
        ElementRole::Day,
        ElementRole::Digital,
    ];

    /// Stable identifier of the role, as used in skin tables.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementRole::Analog => "analog",
            ElementRole::Hands => "hands",
            ElementRole::HourHand => "hour_hand",
            ElementRole::MinuteHand => "minute_hand",
            ElementRole::SecondHand => "second_hand",
            ElementRole::Day => "day",
            ElementRole::Digital => "digital",
            ElementRole::MinorTick => "minor_tick",
            ElementRole::MajorTick => "major_tick",
        }
    }
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style fragments keyed by element role.
///
/// A missing fragment means "no custom override": the renderer keeps the
/// base style for that role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SkinStyles {
    /// Analog face fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analog: Option<String>,

    /// Fragment applied to every hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hands: Option<String>,

    /// Hour hand fragment.
    #[serde(alias = "hhand", skip_serializing_if = "Option::is_none")]
    pub hour_hand: Option<String>,

    /// Minute hand fragment.
    #[serde(alias = "mhand", skip_serializing_if = "Option::is_none")]
    pub minute_hand: Option<String>,

    /// Second hand fragment.
    #[serde(alias = "shand", skip_serializing_if = "Option::is_none")]
    pub second_hand: Option<String>,

    /// Day label fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,

    /// Digital block fragment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digital: Option<String>,

    /// Minor tick mark fragment.
    #[serde(alias = "dot1", skip_serializing_if = "Option::is_none")]
    pub minor_tick: Option<String>,

    /// Major tick mark fragment.
    #[serde(alias = "dot2", skip_serializing_if = "Option::is_none")]
    pub major_tick: Option<String>,

    /// Keys that name no element role.
    #[serde(flatten)]
    #[schemars(skip)]
    pub unrecognized: BTreeMap<String, toml::Value>,
}

impl SkinStyles {
    /// Fragment for `role`, if the skin defines one.
    pub fn get(&self, role: ElementRole) -> Option<&str> {
        let fragment = match role {
            ElementRole::Analog => &self.analog,
            ElementRole::Hands => &self.hands,
            ElementRole::HourHand => &self.hour_hand,
            ElementRole::MinuteHand => &self.minute_hand,
            ElementRole::SecondHand => &self.second_hand,
            ElementRole::Day => &self.day,
            ElementRole::Digital => &self.digital,
            ElementRole::MinorTick => &self.minor_tick,
            ElementRole::MajorTick => &self.major_tick,
        };
        fragment.as_deref()
    }

    /// Sets the fragment for `role`.
    pub fn set(&mut self, role: ElementRole, fragment: impl Into<String>) {
        let slot = match role {
            ElementRole::Analog => &mut self.analog,
            ElementRole::Hands => &mut self.hands,
            ElementRole::HourHand => &mut self.hour_hand,
            ElementRole::MinuteHand => &mut self.minute_hand,
            ElementRole::SecondHand => &mut self.second_hand,
            ElementRole::Day => &mut self.day,
            ElementRole::Digital => &mut self.digital,
            ElementRole::MinorTick => &mut self.minor_tick,
            ElementRole::MajorTick => &mut self.major_tick,
        };
        *slot = Some(fragment.into());
    }

    /// Whether no role carries a fragment.
    pub fn is_empty(&self) -> bool {
        ElementRole::ALL.iter().all(|role| self.get(*role).is_none())
    }
}

/// A named bundle of optional visual overrides.
///
/// Every field is optional. Scalar options override the global clock
/// configuration only when set; style fragments override the base style of
/// their role only when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Skin {
    /// Face width (e.g. "150px").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Face height (e.g. "150px").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    /// Hand transition duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate_seconds: Option<f64>,

    /// Show the day-of-month label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_day: Option<bool>,

    /// Show seconds in the digital block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_seconds_text: Option<bool>,

    /// Show the analog second hand.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_second_hand: Option<bool>,

    /// Style fragments per element role.
    #[serde(skip_serializing_if = "SkinStyles::is_empty")]
    pub styles: SkinStyles,

    /// Keys that no skin option matches.
    #[serde(flatten)]
    #[schemars(skip)]
    pub unrecognized: BTreeMap<String, toml::Value>,
}

impl Skin {
    /// The skin shipped with the widget under the name "default".
    pub fn builtin_default() -> Self {
        let mut styles = SkinStyles::default();
        styles.set(
            ElementRole::Analog,
            "background: #fff; border-radius: 50%; border: 5px solid #ddd; \
             box-shadow: -2px -2px 3px #fff, 1px 1px 3px rgba(0,0,0,0.5);",
        );
        styles.set(
            ElementRole::HourHand,
            "background: #000; height: 30%; width: 8%; left: 46%;",
        );
        styles.set(
            ElementRole::MinuteHand,
            "background: #000; height: 45%; width: 6%; left: 47%;",
        );
        styles.set(
            ElementRole::SecondHand,
            "background: #f00; height: 48%; width: 2%; left: 49%;",
        );
        styles.set(
            ElementRole::Day,
            "border-radius: 5px; border: 1px solid rgba(0,0,0,0.1); padding: 0 2px;",
        );

        Self {
            styles,
            ..Self::default()
        }
    }

    /// Keys of this skin, its `styles` table included, that match no option.
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.unrecognized.keys().cloned().chain(
            self.styles
                .unrecognized
                .keys()
                .map(|key| format!("styles.{key}")),
        )
    }

    /// Whether the skin defines no overrides at all.
    pub fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.animate_seconds.is_none()
            && self.show_day.is_none()
            && self.show_seconds_text.is_none()
            && self.show_second_hand.is_none()
            && self.styles.is_empty()
    }
}
