use std::{collections::BTreeMap, f64::consts::PI};

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::{config::ElementRole, skins::EffectiveStyle, time_source::ClockInstant};

/// Radius of the tick ring, in percent of the face.
const TICK_RADIUS: f64 = 45.0;
/// Offset that centres the tick ring, in percent of the face.
const TICK_CENTER: f64 = 48.0;
/// Hands point down at 0 degrees; this turns them to 12 o'clock.
const HAND_ORIGIN: f64 = 180.0;

/// Whether an element is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    /// Shown.
    Visible,
    /// Hidden, keeping its space.
    Hidden,
}

impl Visibility {
    /// `Visible` when `shown`.
    pub fn from_flag(shown: bool) -> Self {
        if shown {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    /// Value for a CSS `visibility` property.
    pub fn css_visibility(self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        }
    }

    /// Value for a CSS `display` property.
    pub fn css_display(self) -> &'static str {
        match self {
            Visibility::Visible => "inline",
            Visibility::Hidden => "none",
        }
    }
}

/// Style applied to a role when the skin gives no fragment.
pub fn base_style(role: ElementRole) -> &'static str {
    match role {
        ElementRole::Analog => {
            "border-radius: 50%; margin-right: 0; position: relative; right: 0; width: 80px; height: 80px;"
        }
        ElementRole::Hands => {
            "transform-origin: 50% 0%; border-radius: 40%; margin: 0; position: absolute; z-index: 100;"
        }
        ElementRole::HourHand => "background: #000; height: 30%; width: 8%; left: 46%; top: 50%;",
        ElementRole::MinuteHand => "background: #000; height: 40%; width: 6%; left: 47%; top: 50%;",
        ElementRole::SecondHand => "background: #f00; height: 48%; width: 2%; left: 49%; top: 50%;",
        ElementRole::Day => "font-size: 70%; position: absolute; right: 12px; top: 41%; z-index: 50;",
        ElementRole::Digital => "position: relative;",
        ElementRole::MinorTick => "background: #fff; border: 1px solid #ddd; height: 2%; width: 2%;",
        ElementRole::MajorTick => "background: #888; height: 4%; width: 4%;",
    }
}

/// One hour mark on the face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickMark {
    /// Hour the mark stands for, 1 to 12.
    pub hour: u8,
    /// `MajorTick` at multiples of three, `MinorTick` otherwise.
    pub role: ElementRole,
    /// Distance from the top edge, in percent.
    pub top_percent: f64,
    /// Distance from the left edge, in percent.
    pub left_percent: f64,
}

/// The twelve hour marks, clockwise from one o'clock.
pub fn tick_marks() -> Vec<TickMark> {
    (1..=12u8)
        .map(|hour| {
            let angle = PI / 6.0 * f64::from(hour);
            TickMark {
                hour,
                role: if hour % 3 == 0 {
                    ElementRole::MajorTick
                } else {
                    ElementRole::MinorTick
                },
                top_percent: -angle.cos() * TICK_RADIUS + TICK_CENTER,
                left_percent: angle.sin() * TICK_RADIUS + TICK_CENTER,
            }
        })
        .collect()
}

/// Everything about the face that changes only with the options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceLayout {
    /// Name of the applied skin.
    pub skin: String,
    /// Face width.
    pub width: String,
    /// Face height.
    pub height: String,
    /// Transition of the hands, e.g. "all 0.5s ease-in".
    pub transition: String,
    /// Second hand visibility.
    pub second_hand: Visibility,
    /// Day label visibility.
    pub day: Visibility,
    /// Seconds text visibility.
    pub seconds_text: Visibility,
    /// Whether the digital block exists at all.
    pub digital_block: bool,
    /// Hour marks.
    pub ticks: Vec<TickMark>,
    /// Final style per role: base style followed by the skin fragment.
    pub styles: BTreeMap<ElementRole, String>,
}

impl FaceLayout {
    /// Lays out the face for `style`.
    pub fn from_style(style: &EffectiveStyle) -> Self {
        let styles = ElementRole::ALL
            .into_iter()
            .map(|role| {
                let combined = match style.styles.get(role) {
                    Some(fragment) => format!("{} {}", base_style(role), fragment),
                    None => base_style(role).to_string(),
                };
                (role, combined)
            })
            .collect();

        Self {
            skin: style.skin.clone(),
            width: style.width.clone(),
            height: style.height.clone(),
            transition: format!("all {}s ease-in", style.animate_seconds),
            second_hand: Visibility::from_flag(style.show_second_hand),
            day: Visibility::from_flag(style.show_day),
            seconds_text: Visibility::from_flag(style.show_seconds_text),
            digital_block: style.show_digital_block,
            ticks: tick_marks(),
            styles,
        }
    }

    /// Final style of `role`.
    pub fn style(&self, role: ElementRole) -> &str {
        self.styles
            .get(&role)
            .map_or_else(|| base_style(role), String::as_str)
    }
}

/// Everything about the face that changes with the time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceFrame {
    /// Hour hand rotation in degrees.
    pub hour_rotation: f64,
    /// Minute hand rotation in degrees.
    pub minute_rotation: f64,
    /// Second hand rotation in degrees. Grows through the day so a
    /// transition never runs backwards at the minute boundary.
    pub second_rotation: f64,
    /// Day of month.
    pub day: String,
    /// Two-digit hours.
    pub hours: String,
    /// Two-digit minutes.
    pub minutes: String,
    /// Two-digit seconds.
    pub seconds: String,
    /// '.' on even seconds, ':' on odd seconds.
    pub divider: char,
    /// Hover text; empty when tooltips are off.
    pub tooltip: String,
}

impl FaceFrame {
    /// The face at `instant`.
    pub fn at(instant: &ClockInstant, style: &EffectiveStyle) -> Self {
        let hours = instant.hour();
        let minutes = instant.minute();
        let seconds = instant.second();

        let tooltip = if style.show_time_as_tooltip {
            format!(
                "{}.{}. - {}",
                instant.day(),
                instant.month(),
                time_label(instant)
            )
        } else {
            String::new()
        };

        Self {
            hour_rotation: f64::from(hours * 30) + f64::from(minutes) / 2.0 + HAND_ORIGIN,
            minute_rotation: f64::from(minutes * 6) + HAND_ORIGIN,
            second_rotation: f64::from(seconds * 6 + minutes * 360 + hours * 360 * 24)
                + HAND_ORIGIN,
            day: instant.day().to_string(),
            hours: format!("{hours:02}"),
            minutes: format!("{minutes:02}"),
            seconds: format!("{seconds:02}"),
            divider: if seconds % 2 == 0 { '.' } else { ':' },
            tooltip,
        }
    }
}

/// "HH:MM" for `instant`.
pub fn time_label(instant: &ClockInstant) -> String {
    format!("{:02}:{:02}", instant.hour(), instant.minute())
}
