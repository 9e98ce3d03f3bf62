//! Configuration schema definitions.
//!
//! [`ClockConfig`] is the complete, typed option record of one clock widget.
//! [`ConfigOverrides`] is its partial counterpart used for construction and
//! later changes. [`Config`] is the layout of the configuration file, which
//! wraps clock overrides together with process-wide settings.

mod clock;
mod general;
mod loading;
mod overrides;
mod paths;
mod skin;

#[cfg(test)]
mod tests;

pub use clock::ClockConfig;
pub use general::{GeneralConfig, LogLevel};
pub use overrides::ConfigOverrides;
pub use paths::ConfigPaths;
pub use skin::{ElementRole, Skin, SkinStyles};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Contents of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Overrides applied on top of the built-in clock defaults.
    #[serde(default)]
    pub clock: ConfigOverrides,
}
