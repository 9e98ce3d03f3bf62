use std::{collections::BTreeMap, sync::LazyLock};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Skin;

static BUILTIN: LazyLock<Skin> = LazyLock::new(Skin::builtin_default);

/// Named skins plus the name to fall back to for unknown lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SkinRegistry {
    /// Skin used when a lookup names an unregistered skin.
    fallback_skin: String,

    #[serde(flatten)]
    skins: BTreeMap<String, Skin>,
}

/// The outcome of a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSkin<'a> {
    /// Name of the skin actually used.
    pub name: &'a str,
    /// Its overrides.
    pub skin: &'a Skin,
}

impl Default for SkinRegistry {
    fn default() -> Self {
        let mut skins = BTreeMap::new();
        skins.insert(Self::BUILTIN_SKIN.to_string(), Skin::builtin_default());

        Self {
            fallback_skin: Self::BUILTIN_SKIN.to_string(),
            skins,
        }
    }
}

impl SkinRegistry {
    /// Name of the built-in skin, the last resort of every lookup.
    pub const BUILTIN_SKIN: &'static str = "default";

    /// A registry with no skins registered.
    ///
    /// Lookups still succeed by falling back to the built-in skin.
    pub fn empty() -> Self {
        Self {
            fallback_skin: Self::BUILTIN_SKIN.to_string(),
            skins: BTreeMap::new(),
        }
    }

    /// Registers `skin` under `name`, replacing any previous skin entirely.
    pub fn register(&mut self, name: impl Into<String>, skin: Skin) {
        self.skins.insert(name.into(), skin);
    }

    /// Designates the skin used for unknown lookups.
    pub fn set_fallback(&mut self, name: impl Into<String>) {
        self.fallback_skin = name.into();
    }

    /// Name of the designated fallback skin.
    pub fn fallback(&self) -> &str {
        &self.fallback_skin
    }

    /// The skin registered under `name`, without fallback.
    pub fn get(&self, name: &str) -> Option<&Skin> {
        self.skins.get(name)
    }

    /// Whether a skin is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.skins.contains_key(name)
    }

    /// Registered skin names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skins.keys().map(String::as_str)
    }

    /// Looks up `name`, falling back to the designated fallback skin and then
    /// to the built-in skin. Never fails.
    pub fn resolve(&self, name: &str) -> ResolvedSkin<'_> {
        if let Some((name, skin)) = self.skins.get_key_value(name) {
            return ResolvedSkin { name, skin };
        }

        if let Some((fallback, skin)) = self.skins.get_key_value(&self.fallback_skin) {
            debug!(requested = name, fallback = %fallback, "unknown skin, using fallback");
            return ResolvedSkin {
                name: fallback,
                skin,
            };
        }

        debug!(
            requested = name,
            fallback = %self.fallback_skin,
            "fallback skin missing, using built-in skin"
        );
        ResolvedSkin {
            name: Self::BUILTIN_SKIN,
            skin: &BUILTIN,
        }
    }
}
