//! Skin registry and option resolution.
//!
//! A skin is a partial set of visual overrides. The [`SkinRegistry`] maps
//! names to skins and knows which skin to fall back to. [`resolve_style`]
//! flattens the global configuration and one skin into an [`EffectiveStyle`]
//! that needs no further lookups at render time.

mod registry;
mod resolver;

pub use registry::{ResolvedSkin, SkinRegistry};
pub use resolver::{EffectiveStyle, resolve_style};
