//! Clockface - analog/digital clock widget core.
//!
//! A clock is mounted onto a region of a [`render::SurfaceHost`] and keeps
//! painting the current time until stopped. The main features include:
//!
//! - Typed options with documented defaults, loaded from TOML with imports
//! - Named skins that override styles and options of the face
//! - Local time or UTC plus a fixed offset
//! - A refresh interval that adapts to whether seconds are visible
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use clockface::{ClockWidget, ConfigOverrides, render::MemoryHost};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let host = MemoryHost::new().with_region("clock");
//! let overrides = ConfigOverrides {
//!     show_digital_block: Some(true),
//!     ..Default::default()
//! };
//!
//! let widget = ClockWidget::mount(Arc::new(host), Some("clock"), Some(overrides));
//! println!("showing {:?}", widget.time_label());
//! # }
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Where the displayed time comes from.
pub mod time_source;

/// Skin registry and option resolution.
pub mod skins;

/// Periodic refresh of the clock.
pub mod scheduler;

/// Display surfaces and face geometry.
pub mod render;

/// The clock widget and its public operations.
pub mod widget;

/// Command-line interface.
pub mod cli;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use config::{ClockConfig, ConfigOverrides};
pub use core::{ClockError, Result};
pub use skins::EffectiveStyle;
pub use widget::ClockWidget;
