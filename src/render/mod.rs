//! Painting the clock onto a display surface.
//!
//! The widget never touches a display directly. A [`SurfaceHost`] hands out
//! the [`ClockSurface`] for a page region and click streams for trigger
//! elements; the [`Renderer`] turns resolved styles and instants into
//! [`FaceLayout`] and [`FaceFrame`] descriptions and passes them on.

mod face;
mod memory;

pub use face::{
    FaceFrame, FaceLayout, TickMark, Visibility, base_style, tick_marks, time_label,
};
pub use memory::{MemoryHost, SurfaceRecord};

use std::fmt;

use tokio::sync::mpsc;

use crate::{skins::EffectiveStyle, time_source::ClockInstant};

/// Clicks on a trigger element, one message per click.
pub type ClickStream = mpsc::UnboundedReceiver<()>;

/// A region the clock paints into.
///
/// Callbacks run while the widget is locked. Calling back into the widget
/// from `layout` or `paint` deadlocks; submit changes through
/// [`ClockWidget::deferred_configuration`](crate::ClockWidget::deferred_configuration)
/// instead.
pub trait ClockSurface: Send {
    /// Applies a new layout. Called whenever the options change.
    fn layout(&mut self, layout: &FaceLayout);

    /// Shows a new frame. Called on every refresh.
    fn paint(&mut self, frame: &FaceFrame);
}

/// Element lookup and event subscription.
pub trait SurfaceHost: Send + Sync {
    /// The surface for `region_id`, if that region exists.
    fn surface(&self, region_id: &str) -> Option<Box<dyn ClockSurface>>;

    /// Subscribes to clicks on `element_id`, if that element exists.
    fn clicks(&self, element_id: &str) -> Option<ClickStream>;
}

/// Paints one widget onto its surface.
pub struct Renderer {
    surface: Box<dyn ClockSurface>,
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// A renderer painting onto `surface`.
    pub fn new(surface: Box<dyn ClockSurface>) -> Self {
        Self { surface }
    }

    /// Lays the face out again for `style`.
    pub fn relayout(&mut self, style: &EffectiveStyle) {
        self.surface.layout(&FaceLayout::from_style(style));
    }

    /// Paints `instant` under `style`.
    pub fn paint(&mut self, instant: &ClockInstant, style: &EffectiveStyle) {
        self.surface.paint(&FaceFrame::at(instant, style));
    }
}
