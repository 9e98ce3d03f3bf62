//! A surface host that prints the clock as one line per frame.

use std::{
    collections::HashMap,
    io::{self, Write},
    sync::{Mutex, PoisonError},
};

use tokio::sync::mpsc;
use tracing::warn;

use crate::render::{ClickStream, ClockSurface, FaceFrame, FaceLayout, SurfaceHost, Visibility};

/// The only region a terminal offers.
pub const REGION: &str = "terminal";
/// Element clicked by typing `start`.
pub const START_ELEMENT: &str = "start";
/// Element clicked by typing `stop`.
pub const STOP_ELEMENT: &str = "stop";

type WriterFactory = Box<dyn Fn() -> Box<dyn Write + Send> + Send + Sync>;

/// Terminal-backed [`SurfaceHost`].
pub struct TerminalHost {
    writer: WriterFactory,
    listeners: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<()>>>>,
}

impl TerminalHost {
    /// A host printing to stdout.
    pub fn stdout() -> Self {
        Self::with_writer(|| Box::new(io::stdout()))
    }

    /// A host printing to writers made by `writer`.
    pub fn with_writer<F>(writer: F) -> Self
    where
        F: Fn() -> Box<dyn Write + Send> + Send + Sync + 'static,
    {
        Self {
            writer: Box::new(writer),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Clicks `element`, returning how many listeners were notified.
    pub fn click(&self, element: &str) -> usize {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(listeners) = listeners.get_mut(element) else {
            return 0;
        };

        listeners.retain(|listener| listener.send(()).is_ok());
        listeners.len()
    }
}

impl SurfaceHost for TerminalHost {
    fn surface(&self, region_id: &str) -> Option<Box<dyn ClockSurface>> {
        if region_id != REGION {
            return None;
        }

        Some(Box::new(TerminalSurface {
            out: (self.writer)(),
            layout: None,
        }))
    }

    fn clicks(&self, element_id: &str) -> Option<ClickStream> {
        if element_id != START_ELEMENT && element_id != STOP_ELEMENT {
            return None;
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(element_id.to_string())
            .or_default()
            .push(tx);
        Some(rx)
    }
}

struct TerminalSurface {
    out: Box<dyn Write + Send>,
    layout: Option<FaceLayout>,
}

impl ClockSurface for TerminalSurface {
    fn layout(&mut self, layout: &FaceLayout) {
        self.layout = Some(layout.clone());
    }

    fn paint(&mut self, frame: &FaceFrame) {
        let Some(layout) = &self.layout else {
            return;
        };

        let line = render_line(layout, frame);
        if let Err(error) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!(%error, "cannot write clock frame");
        }
    }
}

/// One frame as a line of text.
///
/// Shows hand angles folded into a single turn, the digital block when the
/// layout has one, the day label when visible and the tooltip when set.
pub fn render_line(layout: &FaceLayout, frame: &FaceFrame) -> String {
    let mut parts = Vec::new();

    if layout.digital_block {
        let mut digital = format!("{}{}{}", frame.hours, frame.divider, frame.minutes);
        if layout.seconds_text == Visibility::Visible {
            digital.push(frame.divider);
            digital.push_str(&frame.seconds);
        }
        parts.push(digital);
    }

    let mut hands = format!(
        "h {:>3.0}° m {:>3.0}°",
        frame.hour_rotation % 360.0,
        frame.minute_rotation % 360.0
    );
    if layout.second_hand == Visibility::Visible {
        hands.push_str(&format!(" s {:>3.0}°", frame.second_rotation % 360.0));
    }
    parts.push(hands);

    if layout.day == Visibility::Visible {
        parts.push(format!("day {}", frame.day));
    }
    if !frame.tooltip.is_empty() {
        parts.push(format!("({})", frame.tooltip));
    }

    format!("[{}] {}", layout.skin, parts.join("  "))
}
