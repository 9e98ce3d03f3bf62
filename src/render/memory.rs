use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::mpsc;

use super::{ClickStream, ClockSurface, FaceFrame, FaceLayout, SurfaceHost};

/// Everything painted onto one in-memory region.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRecord {
    /// Layouts in the order they were applied.
    pub layouts: Vec<FaceLayout>,
    /// Frames in the order they were painted.
    pub frames: Vec<FaceFrame>,
}

#[derive(Default)]
struct HostInner {
    regions: HashMap<String, Arc<Mutex<SurfaceRecord>>>,
    elements: HashMap<String, Vec<mpsc::UnboundedSender<()>>>,
}

/// A [`SurfaceHost`] that records instead of displaying.
///
/// Regions and clickable elements must be added before a widget looks them
/// up. Clicks are simulated with [`MemoryHost::click`]. Cloning shares the
/// same recording.
#[derive(Clone, Default)]
pub struct MemoryHost {
    inner: Arc<Mutex<HostInner>>,
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("MemoryHost")
            .field("regions", &inner.regions.keys().collect::<Vec<_>>())
            .field("elements", &inner.elements.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MemoryHost {
    /// An empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paintable region.
    pub fn with_region(self, region_id: &str) -> Self {
        self.lock()
            .regions
            .entry(region_id.to_string())
            .or_default();
        self
    }

    /// Adds a clickable element.
    pub fn with_element(self, element_id: &str) -> Self {
        self.lock()
            .elements
            .entry(element_id.to_string())
            .or_default();
        self
    }

    /// Clicks `element_id`, returning how many listeners were notified.
    pub fn click(&self, element_id: &str) -> usize {
        let mut inner = self.lock();
        let Some(listeners) = inner.elements.get_mut(element_id) else {
            return 0;
        };

        listeners.retain(|listener| listener.send(()).is_ok());
        listeners.len()
    }

    /// Number of live click listeners on `element_id`.
    pub fn listener_count(&self, element_id: &str) -> usize {
        self.lock()
            .elements
            .get(element_id)
            .map_or(0, |listeners| {
                listeners
                    .iter()
                    .filter(|listener| !listener.is_closed())
                    .count()
            })
    }

    /// Snapshot of what was painted onto `region_id`.
    pub fn record(&self, region_id: &str) -> Option<SurfaceRecord> {
        let record = self.lock().regions.get(region_id).cloned()?;
        let record = record.lock().unwrap_or_else(PoisonError::into_inner);
        Some(record.clone())
    }

    /// Number of frames painted onto `region_id`.
    pub fn frame_count(&self, region_id: &str) -> usize {
        self.record(region_id)
            .map_or(0, |record| record.frames.len())
    }

    /// The most recent frame painted onto `region_id`.
    pub fn last_frame(&self, region_id: &str) -> Option<FaceFrame> {
        self.record(region_id)?.frames.pop()
    }

    /// The most recent layout applied to `region_id`.
    pub fn last_layout(&self, region_id: &str) -> Option<FaceLayout> {
        self.record(region_id)?.layouts.pop()
    }

    fn lock(&self) -> MutexGuard<'_, HostInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SurfaceHost for MemoryHost {
    fn surface(&self, region_id: &str) -> Option<Box<dyn ClockSurface>> {
        let record = self.lock().regions.get(region_id).cloned()?;
        Some(Box::new(MemorySurface { record }))
    }

    fn clicks(&self, element_id: &str) -> Option<ClickStream> {
        let mut inner = self.lock();
        let listeners = inner.elements.get_mut(element_id)?;

        let (tx, rx) = mpsc::unbounded_channel();
        listeners.push(tx);
        Some(rx)
    }
}

struct MemorySurface {
    record: Arc<Mutex<SurfaceRecord>>,
}

impl MemorySurface {
    fn lock(&self) -> MutexGuard<'_, SurfaceRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClockSurface for MemorySurface {
    fn layout(&mut self, layout: &FaceLayout) {
        self.lock().layouts.push(layout.clone());
    }

    fn paint(&mut self, frame: &FaceFrame) {
        self.lock().frames.push(frame.clone());
    }
}
