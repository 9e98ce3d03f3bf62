use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::{render::time_label, time_source::ClockInstant};

/// The instant a widget currently displays.
///
/// Watchers are notified whenever the displayed instant changes.
#[derive(Debug)]
pub struct ClockState {
    tx: watch::Sender<Option<ClockInstant>>,
    rx: watch::Receiver<Option<ClockInstant>>,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    /// State with no instant displayed yet.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self { tx, rx }
    }

    /// The displayed instant, if any.
    pub fn get(&self) -> Option<ClockInstant> {
        *self.rx.borrow()
    }

    /// Replaces the displayed instant.
    pub(crate) fn set(&self, instant: Option<ClockInstant>) {
        self.tx.send_if_modified(|current| {
            if *current == instant {
                false
            } else {
                *current = instant;
                true
            }
        });
    }

    /// "HH:MM" of the displayed instant, or `None` before the first one.
    pub fn time_label(&self) -> Option<String> {
        self.get().as_ref().map(time_label)
    }

    /// Stream of the displayed instant.
    ///
    /// Yields the current value first, then every change.
    pub fn watch(&self) -> impl Stream<Item = Option<ClockInstant>> + Send + use<> {
        WatchStream::new(self.rx.clone())
    }
}
