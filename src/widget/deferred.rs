use tokio::sync::mpsc;
use tracing::debug;

use crate::config::ConfigOverrides;

/// Queues configuration changes for the next tick.
///
/// Safe to use from inside a surface callback: submitting never renders.
/// The widget applies queued overrides in order at the start of its next
/// refresh cycle.
#[derive(Debug, Clone)]
pub struct DeferredConfiguration {
    tx: Option<mpsc::UnboundedSender<ConfigOverrides>>,
}

impl DeferredConfiguration {
    pub(super) fn new(tx: mpsc::UnboundedSender<ConfigOverrides>) -> Self {
        Self { tx: Some(tx) }
    }

    pub(super) fn detached() -> Self {
        Self { tx: None }
    }

    /// Queues `overrides`. Returns `false` if the widget is inert or gone.
    pub fn submit(&self, overrides: ConfigOverrides) -> bool {
        let Some(tx) = &self.tx else {
            return false;
        };

        let queued = tx.send(overrides).is_ok();
        if queued {
            debug!("configuration change deferred to next tick");
        }
        queued
    }
}
