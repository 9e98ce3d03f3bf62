use std::sync::Weak;

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

use crate::render::{ClickStream, SurfaceHost};

use super::Mounted;

/// What a click on a trigger element does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// Starts the clock.
    Start,
    /// Stops the clock.
    Stop,
}

/// Listens for clicks on the start and stop elements.
///
/// Elements the host does not know are skipped with a warning. Returns one
/// listener task per bound element.
pub(super) fn bind(
    host: &dyn SurfaceHost,
    (start_id, stop_id): (&str, &str),
    widget: &Weak<Mounted>,
) -> Vec<JoinHandle<()>> {
    let Ok(runtime) = Handle::try_current() else {
        warn!("no async runtime available, triggers not bound");
        return Vec::new();
    };

    [(start_id, TriggerAction::Start), (stop_id, TriggerAction::Stop)]
        .into_iter()
        .filter_map(|(element, action)| {
            let Some(clicks) = host.clicks(element) else {
                warn!(element, ?action, "trigger element not found");
                return None;
            };

            debug!(element, ?action, "trigger bound");
            Some(runtime.spawn(listen(clicks, widget.clone(), action)))
        })
        .collect()
}

async fn listen(mut clicks: ClickStream, widget: Weak<Mounted>, action: TriggerAction) {
    while clicks.recv().await.is_some() {
        let Some(widget) = widget.upgrade() else {
            break;
        };

        match action {
            TriggerAction::Start => widget.start(),
            TriggerAction::Stop => widget.stop(),
        };
    }
}
