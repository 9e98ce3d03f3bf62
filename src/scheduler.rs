//! Periodic refresh of the clock.
//!
//! The scheduler owns at most one pending tick, a tokio task sleeping until
//! the next refresh. Every run carries its own [`RunToken`]; stopping clears
//! the token and aborts the task, and the refresh target checks the token
//! when the tick fires, so a stale tick never acts after a stop.

use std::{
    fmt,
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle, time};
use tracing::{info, trace, warn};

use crate::skins::EffectiveStyle;

/// Refresh interval while anything on the face shows seconds.
pub const SECONDS_INTERVAL: Duration = Duration::from_millis(1000);

/// Refresh interval when minutes are the finest visible unit.
pub const MINUTES_INTERVAL: Duration = Duration::from_millis(5000);

/// Delay before the next tick under `style`.
pub fn refresh_interval(style: &EffectiveStyle) -> Duration {
    if style.shows_seconds() {
        SECONDS_INTERVAL
    } else {
        MINUTES_INTERVAL
    }
}

/// Whether the scheduler has a live run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No tick is pending.
    Stopped,
    /// Ticks are being scheduled.
    Running,
}

/// Identifies one run of the scheduler.
///
/// Cleared when that run is stopped. Refresh targets check it while holding
/// their own state, which makes a stop and an in-flight tick mutually
/// exclusive.
#[derive(Debug, Clone)]
pub struct RunToken(Arc<AtomicBool>);

impl RunToken {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether the run this token belongs to is still active.
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The thing a scheduler refreshes.
pub trait Refresh: Send + Sync + 'static {
    /// Performs one tick of the run identified by `run`.
    ///
    /// Returns the delay until the next tick, or `None` when the run should
    /// end. Must do nothing and return `None` if `run` is no longer active.
    fn refresh(&self, run: &RunToken) -> Option<Duration>;
}

/// Single pending-tick scheduler bound to one refresh target.
pub struct RefreshScheduler {
    target: Weak<dyn Refresh>,
    run: Option<RunToken>,
    task: Option<JoinHandle<()>>,
}

impl fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshScheduler")
            .field("state", &self.state())
            .finish()
    }
}

impl RefreshScheduler {
    /// Creates a stopped scheduler that will refresh `target`.
    ///
    /// Only a weak reference is kept, so dropping the target ends any run.
    pub fn new(target: Weak<dyn Refresh>) -> Self {
        Self {
            target,
            run: None,
            task: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        match &self.run {
            Some(run) if run.is_active() => SchedulerState::Running,
            _ => SchedulerState::Stopped,
        }
    }

    /// Starts a run whose first tick fires after `first_delay`.
    ///
    /// Returns `false` if already running, or if there is no tokio runtime to
    /// schedule on.
    pub fn start(&mut self, first_delay: Duration) -> bool {
        if self.state() == SchedulerState::Running {
            return false;
        }

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime available, clock will not refresh");
            return false;
        };

        let run = RunToken::new();
        let target = self.target.clone();
        let task_run = run.clone();
        self.task = Some(runtime.spawn(run_ticks(target, task_run, first_delay)));
        self.run = Some(run);

        info!(?first_delay, "clock started");
        true
    }

    /// Stops the current run. Stopping a stopped scheduler is a no-op.
    ///
    /// Returns whether a run was stopped.
    pub fn stop(&mut self) -> bool {
        let was_running = self.state() == SchedulerState::Running;

        if let Some(run) = self.run.take() {
            run.cancel();
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }

        if was_running {
            info!("clock stopped");
        }
        was_running
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticks(target: Weak<dyn Refresh>, run: RunToken, first_delay: Duration) {
    let mut delay = first_delay;

    loop {
        time::sleep(delay).await;

        if !run.is_active() {
            break;
        }
        let Some(target) = target.upgrade() else {
            break;
        };

        match target.refresh(&run) {
            Some(next) => {
                trace!(?next, "tick");
                delay = next;
            }
            None => break,
        }
    }
}
