//! The clock widget.
//!
//! A [`ClockWidget`] is mounted onto a region of a [`SurfaceHost`]. It owns its
//! configuration, the displayed instant and a [`RefreshScheduler`]; nothing is
//! shared between widgets. Mounting onto a region that does not exist yields an
//! inert widget on which every operation is a no-op.

mod deferred;
mod state;
mod triggers;

pub use deferred::DeferredConfiguration;
pub use state::ClockState;
pub use triggers::TriggerAction;

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use futures::stream::Stream;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::{ClockConfig, ConfigOverrides},
    render::{Renderer, SurfaceHost},
    scheduler::{Refresh, RefreshScheduler, RunToken, SchedulerState, refresh_interval},
    skins::EffectiveStyle,
    time_source::{ClockInstant, SystemClock, TimeSource, WallClock},
};

/// A clock painting onto one surface region.
pub struct ClockWidget {
    mounted: Option<Arc<Mounted>>,
}

impl fmt::Debug for ClockWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mounted {
            Some(mounted) => f
                .debug_struct("ClockWidget")
                .field("target", &mounted.target_id)
                .field("state", &mounted.lock().scheduler.state())
                .field("instant", &mounted.state.get())
                .finish(),
            None => f.write_str("ClockWidget(inert)"),
        }
    }
}

impl ClockWidget {
    /// Mounts a clock on `target_id`, reading the system clock.
    ///
    /// See [`ClockWidget::mount_with_clock`].
    pub fn mount(
        host: Arc<dyn SurfaceHost>,
        target_id: Option<&str>,
        overrides: Option<ConfigOverrides>,
    ) -> Self {
        Self::mount_with_clock(host, target_id, overrides, Arc::new(SystemClock))
    }

    /// Mounts a clock on `target_id`, reading time from `clock`.
    ///
    /// `overrides` are applied on top of the defaults. The clock starts
    /// running right away unless `frozen` is set, in which case the current
    /// time is painted once and stays fixed. If `target_id` is missing or
    /// names no region of `host`, the returned widget is inert.
    #[instrument(skip(host, overrides, clock))]
    pub fn mount_with_clock(
        host: Arc<dyn SurfaceHost>,
        target_id: Option<&str>,
        overrides: Option<ConfigOverrides>,
        clock: Arc<dyn WallClock>,
    ) -> Self {
        let Some(target_id) = target_id.filter(|id| !id.is_empty()) else {
            warn!("no target region given, clock is inert");
            return Self::inert();
        };
        let Some(surface) = host.surface(target_id) else {
            warn!(target_id, "target region not found, clock is inert");
            return Self::inert();
        };

        let mut config = ClockConfig::default();
        if let Some(overrides) = overrides {
            config.apply(overrides);
        }
        let style = config.effective_style(None);
        let mut renderer = Renderer::new(surface);
        renderer.relayout(&style);

        let (deferred_tx, deferred) = mpsc::unbounded_channel();

        let mounted = Arc::new_cyclic(|this: &Weak<Mounted>| {
            let target: Weak<dyn Refresh> = this.clone();
            let triggers = config
                .trigger_element_ids()
                .map(|ids| triggers::bind(host.as_ref(), ids, this))
                .unwrap_or_default();

            Mounted {
                target_id: target_id.to_string(),
                state: ClockState::new(),
                deferred_tx,
                core: Mutex::new(WidgetCore {
                    config,
                    style,
                    renderer,
                    time: TimeSource::new(clock),
                    scheduler: RefreshScheduler::new(target),
                    host,
                    this: this.clone(),
                    triggers,
                    deferred,
                }),
            }
        });

        info!(target_id, "clock mounted");
        let frozen = mounted.lock().config.frozen;
        if frozen {
            mounted.lock().tick(&mounted.state);
        } else {
            mounted.start();
        }

        Self {
            mounted: Some(mounted),
        }
    }

    fn inert() -> Self {
        Self { mounted: None }
    }

    /// Whether construction failed and the widget does nothing.
    pub fn is_inert(&self) -> bool {
        self.mounted.is_none()
    }

    /// Shows `instant`, or the time source's current instant when `None`.
    pub fn set_instant(&self, instant: Option<ClockInstant>) {
        let Some(mounted) = &self.mounted else {
            return;
        };

        let mut guard = mounted.lock();
        let core = &mut *guard;
        let instant = instant.unwrap_or_else(|| core.time.current_instant(&core.config));
        mounted.state.set(Some(instant));
        core.renderer.paint(&instant, &core.style);
    }

    /// Applies `overrides` and redraws.
    ///
    /// Setting `frozen` stops the clock. Supplying both trigger ids replaces
    /// any previous trigger bindings. The displayed instant is repainted under
    /// the new options; the refresh interval changes from the next tick on.
    #[instrument(skip_all)]
    pub fn set_configuration(&self, overrides: ConfigOverrides) {
        let Some(mounted) = &self.mounted else {
            return;
        };

        let mut guard = mounted.lock();
        let core = &mut *guard;
        core.apply(overrides);
        if core.config.frozen {
            core.scheduler.stop();
        }
        if let Some(instant) = mounted.state.get() {
            core.renderer.paint(&instant, &core.style);
        }
    }

    /// The displayed instant, if any.
    pub fn instant(&self) -> Option<ClockInstant> {
        self.mounted.as_ref().and_then(|mounted| mounted.state.get())
    }

    /// "HH:MM" of the displayed instant, or `None` before the first one.
    pub fn time_label(&self) -> Option<String> {
        self.mounted
            .as_ref()
            .and_then(|mounted| mounted.state.time_label())
    }

    /// Current configuration.
    pub fn configuration(&self) -> Option<ClockConfig> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.lock().config.clone())
    }

    /// Options resolved for `skin`, or for the active skin when `None`.
    pub fn resolved_skin(&self, skin: Option<&str>) -> Option<EffectiveStyle> {
        self.mounted
            .as_ref()
            .map(|mounted| mounted.lock().config.effective_style(skin))
    }

    /// Starts the clock with an immediate refresh.
    ///
    /// Returns `false` if it was already running, is frozen, or is inert.
    pub fn start(&self) -> bool {
        self.mounted.as_ref().is_some_and(|mounted| mounted.start())
    }

    /// Stops the clock. Returns `false` if it was not running.
    pub fn stop(&self) -> bool {
        self.mounted.as_ref().is_some_and(|mounted| mounted.stop())
    }

    /// Scheduler state.
    pub fn state(&self) -> SchedulerState {
        self.mounted
            .as_ref()
            .map_or(SchedulerState::Stopped, |mounted| {
                mounted.lock().scheduler.state()
            })
    }

    /// Whether the clock is running.
    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Stream of the displayed instant.
    ///
    /// Yields the current value first, then every change. Ends right away for
    /// an inert widget.
    pub fn watch_instant(&self) -> impl Stream<Item = Option<ClockInstant>> + Send + use<> {
        match &self.mounted {
            Some(mounted) => mounted.state.watch(),
            None => ClockState::new().watch(),
        }
    }

    /// Handle for changing options from inside surface callbacks.
    pub fn deferred_configuration(&self) -> DeferredConfiguration {
        match &self.mounted {
            Some(mounted) => DeferredConfiguration::new(mounted.deferred_tx.clone()),
            None => DeferredConfiguration::detached(),
        }
    }
}

impl Drop for ClockWidget {
    fn drop(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            let mut core = mounted.lock();
            core.scheduler.stop();
            core.replace_triggers(Vec::new());
            debug!(target_id = %mounted.target_id, "clock torn down");
        }
    }
}

struct Mounted {
    target_id: String,
    state: ClockState,
    deferred_tx: mpsc::UnboundedSender<ConfigOverrides>,
    core: Mutex<WidgetCore>,
}

impl Mounted {
    fn lock(&self) -> MutexGuard<'_, WidgetCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start(&self) -> bool {
        let mut core = self.lock();
        if core.scheduler.state() == SchedulerState::Running {
            return false;
        }

        core.apply_deferred();
        if core.config.frozen {
            debug!(target_id = %self.target_id, "clock is frozen, start ignored");
            return false;
        }

        core.tick(&self.state);
        let interval = refresh_interval(&core.style);
        core.scheduler.start(interval)
    }

    fn stop(&self) -> bool {
        self.lock().scheduler.stop()
    }
}

impl Refresh for Mounted {
    fn refresh(&self, run: &RunToken) -> Option<Duration> {
        let mut core = self.lock();
        if !run.is_active() {
            return None;
        }

        core.apply_deferred();
        if core.config.frozen {
            core.scheduler.stop();
            return None;
        }

        core.tick(&self.state);
        Some(refresh_interval(&core.style))
    }
}

struct WidgetCore {
    config: ClockConfig,
    style: EffectiveStyle,
    renderer: Renderer,
    time: TimeSource,
    scheduler: RefreshScheduler,
    host: Arc<dyn SurfaceHost>,
    this: Weak<Mounted>,
    triggers: Vec<JoinHandle<()>>,
    deferred: mpsc::UnboundedReceiver<ConfigOverrides>,
}

impl WidgetCore {
    /// Folds `overrides` in and lays the face out again. Supplying both
    /// trigger ids replaces the current bindings.
    fn apply(&mut self, overrides: ConfigOverrides) {
        let rebind = overrides.binds_triggers();
        self.config.apply(overrides);
        self.style = self.config.effective_style(None);
        self.renderer.relayout(&self.style);

        if rebind {
            let triggers = self
                .config
                .trigger_element_ids()
                .map(|ids| triggers::bind(self.host.as_ref(), ids, &self.this));
            if let Some(triggers) = triggers {
                self.replace_triggers(triggers);
            }
        }
    }

    fn apply_deferred(&mut self) {
        while let Ok(overrides) = self.deferred.try_recv() {
            self.apply(overrides);
        }
    }

    fn tick(&mut self, state: &ClockState) {
        let instant = self.time.current_instant(&self.config);
        state.set(Some(instant));
        self.renderer.paint(&instant, &self.style);
    }

    fn replace_triggers(&mut self, triggers: Vec<JoinHandle<()>>) {
        for old in std::mem::replace(&mut self.triggers, triggers) {
            old.abort();
        }
    }
}

impl Drop for WidgetCore {
    fn drop(&mut self) {
        self.replace_triggers(Vec::new());
    }
}
