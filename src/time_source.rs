//! Where the clock gets its time from.
//!
//! A [`WallClock`] reports the local wall-clock time together with its UTC
//! offset. [`TimeSource`] turns that into the instant the clock displays,
//! either as local time or shifted to UTC plus a fixed offset.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta};
use tracing::warn;

use crate::config::ClockConfig;

/// The date and time shown by the clock, in its own wall-clock frame.
pub type ClockInstant = NaiveDateTime;

/// Capability that reports the current local time.
pub trait WallClock: Send + Sync {
    /// Local time, carrying the UTC offset in effect at this moment.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The operating system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that reports a settable time.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    /// A clock stopped at `now`.
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(next) = now.checked_add_signed(delta) {
            *now = next;
        }
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Produces the instant the clock should display.
#[derive(Clone)]
pub struct TimeSource {
    clock: Arc<dyn WallClock>,
}

impl fmt::Debug for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeSource")
            .field("now", &self.clock.now())
            .finish()
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl TimeSource {
    /// A time source reading from `clock`.
    pub fn new(clock: Arc<dyn WallClock>) -> Self {
        Self { clock }
    }

    /// The instant to display under `config`.
    ///
    /// Without offset mode this is the local wall-clock time. With offset mode
    /// the local time is shifted by `offset_minutes` plus the local timezone
    /// offset (minutes to add to local time to reach UTC), which yields UTC
    /// plus `offset_minutes`. The timezone offset is read on every call so DST
    /// transitions are picked up.
    pub fn current_instant(&self, config: &ClockConfig) -> ClockInstant {
        let now = self.clock.now();
        let local = now.naive_local();
        if !config.use_offset {
            return local;
        }

        let shift = i64::from(config.offset_minutes) + local_timezone_offset_minutes(&now);
        match local.checked_add_signed(TimeDelta::minutes(shift)) {
            Some(shifted) => shifted,
            None => {
                warn!(shift, "offset moves the clock out of range, showing local time");
                local
            }
        }
    }
}

/// Minutes to add to local time to reach UTC.
///
/// Negative east of Greenwich: UTC+2 yields -120.
pub fn local_timezone_offset_minutes(now: &DateTime<FixedOffset>) -> i64 {
    -i64::from(now.offset().local_minus_utc()) / 60
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn at(offset_hours: i32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 10, hour, minute, 30)
            .unwrap()
    }

    fn source(now: DateTime<FixedOffset>) -> TimeSource {
        TimeSource::new(Arc::new(FixedClock::new(now)))
    }

    fn naive(hour: u32, minute: u32) -> ClockInstant {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 30)
            .unwrap()
    }

    #[test]
    fn local_mode_returns_wall_clock() {
        let config = ClockConfig::default();

        assert_eq!(source(at(2, 12, 0)).current_instant(&config), naive(12, 0));
    }

    #[test]
    fn offset_mode_adds_offset_and_timezone_offset() {
        let config = ClockConfig {
            use_offset: true,
            offset_minutes: 120,
            ..Default::default()
        };
        let now = at(2, 12, 0);
        let tz_offset = local_timezone_offset_minutes(&now);
        assert_eq!(tz_offset, -120);

        let expected = now.naive_local() + TimeDelta::minutes(120 + tz_offset);

        assert_eq!(source(now).current_instant(&config), expected);
        assert_eq!(source(now).current_instant(&config), naive(12, 0));
    }

    #[test]
    fn offset_mode_west_of_utc() {
        let config = ClockConfig {
            use_offset: true,
            offset_minutes: 0,
            ..Default::default()
        };

        assert_eq!(source(at(-5, 7, 15)).current_instant(&config), naive(12, 15));
    }

    #[test]
    fn offset_is_recomputed_on_every_call() {
        let config = ClockConfig {
            use_offset: true,
            offset_minutes: 60,
            ..Default::default()
        };
        let clock = Arc::new(FixedClock::new(at(1, 1, 0)));
        let source = TimeSource::new(clock.clone());

        assert_eq!(source.current_instant(&config), naive(1, 0));

        clock.set(at(2, 3, 0));
        assert_eq!(source.current_instant(&config), naive(2, 0));
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(at(0, 10, 0));
        clock.advance(TimeDelta::seconds(90));

        assert_eq!(clock.now(), at(0, 10, 1) + TimeDelta::seconds(30));
    }
}
