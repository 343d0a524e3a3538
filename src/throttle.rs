//! Display refresh throttling
//!
//! Refreshes are gated on a minimum interval since the previous refresh
//! rather than on a frame count, so the refresh rate holds under variable
//! tick rates.

use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

pub const MIN_REFRESH_RATE_HZ: u32 = 1;
pub const MAX_REFRESH_RATE_HZ: u32 = 60;
pub const DEFAULT_REFRESH_RATE_HZ: u32 = 10;

/// Clamp a requested refresh rate into the supported range
pub fn clamp_refresh_rate(hz: u32) -> u32 {
    hz.clamp(MIN_REFRESH_RATE_HZ, MAX_REFRESH_RATE_HZ)
}

/// Monotonic time source, measured from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Which time the refresh gate measures against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThrottleBasis {
    /// The tracker's [`Clock`]
    #[default]
    WallClock,
    /// The sum of all deltas delivered to `advance`
    TickTime,
}

/// Minimum-interval gate between display refreshes.
#[derive(Debug, Clone)]
pub struct RefreshThrottle {
    rate_hz: u32,
    interval: Duration,
    last_refresh: Option<Duration>,
}

impl RefreshThrottle {
    pub fn new(rate_hz: u32) -> Self {
        let rate_hz = clamp_refresh_rate(rate_hz);
        Self {
            rate_hz,
            interval: Self::interval_for(rate_hz),
            last_refresh: None,
        }
    }

    fn interval_for(rate_hz: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(rate_hz))
    }

    pub fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the rate. Returns the clamped rate actually applied.
    pub fn set_rate(&mut self, rate_hz: u32) -> u32 {
        self.rate_hz = clamp_refresh_rate(rate_hz);
        self.interval = Self::interval_for(self.rate_hz);
        self.rate_hz
    }

    /// Whether a refresh at `now` is allowed. Always true before the first
    /// refresh.
    pub fn is_due(&self, now: Duration) -> bool {
        match self.last_refresh {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.interval,
        }
    }

    /// Record that a refresh happened at `now`
    pub fn mark(&mut self, now: Duration) {
        self.last_refresh = Some(now);
    }

    /// Forget the last refresh so the next check is due immediately
    pub fn reset(&mut self) {
        self.last_refresh = None;
    }
}

impl Default for RefreshThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_RATE_HZ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_rate_into_range() {
        assert_eq!(RefreshThrottle::new(0).rate_hz(), 1);
        assert_eq!(RefreshThrottle::new(240).rate_hz(), 60);
        assert_eq!(RefreshThrottle::default().interval(), Duration::from_millis(100));
    }

    #[test]
    fn gates_on_minimum_interval() {
        let mut throttle = RefreshThrottle::new(10);
        assert!(throttle.is_due(Duration::ZERO));
        throttle.mark(Duration::ZERO);

        assert!(!throttle.is_due(Duration::from_millis(99)));
        assert!(throttle.is_due(Duration::from_millis(100)));

        throttle.reset();
        assert!(throttle.is_due(Duration::from_millis(1)));
    }

    #[test]
    fn set_rate_changes_interval() {
        let mut throttle = RefreshThrottle::new(10);
        assert_eq!(throttle.set_rate(50), 50);
        assert_eq!(throttle.interval(), Duration::from_millis(20));
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(250));
    }
}
