//! Timer state structure and transitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{events::TimerEvent, format::DisplayFormat};

/// Derived run state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        })
    }
}

/// Clamp to a finite, non-negative number of seconds
fn non_negative(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

/// Sum that saturates at `f64::MAX` instead of overflowing to infinity
fn saturating_sum(elapsed: f64, delta: f64) -> f64 {
    (elapsed + delta).min(f64::MAX)
}

/// Elapsed time plus the running/paused flags.
///
/// Keeps `elapsed >= 0` and `paused => running`. Transition methods return
/// the event to raise, or `None` when the call was a no-op in the current
/// phase.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    elapsed: f64,
    running: bool,
    paused: bool,
    format: DisplayFormat,
}

impl TimerState {
    /// Create an idle timer at zero
    pub fn new(format: DisplayFormat) -> Self {
        Self {
            elapsed: 0.0,
            running: false,
            paused: false,
            format,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        match (self.running, self.paused) {
            (false, _) => TimerPhase::Idle,
            (true, false) => TimerPhase::Running,
            (true, true) => TimerPhase::Paused,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    pub fn set_format(&mut self, format: DisplayFormat) {
        self.format = format;
    }

    /// Overwrite the elapsed time, clamping negatives to zero
    pub fn set_elapsed(&mut self, seconds: f64) {
        self.elapsed = non_negative(seconds);
    }

    /// Add a positive or negative delta, clamping the result to zero
    pub fn add_elapsed(&mut self, delta: f64) {
        let delta = if delta.is_finite() { delta } else { 0.0 };
        self.elapsed = non_negative(saturating_sum(self.elapsed, delta));
    }

    /// Accumulate a tick. Returns true if the time was counted.
    pub fn accumulate(&mut self, delta: f64) -> bool {
        if self.phase() != TimerPhase::Running {
            return false;
        }
        self.elapsed = saturating_sum(self.elapsed, non_negative(delta));
        true
    }

    /// Idle -> Running, or Paused -> Running
    pub fn start(&mut self) -> Option<TimerEvent> {
        match self.phase() {
            TimerPhase::Idle => {
                self.running = true;
                Some(TimerEvent::Started)
            }
            TimerPhase::Paused => self.resume(),
            TimerPhase::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        if self.phase() != TimerPhase::Running {
            return None;
        }
        self.paused = true;
        Some(TimerEvent::Paused)
    }

    pub fn resume(&mut self) -> Option<TimerEvent> {
        if self.phase() != TimerPhase::Paused {
            return None;
        }
        self.paused = false;
        Some(TimerEvent::Resumed)
    }

    /// Stop without clearing the elapsed time
    pub fn stop(&mut self) -> Option<TimerEvent> {
        if self.phase() == TimerPhase::Idle {
            return None;
        }
        self.running = false;
        self.paused = false;
        Some(TimerEvent::Stopped)
    }

    /// Back to idle at zero, from any phase
    pub fn reset(&mut self) -> TimerEvent {
        self.elapsed = 0.0;
        self.running = false;
        self.paused = false;
        TimerEvent::Reset
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DisplayFormat::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_at_zero() {
        let state = TimerState::default();
        assert_eq!(state.phase(), TimerPhase::Idle);
        assert_eq!(state.elapsed(), 0.0);
        assert_eq!(state.format(), DisplayFormat::MinutesSeconds);
    }

    #[test]
    fn transition_table() {
        let mut state = TimerState::default();
        assert_eq!(state.pause(), None);
        assert_eq!(state.resume(), None);
        assert_eq!(state.stop(), None);

        assert_eq!(state.start(), Some(TimerEvent::Started));
        assert_eq!(state.start(), None);
        assert_eq!(state.resume(), None);

        assert_eq!(state.pause(), Some(TimerEvent::Paused));
        assert_eq!(state.pause(), None);
        assert!(state.is_running() && state.is_paused());

        assert_eq!(state.start(), Some(TimerEvent::Resumed));
        assert_eq!(state.phase(), TimerPhase::Running);

        state.pause();
        assert_eq!(state.stop(), Some(TimerEvent::Stopped));
        assert!(!state.is_running() && !state.is_paused());
    }

    #[test]
    fn accumulates_only_while_running() {
        let mut state = TimerState::default();
        assert!(!state.accumulate(1.0));

        state.start();
        assert!(state.accumulate(1.5));
        assert!(state.accumulate(-3.0));
        state.pause();
        assert!(!state.accumulate(4.0));

        assert_eq!(state.elapsed(), 1.5);
    }

    #[test]
    fn mutation_never_goes_negative() {
        let mut state = TimerState::default();
        state.set_elapsed(-10.0);
        assert_eq!(state.elapsed(), 0.0);

        state.set_elapsed(3.0);
        state.add_elapsed(-5.0);
        assert_eq!(state.elapsed(), 0.0);

        state.add_elapsed(f64::NAN);
        state.set_elapsed(f64::INFINITY);
        assert_eq!(state.elapsed(), 0.0);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let mut state = TimerState::default();
        state.start();
        state.set_elapsed(f64::MAX);
        assert!(state.accumulate(f64::MAX));
        assert_eq!(state.elapsed(), f64::MAX);

        state.add_elapsed(f64::MAX);
        assert_eq!(state.elapsed(), f64::MAX);

        state.add_elapsed(-f64::MAX);
        assert_eq!(state.elapsed(), 0.0);
    }

    #[test]
    fn reset_from_any_phase() {
        let mut state = TimerState::default();
        state.start();
        state.accumulate(9.0);
        state.pause();

        assert_eq!(state.reset(), TimerEvent::Reset);
        assert_eq!(state.phase(), TimerPhase::Idle);
        assert_eq!(state.elapsed(), 0.0);
    }
}
