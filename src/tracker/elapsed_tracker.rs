//! The elapsed-time tracker component

use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, trace};

use super::TrackerConfig;
use crate::{
    display::{Color, DisplaySink},
    error::TrackerError,
    events::{ListenerId, ListenerRegistry, TimerEvent},
    format::{format_elapsed, DisplayFormat},
    state::{TimerPhase, TimerSnapshot, TimerState},
    throttle::{Clock, RefreshThrottle, SystemClock, ThrottleBasis},
};

/// Count-up timer driven by host ticks.
///
/// The host calls [`advance`](Self::advance) once per frame. While running,
/// each tick adds its delta to the elapsed time; at most `refresh_rate_hz`
/// times per second the value is formatted, written to the display sink, and
/// broadcast as [`TimerEvent::Updated`].
///
/// A tracker attached without a display sink records
/// [`TrackerError::MissingDisplaySink`], ignores ticks, and never renders.
/// Transitions and their events still work.
pub struct ElapsedTimeTracker {
    state: TimerState,
    sink: Option<Box<dyn DisplaySink>>,
    running_color: Color,
    paused_color: Color,
    throttle: RefreshThrottle,
    throttle_basis: ThrottleBasis,
    clock: Box<dyn Clock>,
    /// Sum of all deltas delivered to `advance`, for `ThrottleBasis::TickTime`
    tick_time: Duration,
    listeners: ListenerRegistry,
    config_error: Option<TrackerError>,
    last_action: Option<(&'static str, DateTime<Utc>)>,
}

impl ElapsedTimeTracker {
    /// Attach a tracker rendering into `sink`
    pub fn new<S>(config: TrackerConfig, sink: S) -> Self
    where
        S: DisplaySink + 'static,
    {
        Self::attach(config, Some(Box::new(sink)))
    }

    /// Attach a tracker with an optional sink, measuring refresh intervals on
    /// the system clock.
    pub fn attach(config: TrackerConfig, sink: Option<Box<dyn DisplaySink>>) -> Self {
        Self::attach_with_clock(config, sink, SystemClock::new())
    }

    /// Attach a tracker with an explicit refresh clock.
    ///
    /// Starts immediately when `config.auto_start` is set and a sink is
    /// present.
    pub fn attach_with_clock<C>(
        config: TrackerConfig,
        sink: Option<Box<dyn DisplaySink>>,
        clock: C,
    ) -> Self
    where
        C: Clock + 'static,
    {
        let config_error = if sink.is_none() {
            let err = TrackerError::MissingDisplaySink;
            error!("Timer configuration error: {}", err);
            Some(err)
        } else {
            None
        };

        let mut tracker = Self {
            state: TimerState::new(config.format),
            sink,
            running_color: config.running_color,
            paused_color: config.paused_color,
            throttle: RefreshThrottle::new(config.refresh_rate_hz),
            throttle_basis: config.throttle_basis,
            clock: Box::new(clock),
            tick_time: Duration::ZERO,
            listeners: ListenerRegistry::new(),
            config_error,
            last_action: None,
        };

        info!(
            "Timer attached: format={}, refresh_rate={}Hz, auto_start={}",
            config.format,
            tracker.throttle.rate_hz(),
            config.auto_start
        );

        tracker.render();
        if config.auto_start && tracker.is_enabled() {
            tracker.start();
        }
        tracker
    }

    /// Clear all listener registrations. The tracker stays usable.
    pub fn detach(&mut self) {
        let removed = self.listeners.clear();
        info!("Timer detached, {} listener(s) removed", removed);
    }

    /// False when the tracker was attached without a display sink
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn configuration_error(&self) -> Option<&TrackerError> {
        self.config_error.as_ref()
    }

    // --- transitions ---

    /// Start from idle, or resume when paused
    pub fn start(&mut self) {
        let event = self.state.start();
        self.apply("start", event);
    }

    pub fn pause(&mut self) {
        let event = self.state.pause();
        self.apply("pause", event);
    }

    pub fn resume(&mut self) {
        let event = self.state.resume();
        self.apply("resume", event);
    }

    /// Resume if paused, otherwise pause
    pub fn toggle_pause(&mut self) {
        if self.state.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Stop running, keeping the elapsed time
    pub fn stop(&mut self) {
        let event = self.state.stop();
        self.apply("stop", event);
    }

    /// Zero the elapsed time and return to idle
    pub fn reset(&mut self) {
        let event = self.state.reset();
        self.throttle.reset();
        self.apply("reset", Some(event));
    }

    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    fn apply(&mut self, action: &'static str, event: Option<TimerEvent>) {
        let Some(event) = event else {
            debug!("Ignoring {} while {}", action, self.state.phase());
            return;
        };

        self.last_action = Some((action, Utc::now()));
        info!("Timer {} at {:.3}s", event.name(), self.state.elapsed());

        self.render();
        self.listeners.dispatch(&event);
    }

    // --- time ---

    /// Advance by one host tick of `delta_seconds`.
    ///
    /// Only counted while running. Negative or non-finite deltas count as
    /// zero.
    pub fn advance(&mut self, delta_seconds: f64) {
        if !self.is_enabled() {
            return;
        }

        let delta = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };
        self.tick_time = self
            .tick_time
            .saturating_add(Duration::try_from_secs_f64(delta).unwrap_or(Duration::MAX));

        if !self.state.accumulate(delta) {
            return;
        }

        let now = self.now();
        if self.throttle.is_due(now) {
            self.refresh(now);
        } else {
            trace!("Refresh throttled at {:.3}s", self.state.elapsed());
        }
    }

    /// Overwrite the elapsed time (clamped to zero) and refresh the display
    pub fn set_time(&mut self, seconds: f64) {
        self.state.set_elapsed(seconds);
        self.last_action = Some(("set_time", Utc::now()));
        debug!("Timer set to {:.3}s", self.state.elapsed());
        self.force_refresh();
    }

    /// Add a positive or negative delta (result clamped to zero) and refresh
    /// the display
    pub fn add_time(&mut self, delta_seconds: f64) {
        self.state.add_elapsed(delta_seconds);
        self.last_action = Some(("add_time", Utc::now()));
        debug!("Timer adjusted by {:.3}s to {:.3}s", delta_seconds, self.state.elapsed());
        self.force_refresh();
    }

    fn now(&self) -> Duration {
        match self.throttle_basis {
            ThrottleBasis::WallClock => self.clock.now(),
            ThrottleBasis::TickTime => self.tick_time,
        }
    }

    fn force_refresh(&mut self) {
        if self.is_enabled() {
            let now = self.now();
            self.refresh(now);
        }
    }

    fn refresh(&mut self, now: Duration) {
        self.throttle.mark(now);
        self.render();

        let elapsed = self.state.elapsed();
        self.listeners.dispatch(&TimerEvent::Updated { elapsed });
    }

    /// Write the formatted value and the phase color to the sink
    fn render(&mut self) {
        let color = self.current_color();
        let format = self.state.format();
        let elapsed = self.state.elapsed();

        if let Some(sink) = self.sink.as_mut() {
            sink.set_color(color);
            sink.set_text(&format_elapsed(elapsed, format));
        }
    }

    fn current_color(&self) -> Color {
        if self.state.is_paused() {
            self.paused_color
        } else {
            self.running_color
        }
    }

    // --- configuration ---

    pub fn set_format(&mut self, format: DisplayFormat) {
        self.state.set_format(format);
        debug!("Display format set to {}", format);
        self.render();
    }

    /// Change the refresh rate. Returns the clamped rate actually applied.
    pub fn set_refresh_rate(&mut self, rate_hz: u32) -> u32 {
        let applied = self.throttle.set_rate(rate_hz);
        debug!("Refresh rate set to {}Hz", applied);
        applied
    }

    pub fn set_colors(&mut self, running: Color, paused: Color) {
        self.running_color = running;
        self.paused_color = paused;
        self.render();
    }

    pub fn set_throttle_basis(&mut self, basis: ThrottleBasis) {
        self.throttle_basis = basis;
        self.throttle.reset();
    }

    // --- listeners ---

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&TimerEvent) + 'static,
    {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- queries ---

    pub fn elapsed(&self) -> f64 {
        self.state.elapsed()
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    pub fn format(&self) -> DisplayFormat {
        self.state.format()
    }

    pub fn refresh_rate(&self) -> u32 {
        self.throttle.rate_hz()
    }

    /// The current value as it would be displayed; `None` when disabled
    pub fn display_text(&self) -> Option<String> {
        self.is_enabled()
            .then(|| format_elapsed(self.state.elapsed(), self.state.format()))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.state.phase(),
            elapsed_seconds: self.state.elapsed(),
            display: self.display_text(),
            format: self.state.format(),
            refresh_rate_hz: self.throttle.rate_hz(),
            last_action: self.last_action.map(|(action, _)| action.to_string()),
            last_action_time: self.last_action.map(|(_, at)| at),
        }
    }
}

impl Drop for ElapsedTimeTracker {
    fn drop(&mut self) {
        self.listeners.clear();
    }
}

impl fmt::Debug for ElapsedTimeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElapsedTimeTracker")
            .field("state", &self.state)
            .field("enabled", &self.is_enabled())
            .field("throttle", &self.throttle)
            .field("throttle_basis", &self.throttle_basis)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}
