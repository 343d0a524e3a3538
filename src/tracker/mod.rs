//! Elapsed-time tracking
//!
//! [`ElapsedTimeTracker`] owns a [`TimerState`](crate::state::TimerState),
//! advances it on host ticks, and renders it into a display sink at a
//! throttled rate.

pub mod elapsed_tracker;
pub mod settings;

pub use elapsed_tracker::ElapsedTimeTracker;
pub use settings::TrackerConfig;
