//! Frame Timer - a count-up timer driven by host frame ticks
//!
//! [`ElapsedTimeTracker`] keeps an elapsed-time value under a
//! start/pause/resume/stop/reset state machine, advances it on each tick the
//! host delivers, and renders it into a [`DisplaySink`] in one of four
//! [`DisplayFormat`]s at a throttled refresh rate. State changes and
//! refreshes are broadcast to registered listeners as [`TimerEvent`]s.

pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod events;
pub mod format;
pub mod state;
pub mod tasks;
pub mod throttle;
pub mod tracker;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use display::{Color, DisplaySink};
pub use error::TrackerError;
pub use events::{ListenerId, TimerEvent};
pub use format::{format_elapsed, DisplayFormat};
pub use state::{TimerPhase, TimerSnapshot};
pub use tracker::{ElapsedTimeTracker, TrackerConfig};
pub use utils::signals::shutdown_signal;
