//! State management module
//!
//! Timer data, its run phases, and the snapshot used for status output.

pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use snapshot::TimerSnapshot;
pub use timer_state::{TimerPhase, TimerState};
