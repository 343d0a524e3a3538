//! Control surface module
//!
//! Textual commands a host can feed to a tracker, the equivalent of UI
//! buttons wired to tracker operations.

pub mod commands;

pub use commands::{ControlCommand, ControlOutcome};
