//! Error types for the timer library

use thiserror::Error;

/// Errors surfaced by the tracker and its configuration helpers.
///
/// Invalid numeric input (negative deltas, negative times) is never an error;
/// it is clamped where it enters the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("No display sink supplied; tick processing is disabled")]
    MissingDisplaySink,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Unknown display format: {0}")]
    UnknownFormat(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}
