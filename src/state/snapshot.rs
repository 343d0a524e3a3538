//! Serializable point-in-time view of a tracker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimerPhase;
use crate::format::DisplayFormat;

/// Snapshot of a tracker, for status output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub elapsed_seconds: f64,
    /// Formatted value; `None` when the tracker has no display sink
    pub display: Option<String>,
    pub format: DisplayFormat,
    pub refresh_rate_hz: u32,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}
