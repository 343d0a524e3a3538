//! Tracker configuration

use serde::{Deserialize, Serialize};

use crate::{
    display::Color,
    format::DisplayFormat,
    throttle::{ThrottleBasis, DEFAULT_REFRESH_RATE_HZ},
};

/// Options applied when a tracker is attached. All of them can be changed
/// on the tracker afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub format: DisplayFormat,
    /// Display refresh rate, clamped to 1..=60 Hz
    pub refresh_rate_hz: u32,
    /// Start running as soon as the tracker is attached
    pub auto_start: bool,
    pub running_color: Color,
    pub paused_color: Color,
    pub throttle_basis: ThrottleBasis,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            format: DisplayFormat::default(),
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            auto_start: false,
            running_color: Color::WHITE,
            paused_color: Color::YELLOW,
            throttle_basis: ThrottleBasis::default(),
        }
    }
}
