//! RGBA colors used for the running and paused display styles

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Linear RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 235.0 / 255.0, 4.0 / 255.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, TrackerError> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(TrackerError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| TrackerError::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Components scaled to 8-bit, ignoring alpha
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (scale(self.r), scale(self.g), scale(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.to_rgb8();
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}
