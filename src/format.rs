//! Display formats and elapsed-time rendering

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// How an elapsed value is rendered. Does not affect the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayFormat {
    /// `123.45`
    Seconds,
    /// `2:03.45`
    #[default]
    MinutesSeconds,
    /// `01:02:03`
    HoursMinutesSeconds,
    /// `01:02:03.456`
    HoursMinutesSecondsMillis,
}

impl DisplayFormat {
    pub const ALL: [DisplayFormat; 4] = [
        DisplayFormat::Seconds,
        DisplayFormat::MinutesSeconds,
        DisplayFormat::HoursMinutesSeconds,
        DisplayFormat::HoursMinutesSecondsMillis,
    ];

    /// Canonical name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            DisplayFormat::Seconds => "seconds",
            DisplayFormat::MinutesSeconds => "minutes-seconds",
            DisplayFormat::HoursMinutesSeconds => "hours-minutes-seconds",
            DisplayFormat::HoursMinutesSecondsMillis => "hours-minutes-seconds-millis",
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DisplayFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seconds" | "s" => Ok(DisplayFormat::Seconds),
            "minutes-seconds" | "ms" | "m:s" => Ok(DisplayFormat::MinutesSeconds),
            "hours-minutes-seconds" | "hms" | "h:m:s" => Ok(DisplayFormat::HoursMinutesSeconds),
            "hours-minutes-seconds-millis" | "hmsm" | "h:m:s.ms" => {
                Ok(DisplayFormat::HoursMinutesSecondsMillis)
            }
            _ => Err(TrackerError::UnknownFormat(s.to_string())),
        }
    }
}

/// Scale seconds to whole units of `10^-digits` seconds, truncating.
///
/// Works on the shortest round-trip decimal text of the value, so `123.45`
/// yields 12345 centiseconds (not 12344) while `59.999999` stays below 6000.
fn truncate_scaled(elapsed: f64, digits: usize) -> u64 {
    // Also maps -0.0 to 0.0, whose text would not parse as u64
    let elapsed = if elapsed.is_finite() && elapsed > 0.0 { elapsed } else { 0.0 };
    // f64 `Display` never uses exponent notation
    let text = elapsed.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let whole: u64 = whole.parse().unwrap_or(u64::MAX);
    let fraction: u64 = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(digits)
        .fold(0, |acc, c| acc * 10 + u64::from(c.to_digit(10).unwrap_or(0)));

    whole
        .saturating_mul(10u64.pow(digits as u32))
        .saturating_add(fraction)
}

/// Render `elapsed` seconds in the given format.
///
/// Every component is truncated, never rounded: `59.999` in
/// [`DisplayFormat::Seconds`] renders as `59.99`. Negative and non-finite
/// input renders as zero.
pub fn format_elapsed(elapsed: f64, format: DisplayFormat) -> String {
    match format {
        DisplayFormat::Seconds => {
            let centis = truncate_scaled(elapsed, 2);
            format!("{}.{:02}", centis / 100, centis % 100)
        }
        DisplayFormat::MinutesSeconds => {
            let centis = truncate_scaled(elapsed, 2);
            let minutes = centis / 6_000;
            let rem = centis % 6_000;
            format!("{}:{:02}.{:02}", minutes, rem / 100, rem % 100)
        }
        DisplayFormat::HoursMinutesSeconds => {
            let total = truncate_scaled(elapsed, 3) / 1_000;
            format!("{:02}:{:02}:{:02}", total / 3_600, (total % 3_600) / 60, total % 60)
        }
        DisplayFormat::HoursMinutesSecondsMillis => {
            let millis = truncate_scaled(elapsed, 3);
            let total = millis / 1_000;
            format!(
                "{:02}:{:02}:{:02}.{:03}",
                total / 3_600,
                (total % 3_600) / 60,
                total % 60,
                millis % 1_000
            )
        }
    }
}
