//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{
    display::Color,
    format::DisplayFormat,
    tasks::FrameLoopOptions,
    throttle::{ThrottleBasis, DEFAULT_REFRESH_RATE_HZ},
    tracker::TrackerConfig,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "frame-timer")]
#[command(about = "A frame-driven count-up timer with a throttled terminal display")]
#[command(version)]
pub struct Config {
    /// Display format: seconds, minutes-seconds, hours-minutes-seconds,
    /// hours-minutes-seconds-millis
    #[arg(short, long, default_value = "minutes-seconds")]
    pub format: DisplayFormat,

    /// Display refresh rate in Hz (clamped to 1-60)
    #[arg(short, long, default_value_t = DEFAULT_REFRESH_RATE_HZ)]
    pub refresh_rate: u32,

    /// Frames per second delivered to the timer (clamped to 1-1000)
    #[arg(long, default_value_t = 60)]
    pub frame_rate: u32,

    /// Start the timer immediately
    #[arg(short, long)]
    pub auto_start: bool,

    /// Display color while running (#RRGGBB or #RRGGBBAA)
    #[arg(long, default_value = "#FFFFFF")]
    pub running_color: Color,

    /// Display color while paused (#RRGGBB or #RRGGBBAA)
    #[arg(long, default_value = "#FFEB04")]
    pub paused_color: Color,

    /// Throttle refreshes on accumulated tick time instead of the wall clock
    #[arg(long)]
    pub tick_time: bool,

    /// Exit after this many seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Tracker options selected on the command line
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            format: self.format,
            refresh_rate_hz: self.refresh_rate,
            auto_start: self.auto_start,
            running_color: self.running_color,
            paused_color: self.paused_color,
            throttle_basis: if self.tick_time {
                ThrottleBasis::TickTime
            } else {
                ThrottleBasis::WallClock
            },
        }
    }

    /// Frame loop options; a non-positive or invalid duration means no limit
    pub fn frame_loop_options(&self) -> FrameLoopOptions {
        FrameLoopOptions {
            frame_rate: self.frame_rate,
            run_for: self
                .duration
                .filter(|secs| *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["frame-timer"]).unwrap();
        assert_eq!(config.tracker_config(), TrackerConfig::default());
        assert_eq!(config.frame_loop_options().frame_rate, 60);
        assert_eq!(config.frame_loop_options().run_for, None);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn parses_all_options() {
        let config = Config::try_parse_from([
            "frame-timer",
            "--format",
            "hms",
            "-r",
            "30",
            "--frame-rate",
            "144",
            "--auto-start",
            "--running-color",
            "#00FF00",
            "--tick-time",
            "-d",
            "2.5",
            "-v",
        ])
        .unwrap();

        let tracker = config.tracker_config();
        assert_eq!(tracker.format, DisplayFormat::HoursMinutesSeconds);
        assert_eq!(tracker.refresh_rate_hz, 30);
        assert!(tracker.auto_start);
        assert_eq!(tracker.running_color, Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(tracker.throttle_basis, ThrottleBasis::TickTime);

        let options = config.frame_loop_options();
        assert_eq!(options.frame_rate, 144);
        assert_eq!(options.run_for, Some(Duration::from_millis(2500)));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::try_parse_from(["frame-timer", "--format", "days"]).is_err());
        assert!(Config::try_parse_from(["frame-timer", "--paused-color", "yellow"]).is_err());
    }
}
