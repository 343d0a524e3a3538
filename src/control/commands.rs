//! Control command parsing and dispatch

use std::str::FromStr;

use tracing::info;

use crate::{
    error::TrackerError,
    format::DisplayFormat,
    state::TimerSnapshot,
    tracker::ElapsedTimeTracker,
};

/// One line of host input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    Start,
    Pause,
    Resume,
    Toggle,
    Stop,
    Reset,
    Restart,
    Set(f64),
    Add(f64),
    Format(DisplayFormat),
    Rate(u32),
    Status,
    Quit,
}

/// What the host loop should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    Continue,
    Status(TimerSnapshot),
    Quit,
}

impl FromStr for ControlCommand {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackerError::InvalidCommand(s.trim().to_string());

        let mut parts = s.split_whitespace();
        let name = parts.next().ok_or_else(invalid)?.to_ascii_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        let seconds = |arg: Option<&str>| -> Result<f64, TrackerError> {
            arg.and_then(|a| a.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(invalid)
        };

        let command = match (name.as_str(), arg) {
            ("start", None) => ControlCommand::Start,
            ("pause", None) => ControlCommand::Pause,
            ("resume", None) => ControlCommand::Resume,
            ("toggle", None) => ControlCommand::Toggle,
            ("stop", None) => ControlCommand::Stop,
            ("reset", None) => ControlCommand::Reset,
            ("restart", None) => ControlCommand::Restart,
            ("status", None) => ControlCommand::Status,
            ("quit" | "exit", None) => ControlCommand::Quit,
            ("set", Some(_)) => ControlCommand::Set(seconds(arg)?),
            ("add", Some(_)) => ControlCommand::Add(seconds(arg)?),
            ("format", Some(f)) => ControlCommand::Format(f.parse()?),
            ("rate", Some(r)) => ControlCommand::Rate(r.parse().map_err(|_| invalid())?),
            _ => return Err(invalid()),
        };
        Ok(command)
    }
}

impl ControlCommand {
    /// Apply the command to a tracker
    pub fn apply(self, tracker: &mut ElapsedTimeTracker) -> ControlOutcome {
        match self {
            ControlCommand::Start => tracker.start(),
            ControlCommand::Pause => tracker.pause(),
            ControlCommand::Resume => tracker.resume(),
            ControlCommand::Toggle => tracker.toggle_pause(),
            ControlCommand::Stop => tracker.stop(),
            ControlCommand::Reset => tracker.reset(),
            ControlCommand::Restart => tracker.restart(),
            ControlCommand::Set(seconds) => tracker.set_time(seconds),
            ControlCommand::Add(seconds) => tracker.add_time(seconds),
            ControlCommand::Format(format) => tracker.set_format(format),
            ControlCommand::Rate(hz) => {
                let applied = tracker.set_refresh_rate(hz);
                if applied != hz {
                    info!("Refresh rate {}Hz out of range, using {}Hz", hz, applied);
                }
            }
            ControlCommand::Status => return ControlOutcome::Status(tracker.snapshot()),
            ControlCommand::Quit => return ControlOutcome::Quit,
        }
        ControlOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{display::MemorySink, state::TimerPhase, tracker::TrackerConfig};

    #[test]
    fn parses_commands() {
        assert_eq!("start".parse::<ControlCommand>(), Ok(ControlCommand::Start));
        assert_eq!("  Toggle ".parse::<ControlCommand>(), Ok(ControlCommand::Toggle));
        assert_eq!("exit".parse::<ControlCommand>(), Ok(ControlCommand::Quit));
        assert_eq!("set 12.5".parse::<ControlCommand>(), Ok(ControlCommand::Set(12.5)));
        assert_eq!("add -3".parse::<ControlCommand>(), Ok(ControlCommand::Add(-3.0)));
        assert_eq!(
            "format hms".parse::<ControlCommand>(),
            Ok(ControlCommand::Format(DisplayFormat::HoursMinutesSeconds))
        );
        assert_eq!("rate 30".parse::<ControlCommand>(), Ok(ControlCommand::Rate(30)));
    }

    #[test]
    fn rejects_malformed_commands() {
        for bad in ["", "jump", "start now", "set", "set abc", "set nan", "rate -1", "add 1 2"] {
            assert!(bad.parse::<ControlCommand>().is_err(), "{bad:?} should not parse");
        }
        assert_eq!(
            "format weeks".parse::<ControlCommand>(),
            Err(TrackerError::UnknownFormat("weeks".to_string()))
        );
    }

    #[test]
    fn applies_to_tracker() {
        let mut tracker = ElapsedTimeTracker::new(TrackerConfig::default(), MemorySink::new());

        for line in ["start", "add 90", "pause"] {
            let command: ControlCommand = line.parse().unwrap();
            assert_eq!(command.apply(&mut tracker), ControlOutcome::Continue);
        }

        match ControlCommand::Status.apply(&mut tracker) {
            ControlOutcome::Status(snapshot) => {
                assert_eq!(snapshot.phase, TimerPhase::Paused);
                assert_eq!(snapshot.display.as_deref(), Some("1:30.00"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(ControlCommand::Quit.apply(&mut tracker), ControlOutcome::Quit);
    }
}
