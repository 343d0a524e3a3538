//! Fixed-rate frame loop driving a tracker

use std::time::Duration;

use tokio::{
    sync::mpsc,
    time::{interval, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    control::{ControlCommand, ControlOutcome},
    tracker::ElapsedTimeTracker,
};

pub const MIN_FRAME_RATE: u32 = 1;
pub const MAX_FRAME_RATE: u32 = 1_000;

/// Clamp a requested frame rate into the supported range
pub fn clamp_frame_rate(fps: u32) -> u32 {
    fps.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE)
}

/// Frame loop settings
#[derive(Debug, Clone, Copy)]
pub struct FrameLoopOptions {
    /// Ticks per second delivered to the tracker, clamped to 1..=1000
    pub frame_rate: u32,
    /// Stop after this much loop time, if set
    pub run_for: Option<Duration>,
}

impl Default for FrameLoopOptions {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            run_for: None,
        }
    }
}

/// Why the frame loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLoopExit {
    Quit,
    TimeLimit,
}

/// Tick `tracker` at `options.frame_rate`, applying commands as they arrive.
///
/// Each tick passes the measured time since the previous tick, so a late
/// frame carries a larger delta. When the command channel closes the loop
/// keeps ticking until a quit command or the time limit.
pub async fn run_frame_loop(
    tracker: &mut ElapsedTimeTracker,
    commands: &mut mpsc::Receiver<String>,
    options: FrameLoopOptions,
) -> FrameLoopExit {
    let frame_rate = clamp_frame_rate(options.frame_rate);
    let mut frames = interval(Duration::from_nanos(1_000_000_000 / u64::from(frame_rate)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let started = Instant::now();
    let mut last_frame = started;
    let mut commands_open = true;

    info!("Frame loop running at {} fps", frame_rate);

    loop {
        tokio::select! {
            _ = frames.tick() => {
                let now = Instant::now();
                tracker.advance(now.duration_since(last_frame).as_secs_f64());
                last_frame = now;

                if let Some(limit) = options.run_for {
                    if now.duration_since(started) >= limit {
                        info!("Run time limit of {:?} reached", limit);
                        return FrameLoopExit::TimeLimit;
                    }
                }
            }

            line = commands.recv(), if commands_open => {
                let Some(line) = line else {
                    debug!("Command input closed");
                    commands_open = false;
                    continue;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<ControlCommand>() {
                    Ok(command) => match command.apply(tracker) {
                        ControlOutcome::Continue => {}
                        ControlOutcome::Status(snapshot) => match serde_json::to_string(&snapshot) {
                            Ok(json) => info!("Status: {}", json),
                            Err(e) => warn!("Failed to serialize status: {}", e),
                        },
                        ControlOutcome::Quit => {
                            info!("Quit command received");
                            return FrameLoopExit::Quit;
                        }
                    },
                    Err(e) => warn!("{}", e),
                }
            }
        }
    }
}
