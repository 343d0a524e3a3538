//! Frame Timer - terminal host for the elapsed-time tracker
//!
//! Drives a tracker from a fixed-rate frame loop, draws it on one terminal
//! line, and reads control commands from stdin.

use tracing::{debug, info};

use frame_timer::{
    config::Config,
    display::TerminalSink,
    tasks::{run_frame_loop, spawn_stdin_reader, FrameLoopExit},
    tracker::ElapsedTimeTracker,
    utils::shutdown_signal,
    TimerEvent,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so the timer line on stdout stays intact
    tracing_subscriber::fmt()
        .with_env_filter(format!("frame_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting frame-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: format={}, refresh_rate={}Hz, frame_rate={}fps, auto_start={}",
        config.format, config.refresh_rate, config.frame_rate, config.auto_start
    );
    info!("Commands: start, pause, resume, toggle, stop, reset, restart,");
    info!("          set <s>, add <s>, format <name>, rate <hz>, status, quit");

    let mut tracker = ElapsedTimeTracker::new(config.tracker_config(), TerminalSink::stdout());
    tracker.subscribe(|event| {
        if !matches!(event, TimerEvent::Updated { .. }) {
            debug!("Timer event: {}", event.name());
        }
    });

    let mut commands = spawn_stdin_reader(32);

    tokio::select! {
        exit = run_frame_loop(&mut tracker, &mut commands, config.frame_loop_options()) => {
            match exit {
                FrameLoopExit::Quit => info!("Stopped by quit command"),
                FrameLoopExit::TimeLimit => info!("Stopped after run time limit"),
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    tracker.detach();

    println!();
    println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?);
    Ok(())
}
