//! Host tasks module
//!
//! The frame loop driving a tracker and the stdin reader feeding it commands.

pub mod frame_loop;
pub mod stdin_reader;

// Re-export main functions
pub use frame_loop::{clamp_frame_rate, run_frame_loop, FrameLoopExit, FrameLoopOptions};
pub use stdin_reader::spawn_stdin_reader;
