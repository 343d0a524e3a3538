//! Terminal sink rendering the timer on a single, redrawn line

use std::io::{self, Stdout, Write};

use tracing::warn;

use super::{Color, DisplaySink};

/// Writes each render as `\r<color><text><reset><clear-to-eol>` using
/// 24-bit ANSI color escapes.
#[derive(Debug)]
pub struct TerminalSink<W: Write = Stdout> {
    out: W,
    color: Color,
    write_failed: bool,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: Color::default(),
            write_failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let (r, g, b) = self.color.to_rgb8();
        write!(self.out, "\r\x1b[38;2;{};{};{}m{}\x1b[0m\x1b[K", r, g, b, text)?;
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_text(&mut self, text: &str) {
        match self.write_line(text) {
            Ok(()) => self.write_failed = false,
            Err(e) => {
                // Only report the first failure of a run of failures
                if !self.write_failed {
                    warn!("Failed to write timer display: {}", e);
                }
                self.write_failed = true;
            }
        }
    }
}
