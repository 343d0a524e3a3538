//! Display sinks
//!
//! The tracker renders into a [`DisplaySink`] supplied by the host: a text
//! target paired with a color target. Both are required for visible output,
//! so they are one trait.

pub mod color;
pub mod memory;
pub mod terminal;

pub use color::Color;
pub use memory::MemorySink;
pub use terminal::TerminalSink;

/// Text and color target the tracker writes into on every refresh.
///
/// The tracker calls [`set_color`](DisplaySink::set_color) before
/// [`set_text`](DisplaySink::set_text) for each render.
pub trait DisplaySink {
    fn set_color(&mut self, color: Color);
    fn set_text(&mut self, text: &str);
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn set_color(&mut self, color: Color) {
        (**self).set_color(color)
    }

    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }
}
