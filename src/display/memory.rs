//! In-memory sink that records what was rendered

use std::{cell::RefCell, rc::Rc};

use super::{Color, DisplaySink};

#[derive(Debug, Default)]
struct Rendered {
    text: Option<String>,
    color: Option<Color>,
    renders: usize,
}

/// Records the last text and color written to it.
///
/// Clones share the same record, so a test can keep one handle while the
/// tracker owns the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Rc<RefCell<Rendered>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last rendered text, if anything was rendered yet
    pub fn text(&self) -> Option<String> {
        self.inner.borrow().text.clone()
    }

    pub fn color(&self) -> Option<Color> {
        self.inner.borrow().color
    }

    /// Number of `set_text` calls received
    pub fn render_count(&self) -> usize {
        self.inner.borrow().renders
    }
}

impl DisplaySink for MemorySink {
    fn set_color(&mut self, color: Color) {
        self.inner.borrow_mut().color = Some(color);
    }

    fn set_text(&mut self, text: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.text = Some(text.to_string());
        inner.renders += 1;
    }
}
