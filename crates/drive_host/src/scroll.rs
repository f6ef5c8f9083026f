//! Scroll-container capability used to preserve list scroll offsets.

use std::{cell::Cell, rc::Rc};

/// Host scroll container for the file list.
pub trait ScrollSurface {
    /// Returns the current vertical scroll offset.
    fn scroll_top(&self) -> f64;

    /// Sets the vertical scroll offset immediately.
    fn set_scroll_top(&self, top: f64);

    /// Sets the vertical scroll offset once the next frame has been painted.
    ///
    /// Used after restoring list data, whose rows must be laid out before the offset is valid.
    fn restore_after_paint(&self, top: f64);
}

#[derive(Debug, Clone, Copy, Default)]
/// Scroll surface with no backing element.
pub struct NoopScrollSurface;

impl ScrollSurface for NoopScrollSurface {
    fn scroll_top(&self) -> f64 {
        0.0
    }

    fn set_scroll_top(&self, _top: f64) {}

    fn restore_after_paint(&self, _top: f64) {}
}

#[derive(Debug, Clone, Default)]
/// In-memory scroll surface; deferred restores wait for [`MemoryScrollSurface::paint`].
pub struct MemoryScrollSurface {
    top: Rc<Cell<f64>>,
    pending: Rc<Cell<Option<f64>>>,
}

impl MemoryScrollSurface {
    /// Returns a deferred offset that has not been painted yet.
    pub fn pending(&self) -> Option<f64> {
        self.pending.get()
    }

    /// Simulates a paint frame, applying any deferred offset.
    pub fn paint(&self) {
        if let Some(top) = self.pending.take() {
            self.top.set(top);
        }
    }
}

impl ScrollSurface for MemoryScrollSurface {
    fn scroll_top(&self) -> f64 {
        self.top.get()
    }

    fn set_scroll_top(&self, top: f64) {
        self.pending.set(None);
        self.top.set(top);
    }

    fn restore_after_paint(&self, top: f64) {
        self.pending.set(Some(top));
    }
}
