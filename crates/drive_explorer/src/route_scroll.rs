//! Scroll preservation across visits to unrelated routes.

use std::{cell::Cell, rc::Rc};

use drive_host::ScrollSurface;

/// Keeps the drive list's scroll offset while the user visits another route (for example a
/// video page) and reapplies it after the next paint on return.
///
/// The offset lives here rather than in the directory cache, since the directory never changed.
pub struct RouteScrollKeeper {
    scroll: Rc<dyn ScrollSurface>,
    saved: Cell<Option<f64>>,
}

impl RouteScrollKeeper {
    pub fn new(scroll: Rc<dyn ScrollSurface>) -> Self {
        Self {
            scroll,
            saved: Cell::new(None),
        }
    }

    /// Records the current offset before leaving the drive route.
    pub fn leave(&self) {
        self.saved.set(Some(self.scroll.scroll_top()));
    }

    /// Schedules the saved offset after returning. Returns `false` when nothing was saved.
    pub fn arrive(&self) -> bool {
        match self.saved.take() {
            Some(top) => {
                self.scroll.restore_after_paint(top);
                true
            }
            None => false,
        }
    }

    /// Dispatches on a route transition given whether each side is a drive route.
    pub fn transition(&self, from_drive: bool, to_drive: bool) {
        match (from_drive, to_drive) {
            (true, false) => self.leave(),
            (false, true) => {
                self.arrive();
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for RouteScrollKeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteScrollKeeper")
            .field("saved", &self.saved.get())
            .finish()
    }
}
