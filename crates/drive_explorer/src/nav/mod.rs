//! Navigation sources: uniform read-only views of the current directory, area, and direction.
//!
//! Three providers cover the three ways a file browser can be hosted:
//! - [`PathNavSource`] parses the primary page's route path.
//! - [`QueryNavSource`] keeps a dialog browser's directory in a query parameter on its own
//!   history segment.
//! - [`StackNavSource`] is an in-memory back/forward stack for embedded pickers.

mod direction;
mod path;
mod query;
mod stack;

use std::rc::Rc;

use drive_host::Area;

use crate::model::{NavDirection, NavState};

pub use direction::{classify_direction, DirectionTracker};
pub use path::{parse_drive_segments, PathNavSource};
pub use query::QueryNavSource;
pub use stack::StackNavSource;

/// Read-only view of "where are we" consumed by the explorer.
pub trait NavSource {
    /// Returns the current navigation state.
    fn nav_state(&self) -> NavState;

    /// Returns the current directory cid.
    fn cid(&self) -> String {
        self.nav_state().cid
    }

    /// Returns the current area, if the source tracks one.
    fn area(&self) -> Option<Area> {
        self.nav_state().area
    }

    /// Returns how the current state was reached.
    fn direction(&self) -> NavDirection {
        self.nav_state().direction
    }
}

impl<T: NavSource + ?Sized> NavSource for Rc<T> {
    fn nav_state(&self) -> NavState {
        (**self).nav_state()
    }
}
