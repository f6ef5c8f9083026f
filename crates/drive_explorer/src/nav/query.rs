//! Query-parameter driven navigation source for dialog-embedded browsers.

use std::cell::{Cell, RefCell};

use drive_host::{HistoryNavigator, RouteLocation};

use super::{DirectionTracker, NavSource};
use crate::{config::ExplorerConfig, model::NavState};

type ExitCallback = Box<dyn FnOnce()>;

/// Navigation source that stores the dialog's directory in one query parameter.
///
/// Construction pushes one history entry carrying the default cid, opening a history segment
/// owned by the dialog. Forward navigation is never offered: entering the dialog starts a
/// one-directional branch. Backing out below the segment fires `on_exit` once, and
/// [`QueryNavSource::dispose`] unwinds the entries still above the host page's depth.
pub struct QueryNavSource<H> {
    history: H,
    tracker: DirectionTracker<H>,
    key: String,
    default_cid: String,
    initial_position: i64,
    pushed: Cell<i64>,
    cid: RefCell<String>,
    seen: RefCell<Option<(RouteLocation, i64)>>,
    on_exit: RefCell<Option<ExitCallback>>,
    disposed: Cell<bool>,
}

impl<H: HistoryNavigator + Clone> QueryNavSource<H> {
    /// Opens the dialog's history segment at `default_cid`.
    pub fn new(
        history: H,
        key: impl Into<String>,
        default_cid: impl Into<String>,
        on_exit: impl FnOnce() + 'static,
    ) -> Self {
        let key = key.into();
        let default_cid = default_cid.into();
        let initial_position = history.current_position();
        history.push(
            history
                .current_location()
                .with_query(key.clone(), default_cid.clone()),
        );
        let seen = (history.current_location(), history.current_position());

        Self {
            tracker: DirectionTracker::new(history.clone()),
            history,
            key,
            cid: RefCell::new(default_cid.clone()),
            default_cid,
            initial_position,
            pushed: Cell::new(1),
            seen: RefCell::new(Some(seen)),
            on_exit: RefCell::new(Some(Box::new(on_exit))),
            disposed: Cell::new(false),
        }
    }

    /// Opens the dialog's history segment using the query key configured in `config`.
    pub fn from_config(
        history: H,
        config: &ExplorerConfig,
        default_cid: impl Into<String>,
        on_exit: impl FnOnce() + 'static,
    ) -> Self {
        Self::new(history, config.dialog_query_key.clone(), default_cid, on_exit)
    }

    /// Navigates the dialog into `cid`, creating a new history entry.
    pub fn push(&self, cid: &str) {
        if self.disposed.get() {
            return;
        }
        let location = self
            .history
            .current_location()
            .with_query(self.key.clone(), cid);
        self.history.push(location);
        self.pushed.set(self.pushed.get() + 1);
        self.on_route_change();
    }

    /// Whether a back step stays inside the dialog's own history segment.
    pub fn can_back(&self) -> bool {
        !self.disposed.get() && self.history.current_position() > self.initial_position + 1
    }

    /// Always `false`; the dialog never offers forward navigation.
    pub fn can_forward(&self) -> bool {
        false
    }

    /// Steps back one entry when [`QueryNavSource::can_back`] allows it.
    pub fn back(&self) -> bool {
        if !self.can_back() {
            return false;
        }
        self.history.go(-1);
        self.on_route_change();
        true
    }

    /// Handles a router navigation event.
    ///
    /// Returns `true` when the dialog's cid changed. Repeated calls for the same history entry
    /// are ignored.
    pub fn on_route_change(&self) -> bool {
        if self.disposed.get() {
            return false;
        }
        let location = self.history.current_location();
        let position = self.history.current_position();
        let seen = (location, position);
        if self.seen.borrow().as_ref() == Some(&seen) {
            return false;
        }

        self.tracker.observe();
        let (location, position) = seen.clone();
        *self.seen.borrow_mut() = Some(seen);

        if position <= self.initial_position {
            let on_exit = self.on_exit.borrow_mut().take();
            if let Some(on_exit) = on_exit {
                on_exit();
            }
            return false;
        }

        let cid = location
            .query_value(&self.key)
            .filter(|cid| !cid.is_empty())
            .unwrap_or(&self.default_cid)
            .to_string();
        let mut current = self.cid.borrow_mut();
        if *current == cid {
            return false;
        }
        *current = cid;
        true
    }

    /// Closes the dialog's history segment, restoring the host page's history depth.
    ///
    /// Safe to call more than once; only the first call issues history steps.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.tracker.stop();
        let above_host = self.history.current_position() - self.initial_position;
        let steps = above_host.clamp(0, self.pushed.get());
        if steps > 0 {
            self.history.go(-steps);
        }
    }

    /// Whether [`QueryNavSource::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl<H: HistoryNavigator + Clone> NavSource for QueryNavSource<H> {
    fn nav_state(&self) -> NavState {
        NavState::new(self.cid.borrow().clone(), None, self.tracker.direction())
    }
}
