//! Router/history capability contracts consumed by navigation sources.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// A router location: path plus query parameters.
pub struct RouteLocation {
    /// Route path, for example `/drive/star/42`.
    pub path: String,
    /// Query parameters keyed by name.
    pub query: BTreeMap<String, String>,
}

impl RouteLocation {
    /// Builds a location with no query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// Returns a copy with `key` set to `value`.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Returns a query parameter value.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns the non-empty path segments.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

/// Capability exposing the monotonically assigned history position of the current entry.
pub trait PositionSource {
    /// Returns the position of the current history entry.
    fn current_position(&self) -> i64;
}

/// Router capability used by URL-backed navigation sources.
pub trait HistoryNavigator: PositionSource {
    /// Returns the active location.
    fn current_location(&self) -> RouteLocation;

    /// Pushes a new history entry.
    fn push(&self, location: RouteLocation);

    /// Moves `delta` entries through history (negative goes back).
    fn go(&self, delta: i64);
}

#[derive(Debug)]
struct MemoryHistoryState {
    entries: Vec<RouteLocation>,
    cursor: usize,
    go_calls: Vec<i64>,
}

#[derive(Debug, Clone)]
/// In-memory history stack with browser semantics, used by tests and non-browser hosts.
///
/// Positions are entry indexes, so they increase on push and decrease on back navigation.
pub struct MemoryHistory {
    inner: Rc<RefCell<MemoryHistoryState>>,
}

impl MemoryHistory {
    /// Creates a history whose only entry is `initial`.
    pub fn new(initial: RouteLocation) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryHistoryState {
                entries: vec![initial],
                cursor: 0,
                go_calls: Vec::new(),
            })),
        }
    }

    /// Returns the number of entries, including forward entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns whether the history is empty (never true; a history always has an entry).
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Returns every `go` delta requested so far.
    pub fn go_calls(&self) -> Vec<i64> {
        self.inner.borrow().go_calls.clone()
    }

    /// Returns the total number of backward steps requested through `go`.
    pub fn back_steps(&self) -> i64 {
        self.inner
            .borrow()
            .go_calls
            .iter()
            .filter(|delta| **delta < 0)
            .map(|delta| -delta)
            .sum()
    }
}

impl PositionSource for MemoryHistory {
    fn current_position(&self) -> i64 {
        self.inner.borrow().cursor as i64
    }
}

impl HistoryNavigator for MemoryHistory {
    fn current_location(&self) -> RouteLocation {
        let state = self.inner.borrow();
        state.entries[state.cursor].clone()
    }

    fn push(&self, location: RouteLocation) {
        let mut state = self.inner.borrow_mut();
        let keep = state.cursor + 1;
        state.entries.truncate(keep);
        state.entries.push(location);
        state.cursor = keep;
    }

    fn go(&self, delta: i64) {
        let mut state = self.inner.borrow_mut();
        state.go_calls.push(delta);
        let last = state.entries.len() as i64 - 1;
        state.cursor = (state.cursor as i64 + delta).clamp(0, last) as usize;
    }
}
