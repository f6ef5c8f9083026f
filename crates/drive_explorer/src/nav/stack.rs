//! In-memory back/forward stack for embedded pickers with no URL.

use std::cell::RefCell;

use super::NavSource;
use crate::model::{NavDirection, NavState};

#[derive(Debug)]
struct StackState {
    entries: Vec<String>,
    cursor: usize,
    direction: NavDirection,
}

#[derive(Debug)]
/// Array-backed navigation stack with browser-history semantics.
pub struct StackNavSource {
    state: RefCell<StackState>,
}

impl StackNavSource {
    /// Creates a stack whose only entry is `initial_cid`.
    pub fn new(initial_cid: impl Into<String>) -> Self {
        Self {
            state: RefCell::new(StackState {
                entries: vec![initial_cid.into()],
                cursor: 0,
                direction: NavDirection::Replace,
            }),
        }
    }

    /// Drops forward entries beyond the cursor and appends `cid`.
    pub fn push(&self, cid: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        let keep = state.cursor + 1;
        state.entries.truncate(keep);
        state.entries.push(cid.into());
        state.cursor = keep;
        state.direction = NavDirection::Forward;
    }

    /// Replaces the current entry without growing the stack.
    pub fn replace(&self, cid: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        let cursor = state.cursor;
        state.entries[cursor] = cid.into();
        state.direction = NavDirection::Replace;
    }

    /// Moves one entry back. Returns `false` at the bottom of the stack.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cursor == 0 {
            return false;
        }
        state.cursor -= 1;
        state.direction = NavDirection::Back;
        true
    }

    /// Moves one entry forward. Returns `false` when no forward entry exists.
    pub fn forward(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.cursor + 1 >= state.entries.len() {
            return false;
        }
        state.cursor += 1;
        state.direction = NavDirection::Forward;
        true
    }

    pub fn can_back(&self) -> bool {
        self.state.borrow().cursor > 0
    }

    pub fn can_forward(&self) -> bool {
        let state = self.state.borrow();
        state.cursor + 1 < state.entries.len()
    }

    /// Number of entries, forward entries included.
    pub fn depth(&self) -> usize {
        self.state.borrow().entries.len()
    }
}

impl NavSource for StackNavSource {
    fn nav_state(&self) -> NavState {
        let state = self.state.borrow();
        NavState::new(state.entries[state.cursor].clone(), None, state.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_truncates_forward_history() {
        let stack = StackNavSource::new("0");
        stack.push("10");
        stack.push("20");
        assert!(stack.back());
        assert!(stack.back());
        assert!(stack.can_forward());

        stack.push("30");
        assert_eq!(stack.depth(), 2);
        assert!(!stack.can_forward());
        assert_eq!(stack.nav_state(), NavState::new("30", None, NavDirection::Forward));
    }

    #[test]
    fn back_and_forward_report_their_direction() {
        let stack = StackNavSource::new("0");
        assert_eq!(stack.direction(), NavDirection::Replace);
        assert!(!stack.back());
        assert!(!stack.forward());

        stack.push("10");
        assert!(stack.back());
        assert_eq!(stack.nav_state(), NavState::new("0", None, NavDirection::Back));
        assert!(stack.forward());
        assert_eq!(stack.nav_state(), NavState::new("10", None, NavDirection::Forward));
    }

    #[test]
    fn replace_keeps_depth() {
        let stack = StackNavSource::new("0");
        stack.push("10");
        stack.replace("11");
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.cid(), "11");
        assert_eq!(stack.direction(), NavDirection::Replace);
        assert!(stack.can_back());
    }
}
