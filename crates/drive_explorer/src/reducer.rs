//! Pure decision step behind the explorer's watcher.
//!
//! [`decide_watch`] maps the previously watched `(cid, area, page, size, keyword)` tuple, the new
//! one, the navigation direction, and whether the cache holds the new directory to a
//! [`WatchAction`]. The explorer executes the action; nothing here touches state.

use crate::model::{NavDirection, WatchKey};

#[derive(Debug, Clone, PartialEq, Eq)]
/// What the explorer does in response to a watched-tuple change.
pub enum WatchAction {
    /// Page size changed: drop every cached directory, reset scroll, refetch.
    ClearAndRefetch,
    /// Search keyword changed: back to page 1, reset scroll, refetch.
    ResetPageAndRefetch,
    /// Back navigation onto a cached directory: save `leaving`, serve the cache, skip fetching.
    RestoreFromCache {
        /// Directory being left, whose scroll offset is saved.
        leaving: Option<WatchKey>,
    },
    /// Entered a directory that must be fetched: save `leaving`, reset page and scroll, fetch.
    EnterAndRefetch {
        /// Directory being left, or `None` on the first load.
        leaving: Option<WatchKey>,
    },
    /// Same directory (page change or explicit refresh): fetch.
    Refetch,
}

/// Decides how to react to `next`, evaluating size, keyword, then directory changes.
///
/// `previous` is `None` on the first load, which enters the directory without anything to save.
pub fn decide_watch(
    previous: Option<&WatchKey>,
    next: &WatchKey,
    direction: NavDirection,
    cached: bool,
) -> WatchAction {
    if let Some(previous) = previous {
        if previous.size != next.size {
            return WatchAction::ClearAndRefetch;
        }
        if previous.keyword != next.keyword {
            return WatchAction::ResetPageAndRefetch;
        }
        if previous.same_directory(next) {
            return WatchAction::Refetch;
        }
    }

    let leaving = previous.cloned();
    if direction == NavDirection::Back && cached && !next.is_searching() {
        WatchAction::RestoreFromCache { leaving }
    } else {
        WatchAction::EnterAndRefetch { leaving }
    }
}
