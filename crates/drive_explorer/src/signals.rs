//! Leptos binding that mirrors explorer state into reactive signals.

use std::rc::Rc;

use drive_host::PathEntry;
use leptos::{create_rw_signal, on_cleanup, RwSignal, SignalGetUntracked, SignalSet};

use crate::{explorer::Explorer, list::ListSnapshot, page::PageState};

#[derive(Debug, Clone, Copy)]
/// Reactive view of one [`Explorer`] for file-browser components.
pub struct ExplorerSignals {
    /// List data, loading flag, and error.
    pub list: RwSignal<ListSnapshot>,
    /// Page, size, totals, and sort.
    pub page: RwSignal<PageState>,
    /// Breadcrumb trail.
    pub path: RwSignal<Vec<PathEntry>>,
    /// Parent crumb for "move up".
    pub prev_level: RwSignal<Option<PathEntry>>,
}

impl ExplorerSignals {
    /// Creates signals seeded from `explorer` and keeps them updated until the owning reactive
    /// scope is cleaned up.
    pub fn bind(explorer: &Rc<Explorer>) -> Self {
        let signals = Self {
            list: create_rw_signal(explorer.list()),
            page: create_rw_signal(explorer.page()),
            path: create_rw_signal(explorer.path()),
            prev_level: create_rw_signal(explorer.prev_level()),
        };

        let weak = Rc::downgrade(explorer);
        let subscription = explorer.subscribe(move || {
            if let Some(explorer) = weak.upgrade() {
                signals.refresh_from(&explorer);
            }
        });
        let weak = Rc::downgrade(explorer);
        on_cleanup(move || {
            if let Some(explorer) = weak.upgrade() {
                explorer.unsubscribe(subscription);
            }
        });

        signals
    }

    /// Copies the explorer's current state into the signals, skipping unchanged values.
    pub fn refresh_from(&self, explorer: &Explorer) {
        let list = explorer.list();
        if self.list.get_untracked() != list {
            self.list.set(list);
        }
        let page = explorer.page();
        if self.page.get_untracked() != page {
            self.page.set(page);
        }
        let path = explorer.path();
        if self.path.get_untracked() != path {
            self.path.set(path);
        }
        let prev_level = explorer.prev_level();
        if self.prev_level.get_untracked() != prev_level {
            self.prev_level.set(prev_level);
        }
    }
}
