//! Navigation, caching, and list-exploration runtime for the drive file browser.
//!
//! One [`Explorer`] backs each mounted file browser: the primary drive page, every
//! dialog-embedded browser, and every embedded picker. It composes
//!
//! - a [`NavSource`] ([`PathNavSource`], [`QueryNavSource`], or [`StackNavSource`]) that reports
//!   the current directory, area, and navigation direction,
//! - a [`ListController`] that guards fetches with a generation counter,
//! - a [`DirectoryCache`] that serves back navigation without a network round trip, and
//! - a [`PageState`] holding pagination and sort.
//!
//! Host I/O (listing endpoints, sort persistence, history, scroll container, preferences, task
//! spawning) comes from [`drive_host`] contracts bundled in [`ExplorerServices`].

pub mod cache;
pub mod config;
pub mod explorer;
pub mod list;
pub mod model;
pub mod nav;
pub mod notify;
pub mod page;
pub mod reducer;
pub mod registry;
pub mod route_scroll;
pub mod signals;

#[cfg(test)]
mod testing;

pub use cache::{CacheEntry, DirectoryCache, DEFAULT_CACHE_CAPACITY};
pub use config::ExplorerConfig;
pub use explorer::{Explorer, ExplorerServices, SEARCH_ROOT_LABEL};
pub use list::{ListController, ListError, ListSnapshot};
pub use model::{NavDirection, NavState, WatchKey};
pub use nav::{
    classify_direction, parse_drive_segments, DirectionTracker, NavSource, PathNavSource,
    QueryNavSource, StackNavSource,
};
pub use notify::{ChangeNotifier, SubscriptionId};
pub use page::{PageState, DEFAULT_PAGE_SIZE};
pub use reducer::{decide_watch, WatchAction};
pub use registry::{
    provide_dialog_registry, use_dialog_registry, DialogId, DialogRegistry, RegistryError,
};
pub use route_scroll::RouteScrollKeeper;
pub use signals::ExplorerSignals;
