//! Typed host contracts and shared models consumed by the drive file-browser runtime.
//!
//! This crate is the API-first boundary between the explorer state machine and everything it
//! treats as a black box: the listing endpoints, the sort-preference write, the router/history
//! stack, the scroll container, preference storage, and the local task executor. Browser
//! adapters live in `drive_host_web`; each contract here also ships no-op and in-memory adapters
//! for tests and unsupported targets.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod history;
pub mod listing;
pub mod prefs;
pub mod scroll;
pub mod sort;
pub mod task;

pub use history::{HistoryNavigator, MemoryHistory, PositionSource, RouteLocation};
pub use listing::reply::{decode_list_reply, ListReply};
pub use listing::service::{
    DriveListService, ListCall, ListFuture, ListOutcome, NoopDriveListService,
    ScriptedDriveListService,
};
pub use listing::types::{
    cache_key, Area, DriveEntry, ListFailure, ListQuery, ListingKind, ListingPayload, PathEntry,
    SearchQuery, SortColumn, SortSpec, ROOT_CID,
};
pub use prefs::{
    load_pref_with, save_pref_with, MemoryPrefsStore, NoopPrefsStore, PrefsStore,
    PrefsStoreFuture, EXPLORER_CONFIG_KEY, PAGE_SIZE_PREF_KEY,
};
pub use scroll::{MemoryScrollSurface, NoopScrollSurface, ScrollSurface};
pub use sort::{
    MemorySortPreferenceService, NoopSortPreferenceService, SortPreferenceFuture,
    SortPreferenceService,
};
pub use task::{LocalTask, NoopTaskSpawner, QueuedTaskSpawner, TaskSpawner};
