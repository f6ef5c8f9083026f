//! Browser (`wasm32`) implementations of [`drive_host`] service contracts.
//!
//! Each adapter talks to one browser API: `history` for positions and dialog history segments,
//! a DOM element for the file list's scroll offset, `localStorage` for preferences, and the
//! wasm-bindgen executor for background tasks. Non-wasm builds compile every adapter to an inert
//! fallback so the runtime crates can be tested natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod history;
pub mod prefs;
pub mod scroll;
pub mod task;

pub use history::{format_location, parse_location, BrowserHistory};
pub use prefs::WebPrefsStore;
pub use scroll::ElementScrollSurface;
pub use task::WebTaskSpawner;
