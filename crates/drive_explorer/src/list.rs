//! Generation-guarded listing fetches.
//!
//! Every [`ListController::execute`], [`ListController::search`] and [`ListController::cancel`]
//! bumps a generation counter. A fetch commits its result only if its generation is still the
//! current one when it completes, so overlapping requests resolve as last-request-wins whatever
//! order the responses arrive in.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    rc::Rc,
};

use drive_host::{DriveListService, ListQuery, ListingPayload, SearchQuery};
use leptos::logging;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Displayable listing failures recorded into [`ListSnapshot::error`].
pub enum ListError {
    /// The primary endpoint failed below the logical layer; no fallback was attempted.
    #[error("listing failed: {0}")]
    Failed(String),
    /// The primary endpoint reported failure and the legacy fallback failed too.
    #[error("listing failed: {fallback} (primary: {primary})")]
    FallbackFailed {
        /// Primary endpoint message.
        primary: String,
        /// Legacy endpoint message.
        fallback: String,
    },
    /// The search endpoint failed.
    #[error("search failed: {0}")]
    SearchFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Live list state exposed to the UI.
pub struct ListSnapshot {
    /// Last committed payload. Kept on failure so the previous listing stays visible.
    pub data: Option<ListingPayload>,
    /// Whether the current generation's request is outstanding.
    pub loading: bool,
    /// Failure of the most recent committed request.
    pub error: Option<ListError>,
}

/// Owns the list state and the generation counter for one explorer.
pub struct ListController {
    service: Rc<dyn DriveListService>,
    state: RefCell<ListSnapshot>,
    generation: Cell<u64>,
}

impl ListController {
    pub fn new(service: Rc<dyn DriveListService>) -> Self {
        Self {
            service,
            state: RefCell::new(ListSnapshot::default()),
            generation: Cell::new(0),
        }
    }

    /// Issues a directory fetch, falling back to the legacy endpoint on a logical failure.
    ///
    /// The generation is taken and `loading` set when this is called, not when the returned
    /// future is first polled. The future yields `true` only when its payload was committed.
    pub fn execute<'a>(&'a self, query: &'a ListQuery) -> impl Future<Output = bool> + 'a {
        let generation = self.begin();
        async move {
            let outcome = self.fetch_directory(query).await;
            self.finish(generation, outcome)
        }
    }

    /// Issues a keyword search with the same commit rules as [`ListController::execute`].
    pub fn search<'a>(&'a self, query: &'a SearchQuery) -> impl Future<Output = bool> + 'a {
        let generation = self.begin();
        async move {
            let outcome = self
                .service
                .search(query)
                .await
                .map_err(|failure| ListError::SearchFailed(failure.message));
            self.finish(generation, outcome)
        }
    }

    /// Orphans every in-flight request without issuing a new one.
    pub fn cancel(&self) {
        self.bump();
        self.state.borrow_mut().loading = false;
    }

    /// Replaces the list data synchronously, as when restoring from the directory cache.
    ///
    /// Callers cancel first so no older request can overwrite the restored data.
    pub fn restore(&self, data: ListingPayload) {
        let mut state = self.state.borrow_mut();
        state.data = Some(data);
        state.error = None;
        state.loading = false;
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state.borrow().clone()
    }

    /// Current list data, if any request has committed.
    pub fn data(&self) -> Option<ListingPayload> {
        self.state.borrow().data.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    async fn fetch_directory(&self, query: &ListQuery) -> Result<ListingPayload, ListError> {
        let primary = match self.service.list_directory(query).await {
            Ok(payload) => return Ok(payload),
            Err(failure) if failure.logical => failure,
            Err(failure) => return Err(ListError::Failed(failure.message)),
        };
        logging::debug_warn!(
            "primary listing for cid {} failed ({}); retrying legacy endpoint",
            &query.cid,
            &primary.message
        );
        let fallback_query = query.with_sort_hints(primary.order, primary.asc);
        self.service
            .list_directory_legacy(&fallback_query)
            .await
            .map_err(|fallback| ListError::FallbackFailed {
                primary: primary.message,
                fallback: fallback.message,
            })
    }

    fn bump(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    fn begin(&self) -> u64 {
        let generation = self.bump();
        let mut state = self.state.borrow_mut();
        state.loading = true;
        state.error = None;
        generation
    }

    fn finish(&self, generation: u64, outcome: Result<ListingPayload, ListError>) -> bool {
        if generation != self.generation.get() {
            logging::debug_warn!(
                "discarding stale listing result (generation {generation}, current {})",
                self.generation.get()
            );
            return false;
        }
        let mut state = self.state.borrow_mut();
        state.loading = false;
        match outcome {
            Ok(payload) => {
                state.data = Some(payload);
                true
            }
            Err(err) => {
                logging::warn!("{err}");
                state.error = Some(err);
                false
            }
        }
    }
}

impl std::fmt::Debug for ListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish()
    }
}
