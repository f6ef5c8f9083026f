//! Directory listing service contracts.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

use super::types::{ListFailure, ListQuery, ListingPayload, SearchQuery};

/// Object-safe boxed future used by [`DriveListService`] async methods.
pub type ListFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Result type returned by every listing endpoint.
pub type ListOutcome = Result<ListingPayload, ListFailure>;

/// Host service that performs the network calls behind a directory listing.
///
/// Implementations translate transport errors and falsy `state` replies alike into
/// [`ListFailure`].
pub trait DriveListService {
    /// Lists a directory page through the primary listing endpoint.
    fn list_directory<'a>(&'a self, query: &'a ListQuery) -> ListFuture<'a, ListOutcome>;

    /// Lists a directory page through the legacy listing endpoint.
    fn list_directory_legacy<'a>(&'a self, query: &'a ListQuery) -> ListFuture<'a, ListOutcome>;

    /// Runs a keyword search scoped to a directory.
    fn search<'a>(&'a self, query: &'a SearchQuery) -> ListFuture<'a, ListOutcome>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op list service for unsupported targets and baseline tests.
pub struct NoopDriveListService;

impl NoopDriveListService {
    fn unsupported(op: &str) -> ListFailure {
        ListFailure::message(format!("drive listing unavailable: {op}"))
    }
}

impl DriveListService for NoopDriveListService {
    fn list_directory<'a>(&'a self, _query: &'a ListQuery) -> ListFuture<'a, ListOutcome> {
        Box::pin(async { Err(Self::unsupported("list_directory")) })
    }

    fn list_directory_legacy<'a>(&'a self, _query: &'a ListQuery) -> ListFuture<'a, ListOutcome> {
        Box::pin(async { Err(Self::unsupported("list_directory_legacy")) })
    }

    fn search<'a>(&'a self, _query: &'a SearchQuery) -> ListFuture<'a, ListOutcome> {
        Box::pin(async { Err(Self::unsupported("search")) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One request observed by [`ScriptedDriveListService`].
pub enum ListCall {
    /// Primary listing endpoint call.
    Directory(ListQuery),
    /// Legacy listing endpoint call.
    Legacy(ListQuery),
    /// Search endpoint call.
    Search(SearchQuery),
}

#[derive(Debug, Default)]
struct ScriptedState {
    directory: VecDeque<ListOutcome>,
    legacy: VecDeque<ListOutcome>,
    search: VecDeque<ListOutcome>,
    calls: Vec<ListCall>,
}

#[derive(Debug, Clone, Default)]
/// In-memory list service that replays queued outcomes per endpoint and records every call.
///
/// An endpoint with nothing queued answers with a failure naming the endpoint.
pub struct ScriptedDriveListService {
    inner: Rc<RefCell<ScriptedState>>,
}

impl ScriptedDriveListService {
    /// Queues the next primary listing outcome.
    pub fn queue_directory(&self, outcome: ListOutcome) {
        self.inner.borrow_mut().directory.push_back(outcome);
    }

    /// Queues the next legacy listing outcome.
    pub fn queue_legacy(&self, outcome: ListOutcome) {
        self.inner.borrow_mut().legacy.push_back(outcome);
    }

    /// Queues the next search outcome.
    pub fn queue_search(&self, outcome: ListOutcome) {
        self.inner.borrow_mut().search.push_back(outcome);
    }

    /// Returns every call observed so far, oldest first.
    pub fn calls(&self) -> Vec<ListCall> {
        self.inner.borrow().calls.clone()
    }

    /// Returns the number of calls observed so far.
    pub fn call_count(&self) -> usize {
        self.inner.borrow().calls.len()
    }

    fn next(&self, call: ListCall) -> ListOutcome {
        let mut state = self.inner.borrow_mut();
        let (queue, label) = match &call {
            ListCall::Directory(_) => (&mut state.directory, "list_directory"),
            ListCall::Legacy(_) => (&mut state.legacy, "list_directory_legacy"),
            ListCall::Search(_) => (&mut state.search, "search"),
        };
        let outcome = queue
            .pop_front()
            .unwrap_or_else(|| Err(ListFailure::message(format!("no scripted {label} reply"))));
        state.calls.push(call);
        outcome
    }
}

impl DriveListService for ScriptedDriveListService {
    fn list_directory<'a>(&'a self, query: &'a ListQuery) -> ListFuture<'a, ListOutcome> {
        let outcome = self.next(ListCall::Directory(query.clone()));
        Box::pin(async move { outcome })
    }

    fn list_directory_legacy<'a>(&'a self, query: &'a ListQuery) -> ListFuture<'a, ListOutcome> {
        let outcome = self.next(ListCall::Legacy(query.clone()));
        Box::pin(async move { outcome })
    }

    fn search<'a>(&'a self, query: &'a SearchQuery) -> ListFuture<'a, ListOutcome> {
        let outcome = self.next(ListCall::Search(query.clone()));
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::listing::types::{Area, ListingKind};

    fn query(cid: &str) -> ListQuery {
        ListQuery {
            cid: cid.to_string(),
            area: Area::All,
            offset: 0,
            limit: 115,
            order: None,
            asc: None,
            fc_mix: None,
        }
    }

    fn payload(cid: &str) -> ListingPayload {
        ListingPayload {
            kind: ListingKind::Listing,
            cid: cid.to_string(),
            entries: Vec::new(),
            path: Vec::new(),
            count: 0,
            offset: 0,
            limit: 115,
            sort: None,
        }
    }

    #[test]
    fn noop_list_service_reports_unsupported() {
        let service = NoopDriveListService;
        let service_obj: &dyn DriveListService = &service;
        let q = query("0");
        let err = block_on(service_obj.list_directory(&q)).expect_err("list should fail");
        assert!(err.message.contains("list_directory"));
    }

    #[test]
    fn scripted_service_replays_per_endpoint_and_records_calls() {
        let service = ScriptedDriveListService::default();
        service.queue_directory(Ok(payload("7")));
        let service_obj: &dyn DriveListService = &service;

        let q = query("7");
        let listed = block_on(service_obj.list_directory(&q)).expect("scripted listing");
        assert_eq!(listed.cid, "7");

        let err = block_on(service_obj.list_directory_legacy(&q)).expect_err("nothing queued");
        assert_eq!(err.message, "no scripted list_directory_legacy reply");

        assert_eq!(
            service.calls(),
            vec![ListCall::Directory(q.clone()), ListCall::Legacy(q)]
        );
    }
}
