//! Per-directory sort preference persistence contracts.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use crate::listing::types::SortSpec;

/// Object-safe boxed future used by [`SortPreferenceService`] async methods.
pub type SortPreferenceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that stores a directory's sort order server-side.
///
/// Callers treat this as a best-effort write; failures are reported but never retried.
pub trait SortPreferenceService {
    /// Persists `sort` as the stored preference for directory `cid`.
    fn persist_sort<'a>(
        &'a self,
        cid: &'a str,
        sort: SortSpec,
    ) -> SortPreferenceFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op sort preference service that accepts every write.
pub struct NoopSortPreferenceService;

impl SortPreferenceService for NoopSortPreferenceService {
    fn persist_sort<'a>(
        &'a self,
        _cid: &'a str,
        _sort: SortSpec,
    ) -> SortPreferenceFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory sort preference service that records every write in order.
pub struct MemorySortPreferenceService {
    writes: Rc<RefCell<Vec<(String, SortSpec)>>>,
    fail_with: Rc<RefCell<Option<String>>>,
}

impl MemorySortPreferenceService {
    /// Returns every recorded `(cid, sort)` write, oldest first.
    pub fn writes(&self) -> Vec<(String, SortSpec)> {
        self.writes.borrow().clone()
    }

    /// Makes subsequent writes fail with `message` (still recorded).
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.borrow_mut() = Some(message.into());
    }
}

impl SortPreferenceService for MemorySortPreferenceService {
    fn persist_sort<'a>(
        &'a self,
        cid: &'a str,
        sort: SortSpec,
    ) -> SortPreferenceFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.writes.borrow_mut().push((cid.to_string(), sort));
            match self.fail_with.borrow().clone() {
                Some(message) => Err(message),
                None => Ok(()),
            }
        })
    }
}
