//! Pagination and sort state for one listing.

use drive_host::{ListingPayload, SortColumn, SortSpec};

/// Default number of rows requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 115;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Page number, page size, and the server-reported totals and sort.
///
/// `total` and the sort fields are written by [`PageState::apply`] from server responses and by
/// [`PageState::change_sort`]; the UI only reads them.
pub struct PageState {
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub size: u32,
    /// Total rows across all pages.
    pub total: u64,
    pub order: Option<SortColumn>,
    pub asc: Option<bool>,
    pub fc_mix: Option<bool>,
}

impl PageState {
    pub fn new(size: u32) -> Self {
        Self {
            page: 1,
            size: size.max(1),
            total: 0,
            order: None,
            asc: None,
            fc_mix: None,
        }
    }

    /// Moves to page `page` (clamped to 1). Returns `false` when nothing changed.
    pub fn change_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// Changes the page size, resetting to page 1. Returns `false` for the current size or zero.
    pub fn change_size(&mut self, size: u32) -> bool {
        if size == 0 || self.size == size {
            return false;
        }
        self.size = size;
        self.page = 1;
        true
    }

    /// Records a new sort tuple. The page is left alone.
    pub fn change_sort(&mut self, order: SortColumn, asc: bool, fc_mix: bool) {
        self.order = Some(order);
        self.asc = Some(asc);
        self.fc_mix = Some(fc_mix);
    }

    /// Syncs totals and sort from a server response.
    pub fn apply(&mut self, payload: &ListingPayload) {
        self.total = payload.count;
        if let Some(sort) = payload.sort {
            self.order = Some(sort.order);
            self.asc = Some(sort.asc);
            self.fc_mix = Some(sort.fc_mix);
        }
    }

    /// `ceil(total / size)`.
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(u64::from(self.size.max(1)))
    }

    /// Row offset of the first row on the current page.
    pub fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Current sort as a full spec, once a column is known.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.order.map(|order| SortSpec {
            order,
            asc: self.asc.unwrap_or(true),
            fc_mix: self.fc_mix.unwrap_or(false),
        })
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
