//! The explorer facade: navigation, caching, and pagination for one file-browser instance.
//!
//! The explorer does not observe anything on its own. Owners call [`Explorer::sync`] after every
//! navigation event (and the command methods call it internally); `sync` reads the navigation
//! source, runs [`decide_watch`] against the previously watched tuple, and executes the resulting
//! [`WatchAction`]. State changes are published through [`Explorer::subscribe`].

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use drive_host::{
    cache_key, save_pref_with, Area, DriveListService, ListQuery, ListingKind, PathEntry,
    PrefsStore, ScrollSurface, SearchQuery, SortColumn, SortPreferenceService, TaskSpawner,
    PAGE_SIZE_PREF_KEY, ROOT_CID,
};
use leptos::logging;

use crate::{
    cache::{CacheEntry, DirectoryCache},
    config::ExplorerConfig,
    list::{ListController, ListSnapshot},
    model::{NavState, WatchKey},
    nav::NavSource,
    notify::{ChangeNotifier, SubscriptionId},
    page::PageState,
    reducer::{decide_watch, WatchAction},
};

/// Label of the synthetic root crumb shown in search mode.
pub const SEARCH_ROOT_LABEL: &str = "All files";

#[derive(Clone)]
/// Host service bundle consumed by an [`Explorer`].
pub struct ExplorerServices {
    /// Listing and search endpoints.
    pub list: Rc<dyn DriveListService>,
    /// Per-directory sort persistence.
    pub sort: Rc<dyn SortPreferenceService>,
    /// Preference storage for the page size.
    pub prefs: Rc<dyn PrefsStore>,
    /// Scroll container of the file list.
    pub scroll: Rc<dyn ScrollSurface>,
    /// Executor for best-effort background writes.
    pub tasks: Rc<dyn TaskSpawner>,
}

/// Composition of a navigation source, the generation-guarded list, the directory cache, and
/// page state.
pub struct Explorer {
    nav: Rc<dyn NavSource>,
    services: ExplorerServices,
    list: ListController,
    cache: RefCell<DirectoryCache>,
    page: RefCell<PageState>,
    keyword: RefCell<Option<String>>,
    watched: RefCell<Option<WatchKey>>,
    // Cache key of the directory listing currently shown, if the list holds one.
    committed_key: RefCell<Option<String>>,
    notifier: ChangeNotifier,
    disposed: Cell<bool>,
}

impl Explorer {
    pub fn new(nav: Rc<dyn NavSource>, services: ExplorerServices, config: &ExplorerConfig) -> Self {
        Self {
            list: ListController::new(services.list.clone()),
            nav,
            services,
            cache: RefCell::new(DirectoryCache::new(config.cache_capacity)),
            page: RefCell::new(PageState::new(config.page_size)),
            keyword: RefCell::new(None),
            watched: RefCell::new(None),
            committed_key: RefCell::new(None),
            notifier: ChangeNotifier::default(),
            disposed: Cell::new(false),
        }
    }

    /// Reacts to the current navigation state and page settings.
    ///
    /// Call after every navigation event. Serves back navigation from the cache when possible;
    /// otherwise issues a generation-guarded fetch and resolves once it settles.
    pub async fn sync(&self) {
        if self.disposed.get() {
            return;
        }
        let nav = self.nav.nav_state();
        let mut next = self.watch_key(&nav);
        let previous = self.watched.borrow().clone();
        let cached = self.cache.borrow().contains(&next.cache_key());

        match decide_watch(previous.as_ref(), &next, nav.direction, cached) {
            WatchAction::ClearAndRefetch => {
                self.cache.borrow_mut().clear();
                self.services.scroll.set_scroll_top(0.0);
            }
            WatchAction::ResetPageAndRefetch => {
                self.page.borrow_mut().change_page(1);
                next.page = 1;
                self.services.scroll.set_scroll_top(0.0);
            }
            WatchAction::RestoreFromCache { leaving } => {
                if self.restore_from_cache(leaving.as_ref(), &mut next) {
                    *self.watched.borrow_mut() = Some(next);
                    self.notifier.notify();
                    return;
                }
            }
            WatchAction::EnterAndRefetch { leaving } => {
                if let Some(leaving) = &leaving {
                    self.save_scroll(leaving);
                    self.page.borrow_mut().change_page(1);
                    next.page = 1;
                }
                self.services.scroll.set_scroll_top(0.0);
            }
            WatchAction::Refetch => {}
        }

        *self.watched.borrow_mut() = Some(next.clone());
        self.fetch(&next).await;
    }

    /// Refetches the current view.
    pub async fn refresh(&self) {
        self.sync().await;
    }

    /// Moves to page `page`, fetching it when the page actually changed.
    pub async fn change_page(&self, page: u32) {
        if self.page.borrow_mut().change_page(page) {
            self.sync().await;
        }
    }

    /// Changes the page size; the cache is cleared and the listing refetched from page 1.
    ///
    /// The size is persisted as a preference in the background.
    pub async fn change_size(&self, size: u32) {
        if !self.page.borrow_mut().change_size(size) {
            return;
        }
        let prefs = self.services.prefs.clone();
        self.services.tasks.spawn_local(Box::pin(async move {
            if let Err(err) = save_pref_with(prefs.as_ref(), PAGE_SIZE_PREF_KEY, &size).await {
                logging::warn!("persist page size failed: {err}");
            }
        }));
        self.sync().await;
    }

    /// Records a new sort, persists it for the current directory unless searching, and refetches
    /// from page 1.
    pub async fn change_sort(&self, order: SortColumn, asc: bool, fc_mix: bool) {
        let sort = {
            let mut page = self.page.borrow_mut();
            page.change_sort(order, asc, fc_mix);
            page.change_page(1);
            page.sort_spec()
        };
        if let Some(sort) = sort.filter(|_| !self.is_searching()) {
            let service = self.services.sort.clone();
            let cid = self.nav.cid();
            self.services.tasks.spawn_local(Box::pin(async move {
                if let Err(err) = service.persist_sort(&cid, sort).await {
                    logging::warn!("persist sort for cid {cid} failed: {err}");
                }
            }));
        }
        self.sync().await;
    }

    /// Enters or leaves search mode. An empty keyword leaves it.
    pub async fn set_keyword(&self, keyword: Option<String>) {
        let keyword = keyword.filter(|kw| !kw.trim().is_empty());
        if *self.keyword.borrow() == keyword {
            return;
        }
        *self.keyword.borrow_mut() = keyword;
        self.sync().await;
    }

    /// Drops the cached `all:` and `star:` listings of `cid`.
    pub fn invalidate(&self, cid: &str) {
        let mut cache = self.cache.borrow_mut();
        for area in [Area::All, Area::Star] {
            cache.invalidate(&cache_key(Some(area), cid));
        }
    }

    /// Invalidates several directories, such as a move's source and target.
    pub fn invalidate_many<'c>(&self, cids: impl IntoIterator<Item = &'c str>) {
        for cid in cids {
            self.invalidate(cid);
        }
    }

    /// Registers a listener called after every state change.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Orphans in-flight requests, drops listeners, and turns later syncs into no-ops.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.list.cancel();
        self.notifier.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn list(&self) -> ListSnapshot {
        self.list.snapshot()
    }

    pub fn page(&self) -> PageState {
        *self.page.borrow()
    }

    pub fn keyword(&self) -> Option<String> {
        self.keyword.borrow().clone()
    }

    pub fn is_searching(&self) -> bool {
        self.keyword.borrow().is_some()
    }

    pub fn nav_state(&self) -> NavState {
        self.nav.nav_state()
    }

    /// Breadcrumb of the current view.
    ///
    /// Search mode shows a synthetic `root > "keyword"` trail; otherwise the path reported by
    /// the last committed listing.
    pub fn path(&self) -> Vec<PathEntry> {
        if let Some(keyword) = self.keyword.borrow().as_deref() {
            return vec![
                PathEntry::new(ROOT_CID, SEARCH_ROOT_LABEL),
                PathEntry::new(self.nav.cid(), format!("\"{keyword}\"")),
            ];
        }
        self.list
            .snapshot()
            .data
            .filter(|data| data.kind == ListingKind::Listing)
            .map(|data| data.path)
            .unwrap_or_default()
    }

    /// Parent crumb used by "move up" actions.
    pub fn prev_level(&self) -> Option<PathEntry> {
        let mut path = self.path();
        let len = path.len();
        if len < 2 {
            return None;
        }
        Some(path.swap_remove(len - 2))
    }

    /// Whether the cache holds `cid` in `area` (without promoting it).
    pub fn is_cached(&self, area: Option<Area>, cid: &str) -> bool {
        self.cache.borrow().contains(&cache_key(area, cid))
    }

    /// Cached scroll offset for `cid` in `area`.
    pub fn cached_scroll_top(&self, area: Option<Area>, cid: &str) -> Option<f64> {
        self.cache
            .borrow()
            .peek(&cache_key(area, cid))
            .map(|entry| entry.scroll_top)
    }

    pub fn cached_directories(&self) -> usize {
        self.cache.borrow().len()
    }

    fn watch_key(&self, nav: &NavState) -> WatchKey {
        let page = self.page.borrow();
        WatchKey {
            cid: nav.cid.clone(),
            area: nav.area,
            page: page.page,
            size: page.size,
            keyword: self.keyword.borrow().clone(),
        }
    }

    fn restore_from_cache(&self, leaving: Option<&WatchKey>, next: &mut WatchKey) -> bool {
        // Take the target first so seeding the outgoing entry cannot evict it.
        let Some(entry) = self.cache.borrow_mut().get(&next.cache_key()).cloned() else {
            return false;
        };
        if let Some(leaving) = leaving {
            self.save_scroll(leaving);
        }

        self.list.cancel();
        {
            let mut page = self.page.borrow_mut();
            page.apply(&entry.data);
            page.change_page(entry.data.page());
            next.page = page.page;
        }
        self.list.restore(entry.data);
        *self.committed_key.borrow_mut() = Some(next.cache_key());
        self.services.scroll.restore_after_paint(entry.scroll_top);
        true
    }

    fn save_scroll(&self, leaving: &WatchKey) {
        if leaving.is_searching() {
            return;
        }
        let key = leaving.cache_key();
        let top = self.services.scroll.scroll_top();
        let shows_leaving = self.committed_key.borrow().as_deref() == Some(key.as_str());
        let current = self
            .list
            .data()
            .filter(|data| shows_leaving && data.kind == ListingKind::Listing);
        self.cache
            .borrow_mut()
            .save_scroll(&key, top, current.as_ref());
    }

    async fn fetch(&self, key: &WatchKey) {
        let offset = key.page.saturating_sub(1).saturating_mul(key.size);
        match key.keyword.as_deref().filter(|_| key.is_searching()) {
            Some(keyword) => {
                let query = SearchQuery {
                    cid: key.cid.clone(),
                    keyword: keyword.to_string(),
                    offset,
                    limit: key.size,
                };
                let pending = self.list.search(&query);
                self.notifier.notify();
                if pending.await {
                    *self.committed_key.borrow_mut() = None;
                    self.apply_committed();
                }
            }
            None => {
                let query = {
                    let page = self.page.borrow();
                    ListQuery {
                        cid: key.cid.clone(),
                        area: key.area.unwrap_or_default(),
                        offset,
                        limit: key.size,
                        order: page.order,
                        asc: page.asc,
                        fc_mix: page.fc_mix,
                    }
                };
                let pending = self.list.execute(&query);
                self.notifier.notify();
                if pending.await {
                    let cache_key = key.cache_key();
                    if let Some(data) = self.list.data() {
                        self.cache
                            .borrow_mut()
                            .set(cache_key.clone(), CacheEntry::new(data));
                    }
                    *self.committed_key.borrow_mut() = Some(cache_key);
                    self.apply_committed();
                }
            }
        }
        self.notifier.notify();
    }

    fn apply_committed(&self) {
        if let Some(data) = self.list.data() {
            self.page.borrow_mut().apply(&data);
        }
    }
}

impl std::fmt::Debug for Explorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explorer")
            .field("nav", &self.nav.nav_state())
            .field("list", &self.list)
            .field("cache", &self.cache)
            .field("page", &self.page)
            .field("keyword", &self.keyword)
            .field("watched", &self.watched)
            .field("committed_key", &self.committed_key)
            .field("disposed", &self.disposed)
            .finish()
    }
}
