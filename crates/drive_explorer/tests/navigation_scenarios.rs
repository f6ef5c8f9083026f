use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
};

use drive_explorer::{
    Explorer, ExplorerConfig, ExplorerServices, ListController, NavDirection, NavSource,
    PathNavSource, QueryNavSource, StackNavSource,
};
use drive_host::{
    Area, DriveEntry, DriveListService, HistoryNavigator, ListFailure, ListFuture, ListOutcome,
    ListQuery, ListingKind, ListingPayload, MemoryHistory, MemoryPrefsStore, MemoryScrollSurface,
    NoopSortPreferenceService, NoopTaskSpawner, PathEntry, RouteLocation, ScriptedDriveListService,
    SearchQuery,
};
use futures::{
    channel::oneshot,
    executor::{block_on, LocalPool},
    task::LocalSpawnExt,
};
use pretty_assertions::assert_eq;

fn listing(cid: &str) -> ListingPayload {
    ListingPayload {
        kind: ListingKind::Listing,
        cid: cid.to_string(),
        entries: vec![DriveEntry {
            id: format!("{cid}-a"),
            parent_cid: cid.to_string(),
            name: "a.mkv".to_string(),
            is_dir: false,
            size: Some(42),
            pick_code: Some("pc".to_string()),
            starred: false,
            updated_at: None,
        }],
        path: vec![PathEntry::new("0", "root"), PathEntry::new(cid, cid)],
        count: 1,
        offset: 0,
        limit: 115,
        sort: None,
    }
}

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

fn services(list: Rc<dyn DriveListService>) -> ExplorerServices {
    ExplorerServices {
        list,
        sort: Rc::new(NoopSortPreferenceService),
        prefs: Rc::new(MemoryPrefsStore::default()),
        scroll: Rc::new(MemoryScrollSurface::default()),
        tasks: Rc::new(NoopTaskSpawner),
    }
}

/// List service whose replies are sent by the test through oneshot channels, in any order.
#[derive(Clone, Default)]
struct DeferredListService {
    replies: Rc<RefCell<VecDeque<oneshot::Receiver<ListOutcome>>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl DeferredListService {
    fn expect_call(&self) -> oneshot::Sender<ListOutcome> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(rx);
        tx
    }

    fn called_cids(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn reply(&self, cid: &str) -> ListFuture<'static, ListOutcome> {
        self.calls.borrow_mut().push(cid.to_string());
        let reply = self.replies.borrow_mut().pop_front();
        Box::pin(async move {
            match reply {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ListFailure::message("reply dropped"))),
                None => Err(ListFailure::message("unexpected call")),
            }
        })
    }
}

impl DriveListService for DeferredListService {
    fn list_directory<'a>(&'a self, query: &'a ListQuery) -> ListFuture<'a, ListOutcome> {
        self.reply(&query.cid)
    }

    fn list_directory_legacy<'a>(&'a self, query: &'a ListQuery) -> ListFuture<'a, ListOutcome> {
        self.reply(&query.cid)
    }

    fn search<'a>(&'a self, query: &'a SearchQuery) -> ListFuture<'a, ListOutcome> {
        self.reply(&query.cid)
    }
}

#[test]
fn back_forward_back_roundtrip_is_served_from_cache() {
    let nav = Rc::new(StackNavSource::new("0"));
    let list = ScriptedDriveListService::default();
    let explorer = Explorer::new(
        nav.clone(),
        services(Rc::new(list.clone())),
        &ExplorerConfig::default(),
    );

    for cid in ["0", "10", "20"] {
        if cid != "0" {
            nav.push(cid);
        }
        list.queue_directory(Ok(listing(cid)));
        block_on(explorer.sync());
    }
    assert_eq!(list.call_count(), 3);

    assert!(nav.back());
    assert_eq!(nav.nav_state().direction, NavDirection::Back);
    block_on(explorer.sync());
    assert_eq!(list.call_count(), 3);
    assert_eq!(explorer.list().data, Some(listing("10")));

    assert!(nav.back());
    block_on(explorer.sync());
    assert_eq!(list.call_count(), 3);
    assert_eq!(explorer.list().data, Some(listing("0")));
}

#[test]
fn browser_back_on_drive_routes_restores_without_fetching() {
    let history = MemoryHistory::new(RouteLocation::new("/drive"));
    let nav = Rc::new(PathNavSource::from_config(
        history.clone(),
        &ExplorerConfig::default(),
    ));
    let list = ScriptedDriveListService::default();
    let explorer = Explorer::new(
        nav.clone(),
        services(Rc::new(list.clone())),
        &ExplorerConfig::default(),
    );

    list.queue_directory(Ok(listing("0")));
    block_on(explorer.sync());
    for path in ["/drive/10", "/drive/20"] {
        history.push(RouteLocation::new(path));
        assert!(nav.on_route_change());
        list.queue_directory(Ok(listing(path.trim_start_matches("/drive/"))));
        block_on(explorer.sync());
    }

    history.go(-1);
    assert!(nav.on_route_change());
    block_on(explorer.sync());
    assert_eq!(list.call_count(), 3);
    assert_eq!(explorer.list().data, Some(listing("10")));
    assert_eq!(explorer.nav_state().area, Some(Area::All));
}

#[test]
fn invalidate_after_move_forces_a_real_fetch() {
    let nav = Rc::new(StackNavSource::new("5"));
    let list = ScriptedDriveListService::default();
    let explorer = Explorer::new(
        nav.clone(),
        services(Rc::new(list.clone())),
        &ExplorerConfig::default(),
    );
    list.queue_directory(Ok(listing("5")));
    block_on(explorer.sync());
    nav.push("6");
    list.queue_directory(Ok(listing("6")));
    block_on(explorer.sync());
    assert!(explorer.is_cached(None, "5"));

    explorer.invalidate("5");
    assert!(!explorer.is_cached(None, "5"));

    nav.back();
    list.queue_directory(Ok(listing("5")));
    block_on(explorer.sync());
    assert_eq!(list.call_count(), 3);
}

#[test]
fn stale_execute_never_overwrites_newer_result() {
    let service = DeferredListService::default();
    let controller = Rc::new(ListController::new(Rc::new(service.clone())));
    let reply_a = service.expect_call();
    let reply_b = service.expect_call();
    let results = Rc::new(RefCell::new(Vec::new()));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for cid in ["A", "B"] {
        let controller = controller.clone();
        let results = results.clone();
        spawner
            .spawn_local(async move {
                let target = query(cid);
                let committed = controller.execute(&target).await;
                results.borrow_mut().push((cid, committed));
            })
            .expect("spawn");
        pool.run_until_stalled();
    }
    assert_eq!(controller.generation(), 2);
    assert!(controller.is_loading());

    reply_b.send(Ok(listing("B"))).expect("send B");
    pool.run_until_stalled();
    reply_a.send(Ok(listing("A"))).expect("send A");
    pool.run_until_stalled();

    assert_eq!(*results.borrow(), vec![("B", true), ("A", false)]);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.data, Some(listing("B")));
    assert!(!snapshot.loading);
    assert_eq!(service.called_cids(), vec!["A", "B"]);
}

#[test]
fn overtaken_failure_neither_records_error_nor_clears_loading() {
    let service = DeferredListService::default();
    let controller = Rc::new(ListController::new(Rc::new(service.clone())));
    let reply_a = service.expect_call();
    let reply_b = service.expect_call();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for cid in ["A", "B"] {
        let controller = controller.clone();
        spawner
            .spawn_local(async move {
                let target = query(cid);
                controller.execute(&target).await;
            })
            .expect("spawn");
        pool.run_until_stalled();
    }

    reply_a.send(Err(ListFailure::message("timeout"))).expect("send A");
    pool.run_until_stalled();
    let snapshot = controller.snapshot();
    assert!(snapshot.loading);
    assert_eq!(snapshot.error, None);

    reply_b.send(Ok(listing("B"))).expect("send B");
    pool.run_until_stalled();
    assert!(!controller.is_loading());
}

#[test]
fn fast_navigation_keeps_only_the_latest_directory() {
    let nav = Rc::new(StackNavSource::new("0"));
    let service = DeferredListService::default();
    let explorer = Rc::new(Explorer::new(
        nav.clone(),
        services(Rc::new(service.clone())),
        &ExplorerConfig::default(),
    ));
    let reply_10 = service.expect_call();
    let reply_20 = service.expect_call();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for cid in ["10", "20"] {
        nav.push(cid);
        let explorer = explorer.clone();
        spawner
            .spawn_local(async move { explorer.sync().await })
            .expect("spawn");
        pool.run_until_stalled();
    }

    reply_20.send(Ok(listing("20"))).expect("send 20");
    pool.run_until_stalled();
    reply_10.send(Ok(listing("10"))).expect("send 10");
    pool.run_until_stalled();

    assert_eq!(explorer.list().data, Some(listing("20")));
    assert!(explorer.is_cached(None, "20"));
    assert!(!explorer.is_cached(None, "10"));
}

#[test]
fn cache_restore_orphans_the_fetch_being_left() {
    let nav = Rc::new(StackNavSource::new("0"));
    let service = DeferredListService::default();
    let explorer = Rc::new(Explorer::new(
        nav.clone(),
        services(Rc::new(service.clone())),
        &ExplorerConfig::default(),
    ));
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let sync = |explorer: &Rc<Explorer>| {
        let explorer = explorer.clone();
        spawner
            .spawn_local(async move { explorer.sync().await })
            .expect("spawn");
    };

    let reply_root = service.expect_call();
    sync(&explorer);
    pool.run_until_stalled();
    reply_root.send(Ok(listing("0"))).expect("send root");
    pool.run_until_stalled();

    let reply_10 = service.expect_call();
    nav.push("10");
    sync(&explorer);
    pool.run_until_stalled();
    assert!(explorer.list().loading);

    nav.back();
    sync(&explorer);
    pool.run_until_stalled();
    assert_eq!(explorer.list().data, Some(listing("0")));
    assert!(!explorer.list().loading);

    reply_10.send(Ok(listing("10"))).expect("send 10");
    pool.run_until_stalled();
    assert_eq!(explorer.list().data, Some(listing("0")));
    assert_eq!(service.called_cids(), vec!["0", "10"]);
}

#[test]
fn query_nav_dispose_unwinds_exactly_its_history_segment() {
    let history = MemoryHistory::new(RouteLocation::new("/drive/77"));
    let source = QueryNavSource::new(history.clone(), "dialog_cid", "0", || {});
    source.push("1");
    source.push("2");
    assert_eq!(history.current_location().query_value("dialog_cid"), Some("2"));

    source.dispose();
    assert_eq!(history.back_steps(), 3);
    assert_eq!(history.go_calls(), vec![-3]);
    assert_eq!(history.current_location(), RouteLocation::new("/drive/77"));
}

#[test]
fn dialog_browser_restores_parent_directory_on_back() {
    let history = MemoryHistory::new(RouteLocation::new("/drive/77"));
    let config = ExplorerConfig::default();
    let nav = Rc::new(QueryNavSource::from_config(history.clone(), &config, "0", || {}));
    let list = ScriptedDriveListService::default();
    let explorer = Explorer::new(
        nav.clone(),
        services(Rc::new(list.clone())),
        &ExplorerConfig::default(),
    );

    list.queue_directory(Ok(listing("0")));
    block_on(explorer.sync());
    nav.push("1");
    list.queue_directory(Ok(listing("1")));
    block_on(explorer.sync());

    assert!(nav.back());
    block_on(explorer.sync());
    assert_eq!(list.call_count(), 2);
    assert_eq!(explorer.list().data, Some(listing("0")));
    assert_eq!(explorer.nav_state().area, None);
}

#[test]
fn area_switch_with_pending_fetch_never_caches_the_other_area() {
    let history = MemoryHistory::new(RouteLocation::new("/drive/10"));
    let nav = Rc::new(PathNavSource::from_config(
        history.clone(),
        &ExplorerConfig::default(),
    ));
    let service = DeferredListService::default();
    let explorer = Rc::new(Explorer::new(
        nav.clone(),
        services(Rc::new(service.clone())),
        &ExplorerConfig::default(),
    ));
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let sync = |explorer: &Rc<Explorer>| {
        let explorer = explorer.clone();
        spawner
            .spawn_local(async move { explorer.sync().await })
            .expect("spawn");
    };

    let reply_all = service.expect_call();
    sync(&explorer);
    pool.run_until_stalled();
    reply_all.send(Ok(listing("10"))).expect("send all:10");
    pool.run_until_stalled();
    assert!(explorer.is_cached(Some(Area::All), "10"));

    let _pending_star = service.expect_call();
    history.push(RouteLocation::new("/drive/star/10"));
    assert!(nav.on_route_change());
    sync(&explorer);
    pool.run_until_stalled();
    assert!(explorer.list().loading);

    let reply_star_20 = service.expect_call();
    history.push(RouteLocation::new("/drive/star/20"));
    assert!(nav.on_route_change());
    sync(&explorer);
    pool.run_until_stalled();
    assert!(!explorer.is_cached(Some(Area::Star), "10"));
    reply_star_20.send(Ok(listing("20"))).expect("send star:20");
    pool.run_until_stalled();

    let mut starred = listing("10");
    starred.count = 7;
    let reply_star_10 = service.expect_call();
    history.go(-1);
    assert!(nav.on_route_change());
    assert_eq!(nav.nav_state().area, Some(Area::Star));
    sync(&explorer);
    pool.run_until_stalled();
    assert!(explorer.list().loading);
    reply_star_10.send(Ok(starred.clone())).expect("send star:10");
    pool.run_until_stalled();

    assert_eq!(service.called_cids(), vec!["10", "10", "20", "10"]);
    assert_eq!(explorer.list().data, Some(starred));
}
