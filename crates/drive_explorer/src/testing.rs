use drive_host::{DriveEntry, ListingKind, ListingPayload, PathEntry, ROOT_CID};

pub(crate) fn entry(parent: &str, index: u32) -> DriveEntry {
    DriveEntry {
        id: format!("{parent}-{index}"),
        parent_cid: parent.to_string(),
        name: format!("file {index}"),
        is_dir: false,
        size: Some(1024),
        pick_code: None,
        starred: false,
        updated_at: None,
    }
}

pub(crate) fn listing(cid: &str, rows: u32) -> ListingPayload {
    let mut path = vec![PathEntry::new(ROOT_CID, "root")];
    if cid != ROOT_CID {
        path.push(PathEntry::new(cid, format!("dir {cid}")));
    }
    ListingPayload {
        kind: ListingKind::Listing,
        cid: cid.to_string(),
        entries: (0..rows).map(|i| entry(cid, i)).collect(),
        path,
        count: u64::from(rows),
        offset: 0,
        limit: 115,
        sort: None,
    }
}

pub(crate) fn search_results(cid: &str, rows: u32) -> ListingPayload {
    ListingPayload {
        kind: ListingKind::Search,
        path: Vec::new(),
        ..listing(cid, rows)
    }
}
