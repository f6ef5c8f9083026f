//! Listing data types shared across drive host contracts and implementations.

use serde::{Deserialize, Serialize};

/// Cid of the drive root directory.
pub const ROOT_CID: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Named view filter over the directory tree.
pub enum Area {
    /// Every file in the drive.
    #[default]
    All,
    /// Starred files only.
    Star,
    /// Recently touched files.
    Recent,
    /// Recycle bin.
    Trash,
    /// Shared links.
    Share,
    /// Keyword search results.
    Search,
}

impl Area {
    /// Every known area keyword, in routing order.
    pub const ALL: [Area; 6] = [
        Self::All,
        Self::Star,
        Self::Recent,
        Self::Trash,
        Self::Share,
        Self::Search,
    ];

    /// Returns the stable route/cache token for the area.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Star => "star",
            Self::Recent => "recent",
            Self::Trash => "trash",
            Self::Share => "share",
            Self::Search => "search",
        }
    }

    /// Parses a route segment into a known area keyword.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|area| area.as_str() == raw)
    }
}

/// Builds the directory cache key for an `(area, cid)` pair.
///
/// A missing area normalizes to `all` and an empty cid normalizes to the root cid.
pub fn cache_key(area: Option<Area>, cid: &str) -> String {
    let area = area.unwrap_or_default().as_str();
    let cid = if cid.is_empty() { ROOT_CID } else { cid };
    format!("{area}:{cid}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Sortable listing columns understood by the drive backend.
pub enum SortColumn {
    /// Sort by file name.
    FileName,
    /// Sort by file size.
    FileSize,
    /// Sort by file type/extension.
    FileType,
    /// Sort by upload time.
    UserPtime,
    /// Sort by last-modified time.
    UserUtime,
}

impl SortColumn {
    /// Every known column, in backend token order.
    pub const ALL: [SortColumn; 5] = [
        Self::FileName,
        Self::FileSize,
        Self::FileType,
        Self::UserPtime,
        Self::UserUtime,
    ];

    /// Parses a backend `o` token. Unknown tokens yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.as_str() == raw)
    }

    /// Returns the backend `o` query token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FileName => "file_name",
            Self::FileSize => "file_size",
            Self::FileType => "file_type",
            Self::UserPtime => "user_ptime",
            Self::UserUtime => "user_utime",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Complete sort preference for one directory listing.
pub struct SortSpec {
    /// Column to sort on.
    pub order: SortColumn,
    /// Ascending when `true`.
    pub asc: bool,
    /// Mix folders and files when `true` instead of listing folders first.
    pub fc_mix: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One file or folder row in a listing.
pub struct DriveEntry {
    /// File id, or the folder cid for directories.
    pub id: String,
    /// Cid of the containing directory.
    pub parent_cid: String,
    /// Display name.
    pub name: String,
    /// Whether the row is a folder.
    pub is_dir: bool,
    /// Size in bytes (files only).
    pub size: Option<u64>,
    /// Pick code used by download/playback endpoints.
    pub pick_code: Option<String>,
    /// Whether the row is starred.
    pub starred: bool,
    /// Last-modified time as reported by the backend.
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One breadcrumb segment.
pub struct PathEntry {
    /// Directory cid.
    pub cid: String,
    /// Directory display name.
    pub name: String,
}

impl PathEntry {
    /// Builds a breadcrumb segment.
    pub fn new(cid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Which endpoint produced a [`ListingPayload`].
pub enum ListingKind {
    /// Directory listing (primary or legacy endpoint).
    Listing,
    /// Keyword search results.
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Successful listing or search response.
pub struct ListingPayload {
    /// Endpoint discriminant set by the list service.
    pub kind: ListingKind,
    /// Directory the listing was produced for.
    pub cid: String,
    /// Rows on the requested page.
    pub entries: Vec<DriveEntry>,
    /// Breadcrumb path from the root (empty for search results).
    pub path: Vec<PathEntry>,
    /// Total row count across all pages.
    pub count: u64,
    /// Row offset of the first returned entry.
    pub offset: u32,
    /// Page size the server applied.
    pub limit: u32,
    /// Server-reported sort, when present.
    pub sort: Option<SortSpec>,
}

impl ListingPayload {
    /// Returns the 1-based page this payload represents.
    pub fn page(&self) -> u32 {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Logical or transport listing failure.
pub struct ListFailure {
    /// Human-readable error message.
    pub message: String,
    /// Sort column the server reported alongside the failure.
    pub order: Option<SortColumn>,
    /// Sort direction the server reported alongside the failure.
    pub asc: Option<bool>,
    /// `true` when the server answered but reported `state: false`.
    #[serde(default)]
    pub logical: bool,
}

impl ListFailure {
    /// Builds a transport-level failure that carries no server sort hints.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            order: None,
            asc: None,
            logical: false,
        }
    }

    /// Builds a logical failure (a reply with a falsy `state`) without sort hints.
    pub fn logical(message: impl Into<String>) -> Self {
        Self {
            logical: true,
            ..Self::message(message)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Directory listing request parameters.
pub struct ListQuery {
    /// Directory to list.
    pub cid: String,
    /// Area filter applied to the listing.
    pub area: Area,
    /// Row offset.
    pub offset: u32,
    /// Page size.
    pub limit: u32,
    /// Requested sort column, or the directory's stored preference when `None`.
    pub order: Option<SortColumn>,
    /// Requested sort direction.
    pub asc: Option<bool>,
    /// Requested folder/file mixing.
    pub fc_mix: Option<bool>,
}

impl ListQuery {
    /// Returns a copy that replaces the sort with server-reported hints, keeping unknown fields.
    pub fn with_sort_hints(&self, order: Option<SortColumn>, asc: Option<bool>) -> Self {
        Self {
            order: order.or(self.order),
            asc: asc.or(self.asc),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Keyword search request parameters.
pub struct SearchQuery {
    /// Directory the search is scoped to.
    pub cid: String,
    /// Search keyword.
    pub keyword: String,
    /// Row offset.
    pub offset: u32,
    /// Page size.
    pub limit: u32,
}
