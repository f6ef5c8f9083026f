use drive_host::{cache_key, Area, ROOT_CID};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// How the current navigation state was reached relative to the previous one.
pub enum NavDirection {
    /// A new history entry was pushed.
    Forward,
    /// The user moved back through history.
    Back,
    /// The entry was replaced or the position did not change.
    #[default]
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where a file browser currently is.
pub struct NavState {
    /// Current directory cid (`"0"` for the root).
    pub cid: String,
    /// Current area, or `None` for sources that do not track one.
    pub area: Option<Area>,
    /// Direction of the navigation that produced this state.
    pub direction: NavDirection,
}

impl NavState {
    pub fn new(cid: impl Into<String>, area: Option<Area>, direction: NavDirection) -> Self {
        Self {
            cid: cid.into(),
            area,
            direction,
        }
    }

    /// Directory cache key; direction does not participate.
    pub fn cache_key(&self) -> String {
        cache_key(self.area, &self.cid)
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new(ROOT_CID, None, NavDirection::Replace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The tuple the explorer watches to decide between restore and fetch.
pub struct WatchKey {
    pub cid: String,
    pub area: Option<Area>,
    pub page: u32,
    pub size: u32,
    /// Active search keyword; `None` outside search mode.
    pub keyword: Option<String>,
}

impl WatchKey {
    pub fn cache_key(&self) -> String {
        cache_key(self.area, &self.cid)
    }

    pub fn is_searching(&self) -> bool {
        self.keyword.as_deref().is_some_and(|kw| !kw.is_empty())
    }

    pub(crate) fn same_directory(&self, other: &WatchKey) -> bool {
        self.cid == other.cid && self.area == other.area
    }
}
