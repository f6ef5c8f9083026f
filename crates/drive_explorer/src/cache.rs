//! Bounded LRU of directory listings and their saved scroll offsets.

use std::num::NonZeroUsize;

use drive_host::ListingPayload;
use lru::LruCache;

/// Default number of directories kept in a [`DirectoryCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
/// Cached listing for one `area:cid` key.
pub struct CacheEntry {
    /// Last successfully fetched listing.
    pub data: ListingPayload,
    /// Scroll offset recorded when the user last left the directory.
    pub scroll_top: f64,
}

impl CacheEntry {
    pub fn new(data: ListingPayload) -> Self {
        Self {
            data,
            scroll_top: 0.0,
        }
    }
}

/// Strict LRU keyed by [`drive_host::cache_key`].
///
/// Reads through [`DirectoryCache::get`] and writes through [`DirectoryCache::set`] both promote
/// the key to most-recently-used; inserting past capacity evicts the least-recently-used key.
#[derive(Debug)]
pub struct DirectoryCache {
    entries: LruCache<String, CacheEntry>,
}

impl DirectoryCache {
    /// Creates a cache bounded at `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Returns the entry for `key`, promoting it to most-recently-used.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Returns the entry for `key` without touching recency.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.peek(key)
    }

    /// Inserts or overwrites `key`, promoting it and evicting the LRU key when full.
    pub fn set(&mut self, key: impl Into<String>, entry: CacheEntry) {
        self.entries.put(key.into(), entry);
    }

    /// Records the scroll offset for `key` when leaving that directory.
    ///
    /// An existing entry keeps its data and gets the new offset. Without one, `fallback` seeds a
    /// new entry; with neither, nothing is stored. Returns whether an entry now holds `top`.
    pub fn save_scroll(
        &mut self,
        key: &str,
        top: f64,
        fallback: Option<&ListingPayload>,
    ) -> bool {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.scroll_top = top;
            return true;
        }
        let Some(data) = fallback else {
            return false;
        };
        self.entries.put(
            key.to_string(),
            CacheEntry {
                data: data.clone(),
                scroll_top: top,
            },
        );
        true
    }

    /// Removes `key`; absent keys are ignored.
    pub fn invalidate(&mut self, key: &str) -> Option<CacheEntry> {
        self.entries.pop(key)
    }

    /// Empties the cache.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Keys from most- to least-recently-used.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
