//! Explorer configuration loaded from preference storage.

use drive_host::{load_pref_with, PrefsStore, EXPLORER_CONFIG_KEY, PAGE_SIZE_PREF_KEY};
use leptos::logging;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{cache::DEFAULT_CACHE_CAPACITY, page::DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for one explorer instance. Every field has a default.
pub struct ExplorerConfig {
    /// Directories kept in the LRU cache.
    pub cache_capacity: usize,
    /// Rows per page when no page size was persisted.
    pub page_size: u32,
    /// Route prefix of the primary drive view.
    pub drive_route_prefix: String,
    /// Query parameter used by dialog-embedded browsers.
    pub dialog_query_key: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            page_size: DEFAULT_PAGE_SIZE,
            drive_route_prefix: "/drive".to_string(),
            dialog_query_key: "dialog_cid".to_string(),
        }
    }
}

impl ExplorerConfig {
    /// Loads the stored configuration and the last persisted page size.
    ///
    /// Missing or malformed values fall back to defaults; load failures are logged, never
    /// returned.
    pub async fn load<S: PrefsStore + ?Sized>(prefs: &S) -> Self {
        let mut config = match load_pref_with::<_, Value>(prefs, EXPLORER_CONFIG_KEY).await {
            Ok(Some(value)) => Self::from_value(value).unwrap_or_else(|err| {
                logging::warn!("explorer config ignored: {err}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(err) => {
                logging::warn!("explorer config load failed: {err}");
                Self::default()
            }
        };
        match load_pref_with::<_, u32>(prefs, PAGE_SIZE_PREF_KEY).await {
            Ok(Some(size)) if size > 0 => config.page_size = size,
            Ok(_) => {}
            Err(err) => logging::warn!("page size preference load failed: {err}"),
        }
        config.normalized()
    }

    /// Decodes a stored configuration document, which must be a JSON object.
    fn from_value(value: Value) -> Result<Self, String> {
        if !value.is_object() {
            return Err(format!("expected an object, found {value}"));
        }
        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    fn normalized(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.cache_capacity == 0 {
            self.cache_capacity = DEFAULT_CACHE_CAPACITY;
        }
        if self.dialog_query_key.is_empty() {
            self.dialog_query_key = Self::default().dialog_query_key;
        }
        self
    }
}
