//! `window.history` adapter with a persisted position counter.
//!
//! Every entry pushed through [`BrowserHistory`] stores `{ position }` in its history state, the
//! same convention the host router uses, so positions keep increasing across pushes and survive
//! back/forward traversal.

use std::collections::BTreeMap;

use drive_host::{HistoryNavigator, PositionSource, RouteLocation};

#[cfg(target_arch = "wasm32")]
use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
const POSITION_KEY: &str = "position";

#[derive(Debug, Clone, Copy, Default)]
/// Browser history navigator backed by `window.history` and `window.location`.
pub struct BrowserHistory;

#[cfg(target_arch = "wasm32")]
fn browser_history() -> Option<web_sys::History> {
    web_sys::window()?.history().ok()
}

impl PositionSource for BrowserHistory {
    fn current_position(&self) -> i64 {
        #[cfg(target_arch = "wasm32")]
        {
            browser_history()
                .and_then(|history| history.state().ok())
                .and_then(|state| js_sys::Reflect::get(&state, &JsValue::from_str(POSITION_KEY)).ok())
                .and_then(|position| position.as_f64())
                .map_or(0, |position| position as i64)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            0
        }
    }
}

impl HistoryNavigator for BrowserHistory {
    fn current_location(&self) -> RouteLocation {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(location) = web_sys::window().map(|window| window.location()) else {
                return RouteLocation::default();
            };
            let path = location.pathname().unwrap_or_default();
            let search = location.search().unwrap_or_default();
            parse_location(&path, &search)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            RouteLocation::default()
        }
    }

    fn push(&self, location: RouteLocation) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(history) = browser_history() else {
                return;
            };
            let state = js_sys::Object::new();
            let position = self.current_position() + 1;
            if let Err(err) = js_sys::Reflect::set(
                &state,
                &JsValue::from_str(POSITION_KEY),
                &JsValue::from_f64(position as f64),
            ) {
                logging::warn!("history position state write failed: {err:?}");
            }
            let url = format_location(&location);
            if let Err(err) = history.push_state_with_url(&state, "", Some(&url)) {
                logging::warn!("history push to {url} failed: {err:?}");
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = location;
        }
    }

    fn go(&self, delta: i64) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(history) = browser_history() {
                let delta = delta.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
                if let Err(err) = history.go_with_delta(delta) {
                    logging::warn!("history go({delta}) failed: {err:?}");
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = delta;
        }
    }
}

/// Builds a [`RouteLocation`] from `location.pathname` and `location.search`.
pub fn parse_location(path: &str, search: &str) -> RouteLocation {
    let query = search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect::<BTreeMap<_, _>>();
    RouteLocation {
        path: if path.is_empty() { "/".to_string() } else { path.to_string() },
        query,
    }
}

/// Formats a [`RouteLocation`] as a same-origin URL (`path?key=value`).
pub fn format_location(location: &RouteLocation) -> String {
    if location.query.is_empty() {
        return location.path.clone();
    }
    let query = location
        .query
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{query}", location.path)
}

fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::decode_uri_component(&raw)
            .map(String::from)
            .unwrap_or(raw)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        raw
    }
}

fn encode_component(raw: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        String::from(js_sys::encode_uri_component(raw))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        raw.to_string()
    }
}
