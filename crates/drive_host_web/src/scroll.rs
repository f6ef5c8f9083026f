//! DOM element scroll adapter.

use drive_host::ScrollSurface;

#[cfg(target_arch = "wasm32")]
use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone)]
/// Scroll surface backed by the element with a given DOM id.
///
/// The element is looked up on every call, so the surface may be created before the list
/// container is mounted.
pub struct ElementScrollSurface {
    element_id: String,
}

impl ElementScrollSurface {
    /// Creates a surface for the element with id `element_id`.
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    /// Returns the DOM id this surface scrolls.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    #[cfg(target_arch = "wasm32")]
    fn element(&self) -> Option<web_sys::Element> {
        web_sys::window()?
            .document()?
            .get_element_by_id(&self.element_id)
    }
}

#[cfg(target_arch = "wasm32")]
fn request_frame(callback: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(callback);
    if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
        logging::warn!("requestAnimationFrame failed: {err:?}");
    }
}

impl ScrollSurface for ElementScrollSurface {
    fn scroll_top(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            self.element()
                .map_or(0.0, |element| f64::from(element.scroll_top()))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            0.0
        }
    }

    fn set_scroll_top(&self, top: f64) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(element) = self.element() {
                element.set_scroll_top(top.round() as i32);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = top;
        }
    }

    fn restore_after_paint(&self, top: f64) {
        #[cfg(target_arch = "wasm32")]
        {
            // The first frame lays out the restored rows; the second runs after they painted.
            let surface = self.clone();
            request_frame(move || request_frame(move || surface.set_scroll_top(top)));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = top;
        }
    }
}
