//! Browser side of the platform layer (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::fullscreen::{FullscreenHost, PlatformError, mobile_area_height};

const VIEWPORT_PINNED: &str = "width=device-width, initial-scale=1.0, maximum-scale=1.0, \
     user-scalable=no, viewport-fit=cover";
const VIEWPORT_DEFAULT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=5.0, user-scalable=yes";

/// Container styles applied in simulated fullscreen
const PINNED_STYLES: [(&str, &str); 6] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100vw"),
    ("height", "100vh"),
    ("z-index", "9999"),
];

fn to_platform_error(err: wasm_bindgen::JsValue) -> PlatformError {
    PlatformError::Rejected(format!("{:?}", err))
}

fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

/// Lock or restore page scrolling (`overflow` on body and html)
pub fn set_page_scroll_locked(document: &Document, locked: bool) {
    let value = if locked { "hidden" } else { "unset" };
    if let Some(body) = document.body() {
        let _ = body.style().set_property("overflow", value);
    }
    if let Some(html) = document
        .document_element()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = html.style().set_property("overflow", value);
    }
}

/// Fullscreen host backed by the document
pub struct DomFullscreenHost {
    document: Document,
    /// Id of the element that goes fullscreen
    container_id: String,
    /// Id of the play field sized for mobile fullscreen
    game_area_id: String,
    /// `document.fullscreenEnabled`, read once at startup
    native_supported: bool,
}

impl DomFullscreenHost {
    pub fn new(
        document: Document,
        container_id: &str,
        game_area_id: &str,
        native_supported: bool,
    ) -> Self {
        Self {
            document,
            container_id: container_id.to_string(),
            game_area_id: game_area_id.to_string(),
            native_supported,
        }
    }

    fn container(&self) -> Option<HtmlElement> {
        html_element(&self.document, &self.container_id)
    }

    fn set_viewport(&self, content: &str) {
        if let Ok(Some(meta)) = self.document.query_selector("meta[name=viewport]") {
            let _ = meta.set_attribute("content", content);
        }
    }

    fn set_body_class(&self, class: &str, on: bool) {
        if let Some(body) = self.document.body() {
            let _ = body.class_list().toggle_with_force(class, on);
        }
    }
}

impl FullscreenHost for DomFullscreenHost {
    fn native_supported(&self) -> bool {
        self.native_supported
    }

    fn native_active(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_native(&mut self) -> Result<(), PlatformError> {
        let container = self.container().ok_or(PlatformError::Unsupported)?;
        container.request_fullscreen().map_err(to_platform_error)
    }

    fn exit_native(&mut self) -> Result<(), PlatformError> {
        if self.native_active() {
            self.document.exit_fullscreen();
        }
        Ok(())
    }

    fn pin_viewport(&mut self) {
        self.set_body_class("mobile-fullscreen", true);
        self.set_viewport(VIEWPORT_PINNED);
        set_page_scroll_locked(&self.document, true);

        if let Some(container) = self.container() {
            let style = container.style();
            for (name, value) in PINNED_STYLES {
                let _ = style.set_property(name, value);
            }
        }

        // Nudge mobile browsers into hiding the address bar
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 1.0);
        }
    }

    fn unpin_viewport(&mut self) {
        self.set_body_class("mobile-fullscreen", false);
        self.set_viewport(VIEWPORT_DEFAULT);
        set_page_scroll_locked(&self.document, false);

        if let Some(container) = self.container() {
            let style = container.style();
            for (name, _) in PINNED_STYLES {
                let _ = style.remove_property(name);
            }
        }
    }

    fn fit_game_area(&mut self) {
        let Some(inner_height) = web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
        else {
            return;
        };
        if let Some(area) = html_element(&self.document, &self.game_area_id) {
            let height = format!("{}px", mobile_area_height(inner_height));
            let _ = area.style().set_property("height", &height);
        }
    }

    fn finish_cleanup(&mut self) {
        if let Some(area) = html_element(&self.document, &self.game_area_id) {
            let _ = area.style().remove_property("height");
        }
    }

    fn mark_active(&mut self, active: bool) {
        self.set_body_class("fullscreen-active", active);
    }
}
