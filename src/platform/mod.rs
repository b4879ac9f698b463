//! Platform abstraction layer
//!
//! Handles browser differences for:
//! - Capability profile (mobile vs desktop, touch, native fullscreen)
//! - Input events (keyboard, mouse, touch)
//! - Fullscreen (native or simulated)

pub mod fullscreen;
pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use fullscreen::{
    FullscreenController, FullscreenHost, FullscreenMode, FullscreenState, FullscreenStrategy,
    PendingCleanup, PlatformError,
};
pub use input::{InputAdapter, InputContext, KeyAction, KeyInput, PressFeedback, route_key};

/// Viewports narrower than this count as mobile (CSS px)
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Environment facts resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Narrow viewport layout
    pub is_mobile: bool,
    /// Touch input available
    pub touch: bool,
    /// `Element.requestFullscreen` is usable
    pub native_fullscreen: bool,
}

impl Capabilities {
    pub fn from_environment(
        viewport_width: f64,
        max_touch_points: i32,
        fullscreen_enabled: bool,
    ) -> Self {
        Self {
            is_mobile: viewport_width < MOBILE_BREAKPOINT_PX,
            touch: max_touch_points > 0,
            native_fullscreen: fullscreen_enabled,
        }
    }

    /// Hit windows widen for touch platforms
    pub fn touch_tolerance(&self) -> bool {
        self.is_mobile || self.touch
    }

    pub fn fullscreen_strategy(&self) -> FullscreenStrategy {
        if self.is_mobile {
            FullscreenStrategy::NativeOrSimulated
        } else {
            FullscreenStrategy::NativeOnly
        }
    }

    /// Read capabilities from the browser (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn detect() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(MOBILE_BREAKPOINT_PX);
        let touch_points = window.navigator().max_touch_points();
        let fullscreen = window
            .document()
            .map(|d| d.fullscreen_enabled())
            .unwrap_or(false);
        let caps = Self::from_environment(width, touch_points, fullscreen);
        log::info!("Capabilities: {:?}", caps);
        caps
    }
}

/// Text of a JSON `<script>` element, if the page provides one
#[cfg(target_arch = "wasm32")]
pub fn read_json_element(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let text = document.get_element_by_id(id)?.text_content()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
