//! Player preferences
//!
//! Read once from the host page; never written back.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no glow pulse, no pressed scale)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// DOM id of the optional JSON settings element
    pub const ELEMENT_ID: &'static str = "game-settings";

    /// Parse settings JSON, falling back to defaults
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
                settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
                log::info!("Loaded settings from page");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Effective volume for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Whether hit-zone glow should pulse
    pub fn glow_pulse(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::read_json_element(Self::ELEMENT_ID) {
            Some(json) => Self::from_json_or_default(&json),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
