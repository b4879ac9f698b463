//! Data-driven game balance
//!
//! Every gameplay number the engine uses lives here. Defaults come from
//! [`crate::consts`]; a page can override any subset with a JSON blob.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Hit tolerance window parameters
///
/// `window = (base + speed * per_speed) * (touch_multiplier on touch platforms)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Window half-width for a motionless object (percent)
    pub base: f32,
    /// Extra half-width per unit of fall speed
    pub per_speed: f32,
    /// Widening factor for touch input
    pub touch_multiplier: f32,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            base: 8.0,
            per_speed: 4.0,
            touch_multiplier: 1.5,
        }
    }
}

impl Tolerance {
    /// Window half-width for an object falling at `speed`
    pub fn window(&self, speed: f32, touch: bool) -> f32 {
        let window = self.base + speed.max(0.0) * self.per_speed;
        if touch {
            window * self.touch_multiplier.max(1.0)
        } else {
            window
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    pub spawn_interval_ms: f64,
    pub spawn_chance: f64,
    pub spawn_y: f32,
    pub object_size: f32,

    // === Judging ===
    pub hit_zone_y: f32,
    pub miss_threshold_y: f32,
    pub miss_limit: u32,
    pub points_per_hit: u64,
    pub glow_duration_ms: f32,
    pub tolerance: Tolerance,

    // === Progression ===
    pub base_speed: f32,
    pub speed_per_level: f32,
    pub level_duration_s: u32,

    // === Frame pacing ===
    pub min_frame_interval_ms: f64,
    pub max_frame_delta_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_chance: SPAWN_CHANCE,
            spawn_y: SPAWN_Y,
            object_size: OBJECT_SIZE,

            hit_zone_y: HIT_ZONE_Y,
            miss_threshold_y: MISS_THRESHOLD_Y,
            miss_limit: MISS_LIMIT,
            points_per_hit: POINTS_PER_HIT,
            glow_duration_ms: GLOW_DURATION_MS,
            tolerance: Tolerance::default(),

            base_speed: BASE_SPEED,
            speed_per_level: SPEED_PER_LEVEL,
            level_duration_s: LEVEL_DURATION_S,

            min_frame_interval_ms: MIN_FRAME_INTERVAL_MS,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Parse an override, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning override ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Clamp values that would break engine invariants
    fn sanitized(mut self) -> Self {
        self.spawn_chance = self.spawn_chance.clamp(0.0, 1.0);
        self.miss_limit = self.miss_limit.max(1);
        self.level_duration_s = self.level_duration_s.max(1);
        self.glow_duration_ms = self.glow_duration_ms.max(0.0);
        self.max_frame_delta_ms = self.max_frame_delta_ms.max(self.min_frame_interval_ms);
        // Spawned objects must start above the miss threshold
        if self.spawn_y >= self.miss_threshold_y {
            self.spawn_y = SPAWN_Y.min(self.miss_threshold_y - 1.0);
        }
        self
    }

    /// DOM id of the optional JSON tuning element
    pub const ELEMENT_ID: &'static str = "game-tuning";

    /// Load tuning from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::platform::read_json_element(Self::ELEMENT_ID) {
            Some(json) => Self::from_json_or_default(&json),
            None => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Level reached after `elapsed_s` seconds of play (1-based)
    #[inline]
    pub fn level_for(&self, elapsed_s: u32) -> u32 {
        elapsed_s / self.level_duration_s.max(1) + 1
    }

    /// Fall speed of objects spawned at `level`
    #[inline]
    pub fn speed_for(&self, level: u32) -> f32 {
        self.base_speed + level.saturating_sub(1) as f32 * self.speed_per_level
    }
}
