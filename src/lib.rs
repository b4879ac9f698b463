//! Falling Planet - a five-lane rhythm mini-game
//!
//! Core modules:
//! - `sim`: Simulation engine (spawning, falling, hit/miss resolution, scoring)
//! - `renderer`: Render surface and WebGPU pipeline
//! - `platform`: Capability profile, input adapter, fullscreen controller
//! - `overlay`: Game-over summary
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod overlay;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of lanes
    pub const LANES: usize = 5;

    /// Trigger key per lane (lowercase)
    pub const LANE_KEYS: [char; LANES] = ['a', 's', 'd', 'f', 'g'];

    /// Lane colors (RGBA, linear)
    pub const LANE_COLORS: [[f32; 4]; LANES] = [
        [1.0, 0.42, 0.42, 1.0], // coral
        [0.31, 0.80, 0.77, 1.0], // teal
        [0.27, 0.72, 0.82, 1.0], // sky
        [0.59, 0.81, 0.71, 1.0], // mint
        [1.0, 0.92, 0.65, 1.0], // sand
    ];

    /// Minimum time between spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 800.0;
    /// Probability that a spawn happens once the interval has elapsed
    pub const SPAWN_CHANCE: f64 = 0.4;

    /// Spawn position (percent of play-field height, above the visible area)
    pub const SPAWN_Y: f32 = -10.0;
    /// Objects past this position have fallen through the hit zone
    pub const MISS_THRESHOLD_Y: f32 = 105.0;
    /// Center of the hit zone
    pub const HIT_ZONE_Y: f32 = 90.0;

    /// Misses that end the run
    pub const MISS_LIMIT: u32 = 3;
    /// Points per successful hit
    pub const POINTS_PER_HIT: u64 = 25;
    /// Hit-zone glow duration after a hit or swing (ms)
    pub const GLOW_DURATION_MS: f32 = 200.0;

    /// Falling object diameter (px)
    pub const OBJECT_SIZE: f32 = 30.0;

    /// Level 1 fall speed (percent per tick)
    pub const BASE_SPEED: f32 = 1.0;
    /// Speed added per level
    pub const SPEED_PER_LEVEL: f32 = 0.3;
    /// Seconds of play per level
    pub const LEVEL_DURATION_S: u32 = 10;

    /// Frames closer together than this are skipped (~60 Hz simulation)
    pub const MIN_FRAME_INTERVAL_MS: f64 = 16.0;
    /// Upper bound on a single frame delta (tab switches, debugger pauses)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Cadence of the elapsed-time clock (ms)
    pub const CLOCK_INTERVAL_MS: i32 = 1000;
}

/// Look up the lane bound to a key (case-insensitive)
#[inline]
pub fn lane_for_key(key: &str) -> Option<usize> {
    let mut chars = key.chars();
    let c = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }
    consts::LANE_KEYS.iter().position(|&k| k == c)
}

/// Color of a lane (white for out-of-range lanes)
#[inline]
pub fn lane_color(lane: usize) -> [f32; 4] {
    consts::LANE_COLORS
        .get(lane)
        .copied()
        .unwrap_or([1.0, 1.0, 1.0, 1.0])
}
