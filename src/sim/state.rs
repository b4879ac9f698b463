//! Run state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::LANES;
use crate::lane_color;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// No run in progress
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended by reaching the miss limit
    GameOver,
}

/// A planet falling down one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub lane: usize,
    /// Percent of play-field height; negative is above the visible area
    pub y: f32,
    /// Percent per tick
    pub speed: f32,
    /// Diameter in px
    pub size: f32,
    pub color: [f32; 4],
}

impl FallingObject {
    pub fn new(id: u32, lane: usize, y: f32, speed: f32, size: f32) -> Self {
        debug_assert!(lane < LANES);
        Self {
            id,
            lane,
            y,
            speed,
            size,
            color: lane_color(lane),
        }
    }

    /// Copy of this object moved down by one tick
    #[inline]
    pub fn advanced(&self) -> Self {
        Self {
            y: self.y + self.speed,
            ..self.clone()
        }
    }
}

/// Per-lane target area with a short glow after every press
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitZone {
    pub lane: usize,
    pub active: bool,
    /// Glow time remaining (ms)
    pub timer: f32,
}

impl HitZone {
    pub fn new(lane: usize) -> Self {
        Self {
            lane,
            active: false,
            timer: 0.0,
        }
    }

    /// Copy of this zone with the glow restarted
    pub fn flashed(self, duration_ms: f32) -> Self {
        let timer = duration_ms.max(0.0);
        Self {
            timer,
            active: timer > 0.0,
            ..self
        }
    }

    /// Copy of this zone with `dt_ms` of glow burned off
    pub fn decayed(self, dt_ms: f32) -> Self {
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        let timer = (self.timer - dt).max(0.0);
        Self {
            timer,
            active: timer > 0.0,
            ..self
        }
    }

    /// One idle zone per lane
    pub fn all_idle() -> Vec<HitZone> {
        (0..LANES).map(HitZone::new).collect()
    }
}

/// Something the shell should react to (sound, overlay)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Object hit in a lane
    Hit { lane: usize, id: u32, points: u64 },
    /// Lane pressed with nothing in range
    SwingMiss { lane: usize },
    /// Object fell through its lane
    Missed { lane: usize, id: u32 },
    /// Miss limit reached; carries the final run
    GameOver(Snapshot),
}

/// RNG state wrapper
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
    rng: Pcg32,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

/// The authoritative session
#[derive(Debug, Clone)]
pub struct RunState {
    pub phase: RunPhase,
    pub score: u64,
    /// Whole seconds since the run started
    pub elapsed_s: u32,
    pub level: u32,
    pub missed: u32,
    /// Consecutive hits since the last fall-through miss
    pub combo: u32,
    pub best_combo: u32,
    pub hits: u32,
    /// Live objects (sorted by id)
    pub objects: Vec<FallingObject>,
    /// One zone per lane, indexed by lane
    pub hit_zones: Vec<HitZone>,
    /// Speed given to newly spawned objects
    pub spawn_speed: f32,
    pub rng: RngState,
    /// Timestamps (ms, host clock)
    pub started_at: f64,
    pub last_spawn_at: f64,
    pub last_frame_at: Option<f64>,
    /// Set once the game-over event has been emitted for this run
    pub game_over_emitted: bool,
    next_id: u32,
}

impl RunState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64, base_speed: f32) -> Self {
        Self {
            phase: RunPhase::Idle,
            score: 0,
            elapsed_s: 0,
            level: 1,
            missed: 0,
            combo: 0,
            best_combo: 0,
            hits: 0,
            objects: Vec::new(),
            hit_zones: HitZone::all_idle(),
            spawn_speed: base_speed,
            rng: RngState::new(seed),
            started_at: 0.0,
            last_spawn_at: 0.0,
            last_frame_at: None,
            game_over_emitted: false,
            next_id: 0,
        }
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Allocate a new object ID
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Reset everything a run owns; keeps the RNG stream and the id counter
    pub fn reset(&mut self, now: f64, base_speed: f32) {
        self.score = 0;
        self.elapsed_s = 0;
        self.level = 1;
        self.missed = 0;
        self.combo = 0;
        self.best_combo = 0;
        self.hits = 0;
        self.objects = Vec::new();
        self.hit_zones = HitZone::all_idle();
        self.spawn_speed = base_speed;
        self.started_at = now;
        self.last_spawn_at = now;
        self.last_frame_at = None;
        self.game_over_emitted = false;
    }

    /// Immutable view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            running: self.running(),
            score: self.score,
            elapsed_s: self.elapsed_s,
            level: self.level,
            missed: self.missed,
            combo: self.combo,
            best_combo: self.best_combo,
            hits: self.hits,
            objects: self.objects.clone(),
            hit_zones: self.hit_zones.clone(),
        }
    }
}

/// Immutable view of a run at one point in time
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub running: bool,
    pub score: u64,
    pub elapsed_s: u32,
    pub level: u32,
    pub missed: u32,
    pub combo: u32,
    pub best_combo: u32,
    pub hits: u32,
    pub objects: Vec<FallingObject>,
    pub hit_zones: Vec<HitZone>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_decay_clamps_at_zero() {
        let zone = HitZone::new(2).flashed(200.0);
        assert!(zone.active);
        let zone = zone.decayed(150.0);
        assert!(zone.active);
        assert!((zone.timer - 50.0).abs() < 1e-4);
        let zone = zone.decayed(80.0);
        assert!(!zone.active);
        assert_eq!(zone.timer, 0.0);
    }

    #[test]
    fn zone_decay_ignores_bad_deltas() {
        let zone = HitZone::new(0).flashed(200.0);
        assert_eq!(zone.decayed(f32::NAN).timer, 200.0);
        assert_eq!(zone.decayed(-5.0).timer, 200.0);
    }

    #[test]
    fn object_color_follows_lane() {
        let obj = FallingObject::new(1, 3, -10.0, 1.0, 30.0);
        assert_eq!(obj.color, crate::consts::LANE_COLORS[3]);
        assert!((obj.advanced().y - -9.0).abs() < 1e-6);
    }

    #[test]
    fn ids_are_monotonic() {
        let mut state = RunState::new(1, 1.0);
        let a = state.next_object_id();
        let b = state.next_object_id();
        assert!(b > a);
    }
}
