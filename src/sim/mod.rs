//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Host timestamps come in as arguments, never read from a clock
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No rendering, audio or platform dependencies

pub mod engine;
pub mod hit;
pub mod state;
pub mod tick;

pub use engine::Engine;
pub use hit::find_target;
pub use state::{FallingObject, GameEvent, HitZone, RunPhase, RunState, Snapshot};
pub use tick::{clock, tick};
