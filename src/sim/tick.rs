//! Per-frame simulation step and the elapsed-time clock
//!
//! A tick runs, in order: spawn, advance, miss detection, hit-zone decay.
//! Miss detection must see post-advance positions.

use rand::Rng;

use super::state::{FallingObject, GameEvent, HitZone, RunPhase, RunState};
use crate::consts::LANES;
use crate::tuning::Tuning;

/// Advance the run by one animation frame at host time `now` (ms)
///
/// Frames closer than `min_frame_interval_ms` to the previous simulated frame
/// are skipped, so fall speed does not depend on the display refresh rate.
pub fn tick(state: &mut RunState, tuning: &Tuning, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !state.running() {
        return events;
    }
    if !now.is_finite() {
        log::warn!("Ignoring frame with non-finite timestamp");
        return events;
    }

    let Some(dt) = frame_delta(state, tuning, now) else {
        return events;
    };

    spawn(state, tuning, now);

    // Advance, then pull out everything that fell through
    let (kept, fallen): (Vec<FallingObject>, Vec<FallingObject>) = state
        .objects
        .iter()
        .map(FallingObject::advanced)
        .partition(|obj| obj.y <= tuning.miss_threshold_y);
    state.objects = kept;

    let mut game_over = false;
    for obj in fallen {
        state.missed = (state.missed + 1).min(tuning.miss_limit);
        state.combo = 0;
        events.push(GameEvent::Missed {
            lane: obj.lane,
            id: obj.id,
        });
        if state.missed >= tuning.miss_limit && !state.game_over_emitted {
            game_over = true;
        }
    }

    state.hit_zones = state
        .hit_zones
        .iter()
        .map(|zone| zone.decayed(dt as f32))
        .collect();

    state.last_frame_at = Some(now);

    if game_over {
        state.phase = RunPhase::GameOver;
        state.game_over_emitted = true;
        log::info!(
            "Game over: score {} at level {} after {}s",
            state.score,
            state.level,
            state.elapsed_s
        );
        events.push(GameEvent::GameOver(state.snapshot()));
    }

    events
}

/// Milliseconds to simulate for this frame, or `None` to skip it
fn frame_delta(state: &mut RunState, tuning: &Tuning, now: f64) -> Option<f64> {
    let Some(last) = state.last_frame_at else {
        return Some(tuning.min_frame_interval_ms);
    };

    let dt = now - last;
    if dt < 0.0 {
        // Host clock went backwards; resync without simulating
        state.last_frame_at = Some(now);
        return None;
    }
    if dt < tuning.min_frame_interval_ms {
        return None;
    }
    Some(dt.min(tuning.max_frame_delta_ms))
}

/// Spawn policy: interval gate, then probability gate
fn spawn(state: &mut RunState, tuning: &Tuning, now: f64) {
    if now - state.last_spawn_at <= tuning.spawn_interval_ms {
        return;
    }
    let rng = state.rng.rng();
    if rng.random::<f64>() >= tuning.spawn_chance {
        return;
    }
    let lane = rng.random_range(0..LANES);

    let id = state.next_object_id();
    let obj = FallingObject::new(id, lane, tuning.spawn_y, state.spawn_speed, tuning.object_size);
    state.objects = state.objects.iter().cloned().chain(std::iter::once(obj)).collect();
    state.last_spawn_at = now;
}

/// The 1-second cadence: recompute elapsed time, level and spawn speed
///
/// Returns true when the level went up.
pub fn clock(state: &mut RunState, tuning: &Tuning, now: f64) -> bool {
    if !state.running() || !now.is_finite() {
        return false;
    }

    let elapsed = ((now - state.started_at) / 1000.0).floor().max(0.0) as u32;
    state.elapsed_s = state.elapsed_s.max(elapsed);

    let level = tuning.level_for(state.elapsed_s).max(state.level);
    let leveled_up = level > state.level;
    state.level = level;
    state.spawn_speed = tuning.speed_for(level);

    if leveled_up {
        log::info!("Level {} (speed {:.1})", level, state.spawn_speed);
    }
    leveled_up
}

/// Restart a lane's glow
pub(crate) fn flash_zone(state: &mut RunState, lane: usize, duration_ms: f32) {
    state.hit_zones = state
        .hit_zones
        .iter()
        .map(|zone| {
            if zone.lane == lane {
                zone.flashed(duration_ms)
            } else {
                *zone
            }
        })
        .collect();
}

/// Idle zones, used when a run ends
pub(crate) fn clear_zones(state: &mut RunState) {
    state.hit_zones = HitZone::all_idle();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state(tuning: &Tuning) -> RunState {
        let mut state = RunState::new(12345, tuning.base_speed);
        state.reset(0.0, tuning.base_speed);
        state.phase = RunPhase::Running;
        state
    }

    fn no_spawn() -> Tuning {
        Tuning {
            spawn_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn idle_state_does_not_tick() {
        let tuning = Tuning::default();
        let mut state = RunState::new(1, tuning.base_speed);
        state.objects.push(FallingObject::new(0, 0, 50.0, 1.0, 30.0));
        assert!(tick(&mut state, &tuning, 100.0).is_empty());
        assert_eq!(state.objects[0].y, 50.0);
    }

    #[test]
    fn objects_fall_by_their_speed() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.objects.push(FallingObject::new(0, 1, 10.0, 1.5, 30.0));
        tick(&mut state, &tuning, 16.0);
        assert!((state.objects[0].y - 11.5).abs() < 1e-5);
        tick(&mut state, &tuning, 32.0);
        assert!((state.objects[0].y - 13.0).abs() < 1e-5);
    }

    #[test]
    fn frames_inside_min_interval_are_skipped() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.objects.push(FallingObject::new(0, 1, 10.0, 1.0, 30.0));
        tick(&mut state, &tuning, 16.0);
        tick(&mut state, &tuning, 20.0);
        assert!((state.objects[0].y - 11.0).abs() < 1e-5);
    }

    #[test]
    fn backwards_clock_resyncs() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.objects.push(FallingObject::new(0, 1, 10.0, 1.0, 30.0));
        tick(&mut state, &tuning, 1000.0);
        tick(&mut state, &tuning, 500.0);
        assert_eq!(state.last_frame_at, Some(500.0));
        assert!((state.objects[0].y - 11.0).abs() < 1e-5);
    }

    #[test]
    fn non_finite_timestamp_is_ignored() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.hit_zones[0] = state.hit_zones[0].flashed(200.0);
        assert!(tick(&mut state, &tuning, f64::NAN).is_empty());
        assert_eq!(state.hit_zones[0].timer, 200.0);
        assert_eq!(state.last_frame_at, None);
    }

    #[test]
    fn spawn_requires_interval() {
        let tuning = Tuning {
            spawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = running_state(&tuning);
        tick(&mut state, &tuning, 500.0);
        assert!(state.objects.is_empty());
        tick(&mut state, &tuning, 801.0);
        assert_eq!(state.objects.len(), 1);
        // Interval restarts from the last spawn
        tick(&mut state, &tuning, 1200.0);
        assert_eq!(state.objects.len(), 1);
        tick(&mut state, &tuning, 1700.0);
        assert_eq!(state.objects.len(), 2);
    }

    #[test]
    fn spawned_object_starts_at_top_with_current_speed() {
        let tuning = Tuning {
            spawn_chance: 1.0,
            ..Default::default()
        };
        let mut state = running_state(&tuning);
        state.spawn_speed = 1.6;
        let events = tick(&mut state, &tuning, 900.0);
        assert!(events.is_empty());
        let obj = &state.objects[0];
        assert!(obj.lane < LANES);
        assert!((obj.speed - 1.6).abs() < 1e-6);
        // Spawned above the field, advanced once in its spawn frame
        assert!((obj.y - (tuning.spawn_y + 1.6)).abs() < 1e-5);
        assert_eq!(obj.color, crate::lane_color(obj.lane));
    }

    #[test]
    fn fall_through_counts_a_miss_and_resets_combo() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.combo = 4;
        state.objects.push(FallingObject::new(7, 2, 104.5, 1.0, 30.0));
        let events = tick(&mut state, &tuning, 16.0);
        assert_eq!(events, vec![GameEvent::Missed { lane: 2, id: 7 }]);
        assert!(state.objects.is_empty());
        assert_eq!(state.missed, 1);
        assert_eq!(state.combo, 0);
        assert!(state.running());
    }

    #[test]
    fn object_exactly_at_threshold_survives() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.objects.push(FallingObject::new(0, 0, 104.0, 1.0, 30.0));
        tick(&mut state, &tuning, 16.0);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.missed, 0);
    }

    #[test]
    fn simultaneous_misses_emit_one_game_over() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.missed = 1;
        for id in 0..3 {
            state.objects.push(FallingObject::new(id, id as usize, 106.0, 1.0, 30.0));
        }
        let events = tick(&mut state, &tuning, 16.0);
        let overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count();
        assert_eq!(overs, 1);
        assert_eq!(state.missed, tuning.miss_limit);
        assert_eq!(state.phase, RunPhase::GameOver);
        assert!(matches!(events.last(), Some(GameEvent::GameOver(_))));
    }

    #[test]
    fn zones_decay_by_frame_delta() {
        let tuning = no_spawn();
        let mut state = running_state(&tuning);
        state.hit_zones[3] = state.hit_zones[3].flashed(200.0);
        tick(&mut state, &tuning, 16.0);
        tick(&mut state, &tuning, 66.0);
        assert!((state.hit_zones[3].timer - 134.0).abs() < 1e-3);
        // Long stall is clamped to the max delta
        tick(&mut state, &tuning, 10_000.0);
        assert!((state.hit_zones[3].timer - 34.0).abs() < 1e-3);
        tick(&mut state, &tuning, 10_100.0);
        assert_eq!(state.hit_zones[3].timer, 0.0);
        assert!(!state.hit_zones[3].active);
    }

    #[test]
    fn clock_derives_level_and_speed() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        assert!(!clock(&mut state, &tuning, 9_999.0));
        assert_eq!(state.elapsed_s, 9);
        assert_eq!(state.level, 1);
        assert!(clock(&mut state, &tuning, 10_000.0));
        assert_eq!(state.level, 2);
        assert!((state.spawn_speed - 1.3).abs() < 1e-6);
    }

    #[test]
    fn clock_never_goes_backwards() {
        let tuning = Tuning::default();
        let mut state = running_state(&tuning);
        clock(&mut state, &tuning, 25_000.0);
        clock(&mut state, &tuning, 3_000.0);
        assert_eq!(state.elapsed_s, 25);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn determinism() {
        let tuning = Tuning::default();
        let mut a = running_state(&tuning);
        let mut b = running_state(&tuning);
        for frame in 1..600 {
            let now = frame as f64 * 16.7;
            tick(&mut a, &tuning, now);
            tick(&mut b, &tuning, now);
        }
        assert_eq!(a.objects, b.objects);
        assert_eq!(a.missed, b.missed);
    }
}
