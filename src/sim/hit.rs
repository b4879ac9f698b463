//! Hit resolution against the lane's hit zone

use std::cmp::Ordering;

use super::state::{FallingObject, GameEvent, RunState};
use super::tick::flash_zone;
use crate::consts::LANES;
use crate::tuning::{Tolerance, Tuning};

/// Pick the object in `lane` closest to `reference_y` inside its tolerance window
///
/// Ties go to the lowest id (earliest spawn).
pub fn find_target<'a>(
    objects: &'a [FallingObject],
    lane: usize,
    reference_y: f32,
    tolerance: &Tolerance,
    touch: bool,
) -> Option<&'a FallingObject> {
    objects
        .iter()
        .filter(|obj| obj.lane == lane)
        .filter(|obj| (obj.y - reference_y).abs() <= tolerance.window(obj.speed, touch))
        .min_by(|a, b| {
            let da = (a.y - reference_y).abs();
            let db = (b.y - reference_y).abs();
            da.partial_cmp(&db)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        })
}

/// Resolve a press on `lane`
///
/// Returns `None` when the press is ignored (bad lane, no run in progress).
pub fn hit(state: &mut RunState, tuning: &Tuning, lane: usize, touch: bool) -> Option<GameEvent> {
    if lane >= LANES || !state.running() {
        return None;
    }

    let target = find_target(
        &state.objects,
        lane,
        tuning.hit_zone_y,
        &tuning.tolerance,
        touch,
    )
    .map(|obj| obj.id);

    flash_zone(state, lane, tuning.glow_duration_ms);

    let Some(id) = target else {
        return Some(GameEvent::SwingMiss { lane });
    };

    state.objects = state
        .objects
        .iter()
        .filter(|obj| obj.id != id)
        .cloned()
        .collect();
    state.score += tuning.points_per_hit;
    state.hits += 1;
    state.combo += 1;
    state.best_combo = state.best_combo.max(state.combo);
    log::debug!("Hit lane {lane} (object {id}), combo {}", state.combo);

    Some(GameEvent::Hit {
        lane,
        id,
        points: tuning.points_per_hit,
    })
}
