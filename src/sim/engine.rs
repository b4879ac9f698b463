//! The game engine: sole owner of the run
//!
//! `start`, `end`, `tick`, `clock` and `hit` are the only ways to mutate a run.
//! Everything else reads [`Snapshot`]s.

use super::hit;
use super::state::{GameEvent, RunPhase, RunState, Snapshot};
use super::tick::{self, clear_zones};
use crate::tuning::Tuning;

pub struct Engine {
    state: RunState,
    tuning: Tuning,
    /// Widen hit windows for touch input
    touch_tolerance: bool,
}

impl Engine {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: RunState::new(seed, tuning.base_speed),
            tuning,
            touch_tolerance: false,
        }
    }

    /// Use the wider touch tolerance for every hit
    pub fn with_touch_tolerance(mut self, touch: bool) -> Self {
        self.touch_tolerance = touch;
        self
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn running(&self) -> bool {
        self.state.running()
    }

    pub fn seed(&self) -> u64 {
        self.state.rng.seed
    }

    /// Begin a fresh run at host time `now` (ms)
    pub fn start(&mut self, now: f64) {
        let now = if now.is_finite() { now } else { 0.0 };
        self.state.reset(now, self.tuning.base_speed);
        self.state.phase = RunPhase::Running;
        log::info!("Run started");
    }

    /// Stop the run and clear the field
    pub fn end(&mut self) {
        if self.state.phase != RunPhase::Idle {
            log::info!("Run ended with score {}", self.state.score);
        }
        self.state.phase = RunPhase::Idle;
        self.state.objects = Vec::new();
        clear_zones(&mut self.state);
        self.state.last_frame_at = None;
    }

    /// One animation frame
    pub fn tick(&mut self, now: f64) -> Vec<GameEvent> {
        tick::tick(&mut self.state, &self.tuning, now)
    }

    /// The 1-second cadence; true when the level went up
    pub fn clock(&mut self, now: f64) -> bool {
        tick::clock(&mut self.state, &self.tuning, now)
    }

    /// A normalized "hit lane N" command
    pub fn hit(&mut self, lane: usize) -> Option<GameEvent> {
        hit::hit(&mut self.state, &self.tuning, lane, self.touch_tolerance)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut RunState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LANES, POINTS_PER_HIT};
    use crate::sim::state::FallingObject;
    use proptest::prelude::*;

    fn quiet_engine() -> Engine {
        Engine::new(
            42,
            Tuning {
                spawn_chance: 0.0,
                ..Default::default()
            },
        )
    }

    #[test]
    fn start_twice_is_a_fresh_run() {
        let mut engine = Engine::new(1, Tuning::default());
        engine.start(0.0);
        for frame in 1..400 {
            engine.tick(frame as f64 * 16.0);
            if frame % 60 == 0 {
                engine.clock(frame as f64 * 16.0);
            }
            engine.hit(frame as usize % LANES);
        }
        engine.start(7_000.0);
        engine.start(7_001.0);
        let snap = engine.snapshot();
        assert!(snap.running);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.missed, 0);
        assert_eq!(snap.elapsed_s, 0);
        assert_eq!(snap.level, 1);
        assert!(snap.objects.is_empty());
        assert!(snap.hit_zones.iter().all(|z| !z.active && z.timer == 0.0));
    }

    #[test]
    fn end_is_safe_when_idle() {
        let mut engine = quiet_engine();
        engine.end();
        engine.end();
        assert_eq!(engine.phase(), RunPhase::Idle);
    }

    #[test]
    fn end_clears_the_field() {
        let mut engine = quiet_engine();
        engine.start(0.0);
        engine
            .state_mut()
            .objects
            .push(FallingObject::new(0, 1, 50.0, 1.0, 30.0));
        engine.hit(3);
        engine.end();
        let snap = engine.snapshot();
        assert!(!snap.running);
        assert!(snap.objects.is_empty());
        assert!(snap.hit_zones.iter().all(|z| !z.active));
        assert!(engine.tick(1_000.0).is_empty());
    }

    #[test]
    fn ended_run_ignores_hits() {
        let mut engine = quiet_engine();
        engine.start(0.0);
        engine.end();
        engine
            .state_mut()
            .objects
            .push(FallingObject::new(0, 2, 90.0, 1.0, 30.0));
        assert_eq!(engine.hit(2), None);
        assert!(!engine.running());
        assert_eq!(engine.snapshot().score, 0);
    }

    #[test]
    fn forty_seconds_reaches_level_five() {
        let mut engine = quiet_engine();
        engine.start(1_000.0);
        let mut now = 1_000.0;
        for _ in 0..40 {
            now += 1_000.0;
            engine.tick(now);
            engine.clock(now);
        }
        let snap = engine.snapshot();
        assert_eq!(snap.elapsed_s, 40);
        assert_eq!(snap.level, 5);
        assert!(snap.running);
    }

    #[test]
    fn direct_hit_scores_once() {
        let mut engine = quiet_engine();
        engine.start(0.0);
        let y = engine.tuning().hit_zone_y;
        engine
            .state_mut()
            .objects
            .push(FallingObject::new(99, 2, y, 1.0, 30.0));

        let event = engine.hit(2);
        assert!(matches!(event, Some(GameEvent::Hit { lane: 2, id: 99, .. })));
        assert_eq!(engine.snapshot().score, POINTS_PER_HIT);
        assert!(engine.snapshot().objects.is_empty());

        // Second press finds nothing
        assert_eq!(engine.hit(2), Some(GameEvent::SwingMiss { lane: 2 }));
        assert_eq!(engine.snapshot().score, POINTS_PER_HIT);
    }

    #[test]
    fn three_misses_end_the_run_once() {
        let mut engine = quiet_engine();
        engine.start(0.0);
        let mut game_overs = Vec::new();
        let mut now = 0.0;
        for id in 0..3u32 {
            engine
                .state_mut()
                .objects
                .push(FallingObject::new(id, id as usize, 104.5, 1.0, 30.0));
            now += 16.0;
            for event in engine.tick(now) {
                if let GameEvent::GameOver(snap) = event {
                    game_overs.push(snap);
                }
            }
            if id < 2 {
                assert!(engine.running());
            }
        }
        assert!(!engine.running());
        assert_eq!(engine.phase(), RunPhase::GameOver);
        assert_eq!(game_overs.len(), 1);
        assert_eq!(game_overs[0].missed, 3);
        assert!(!game_overs[0].running);

        // Nothing more fires until the next start
        now += 16.0;
        assert!(engine.tick(now).is_empty());
        assert_eq!(engine.hit(0), None);

        engine.start(now);
        assert!(engine.running());
        assert_eq!(engine.snapshot().missed, 0);
    }

    #[test]
    fn swing_and_miss_flashes_zone_only() {
        let mut engine = quiet_engine();
        engine.start(0.0);
        engine
            .state_mut()
            .objects
            .push(FallingObject::new(0, 1, 10.0, 1.0, 30.0));
        assert_eq!(engine.hit(1), Some(GameEvent::SwingMiss { lane: 1 }));
        let snap = engine.snapshot();
        assert!(snap.hit_zones[1].active);
        assert!(snap.hit_zones[1].timer > 0.0);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.missed, 0);
        assert_eq!(snap.objects.len(), 1);
    }

    #[test]
    fn touch_tolerance_is_wider() {
        let mut desktop = quiet_engine();
        let mut touch = quiet_engine().with_touch_tolerance(true);
        for engine in [&mut desktop, &mut touch] {
            engine.start(0.0);
            engine
                .state_mut()
                .objects
                .push(FallingObject::new(0, 0, 75.0, 1.0, 30.0));
        }
        assert_eq!(desktop.hit(0), Some(GameEvent::SwingMiss { lane: 0 }));
        assert!(matches!(touch.hit(0), Some(GameEvent::Hit { .. })));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Frame(u16),
        Clock,
        Hit(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u16..120).prop_map(Op::Frame),
            Just(Op::Clock),
            (0usize..LANES + 2).prop_map(Op::Hit),
        ]
    }

    proptest! {
        #[test]
        fn run_invariants_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..400)) {
            let tuning = Tuning { spawn_chance: 0.9, ..Default::default() };
            let mut engine = Engine::new(seed, tuning.clone());
            engine.start(0.0);
            let mut now = 0.0;
            let mut last_score = 0;
            let mut last_level = 1;
            let mut game_overs = 0;

            for op in ops {
                match op {
                    Op::Frame(dt) => {
                        now += dt as f64;
                        game_overs += engine
                            .tick(now)
                            .iter()
                            .filter(|e| matches!(e, GameEvent::GameOver(_)))
                            .count();
                    }
                    Op::Clock => {
                        engine.clock(now);
                    }
                    Op::Hit(lane) => {
                        let before = engine.snapshot().objects.len();
                        engine.hit(lane);
                        prop_assert!(before - engine.snapshot().objects.len() <= 1);
                    }
                }

                let snap = engine.snapshot();
                prop_assert!(snap.score >= last_score);
                prop_assert!(snap.level >= last_level);
                prop_assert_eq!(snap.level, tuning.level_for(snap.elapsed_s));
                prop_assert!(snap.missed <= tuning.miss_limit);
                prop_assert!(snap.objects.iter().all(|o| o.lane < LANES));
                prop_assert!(snap
                    .hit_zones
                    .iter()
                    .all(|z| z.timer >= 0.0 && z.active == (z.timer > 0.0)));
                prop_assert_eq!(snap.hit_zones.len(), LANES);
                last_score = snap.score;
                last_level = snap.level;
            }

            prop_assert!(game_overs <= 1);
            if engine.snapshot().missed >= tuning.miss_limit {
                prop_assert_eq!(game_overs, 1);
                prop_assert!(!engine.running());
            }
        }
    }
}
