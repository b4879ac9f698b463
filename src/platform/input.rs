//! Input adapter
//!
//! Turns keyboard, mouse and touch events into at most one `hit(lane)` each.
//! Global shortcuts win over lane keys.

use crate::consts::LANES;
use crate::lane_for_key;

/// Mouse events this soon after a touch are browser compatibility echoes (ms)
pub const SYNTHETIC_MOUSE_WINDOW_MS: f64 = 600.0;
/// Length of the "pressed" affordance on touch platforms (ms)
pub const PRESS_FEEDBACK_MS: f64 = 150.0;

/// The parts of a keydown event routing cares about
#[derive(Debug, Clone, Copy)]
pub struct KeyInput<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    pub repeat: bool,
}

#[cfg(test)]
impl<'a> KeyInput<'a> {
    pub fn plain(key: &'a str) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            repeat: false,
        }
    }
}

/// UI state routing depends on
#[derive(Debug, Clone, Copy, Default)]
pub struct InputContext {
    pub running: bool,
    pub fullscreen: bool,
    pub overlay_visible: bool,
}

/// What a key press means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleFullscreen,
    ExitFullscreen,
    CloseOverlay,
    Hit(usize),
    Ignore,
}

impl KeyAction {
    /// Whether the browser's default handling must be suppressed
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyAction::ToggleFullscreen | KeyAction::Hit(_))
    }
}

/// Route one keydown
pub fn route_key(input: &KeyInput, ctx: &InputContext) -> KeyAction {
    let modifier = input.ctrl || input.meta;

    if input.key == "F11" || (modifier && input.key.eq_ignore_ascii_case("f")) {
        return if input.repeat {
            KeyAction::Ignore
        } else {
            KeyAction::ToggleFullscreen
        };
    }

    if input.key == "Escape" {
        if ctx.overlay_visible {
            return KeyAction::CloseOverlay;
        }
        if ctx.fullscreen {
            return KeyAction::ExitFullscreen;
        }
        return KeyAction::Ignore;
    }

    // Browser/OS shortcuts (copy, select-all...) are never lane hits
    if modifier || input.repeat || !ctx.running || ctx.overlay_visible {
        return KeyAction::Ignore;
    }

    match lane_for_key(input.key) {
        Some(lane) => KeyAction::Hit(lane),
        None => KeyAction::Ignore,
    }
}

/// Zones currently showing the pressed affordance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PressFeedback {
    pub pressed: [bool; LANES],
}

/// Pointer/touch state shared across events
#[derive(Debug, Clone)]
pub struct InputAdapter {
    is_mobile: bool,
    last_touch_at: Option<f64>,
    pressed_until: [f64; LANES],
}

impl InputAdapter {
    pub fn new(is_mobile: bool) -> Self {
        Self {
            is_mobile,
            last_touch_at: None,
            pressed_until: [f64::NEG_INFINITY; LANES],
        }
    }

    /// Touch start; `lane` is the hit zone under the touch point, if any
    pub fn on_touch_start(&mut self, lane: Option<usize>, now: f64) -> Option<usize> {
        self.last_touch_at = Some(now);
        let lane = lane.filter(|&l| l < LANES)?;
        if self.is_mobile {
            self.pressed_until[lane] = now + PRESS_FEEDBACK_MS;
        }
        Some(lane)
    }

    /// Mouse press; dropped when it echoes a recent touch
    pub fn on_mouse_down(&mut self, lane: Option<usize>, now: f64) -> Option<usize> {
        if let Some(touched) = self.last_touch_at {
            let since = now - touched;
            if (0.0..SYNTHETIC_MOUSE_WINDOW_MS).contains(&since) {
                log::debug!("Dropping synthesized mouse event");
                return None;
            }
        }
        lane.filter(|&l| l < LANES)
    }

    pub fn press_feedback(&self, now: f64) -> PressFeedback {
        let mut feedback = PressFeedback::default();
        for (pressed, until) in feedback.pressed.iter_mut().zip(self.pressed_until) {
            *pressed = now < until;
        }
        feedback
    }
}
