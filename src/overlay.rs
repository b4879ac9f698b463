//! Game-over overlay
//!
//! A pure view of the terminal snapshot plus the close/play-again decisions.
//! The shell owns the DOM nodes and the page scroll lock.

use crate::sim::Snapshot;

/// Figures shown when a run ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: String,
    pub time: String,
    pub level: u32,
    pub hits: u32,
    pub missed: u32,
    pub best_combo: u32,
}

impl GameOverSummary {
    pub fn from_snapshot(snap: &Snapshot) -> Self {
        Self {
            score: format_score(snap.score),
            time: format_time(snap.elapsed_s),
            level: snap.level,
            hits: snap.hits,
            missed: snap.missed,
            best_combo: snap.best_combo,
        }
    }

    pub fn subtitle(&self) -> String {
        let noun = if self.missed == 1 { "Planet" } else { "Planets" };
        format!("Mission Failed - {} {} Lost", self.missed, noun)
    }
}

/// `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Score with comma thousands separators
pub fn format_score(score: u64) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Ways the player can act on the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayInput {
    Escape,
    BackdropClick,
    CloseButton,
    PlayAgainButton,
}

/// What the shell should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    /// Hide and start a new run
    PlayAgain,
    /// Hide and end the run
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct Overlay {
    summary: Option<GameOverSummary>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, snap: &Snapshot) -> &GameOverSummary {
        self.summary.insert(GameOverSummary::from_snapshot(snap))
    }

    pub fn visible(&self) -> bool {
        self.summary.is_some()
    }

    pub fn summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    /// Resolve an input; `None` when the overlay is hidden
    pub fn handle(&mut self, input: OverlayInput) -> Option<OverlayAction> {
        self.summary.take()?;
        Some(match input {
            OverlayInput::PlayAgainButton => OverlayAction::PlayAgain,
            OverlayInput::Escape | OverlayInput::BackdropClick | OverlayInput::CloseButton => {
                OverlayAction::Close
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn final_snapshot() -> Snapshot {
        Snapshot {
            score: 1_250,
            elapsed_s: 75,
            level: 8,
            missed: 3,
            hits: 50,
            best_combo: 21,
            ..Default::default()
        }
    }

    #[test]
    fn formats_time_and_score() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(75), "1:15");
        assert_eq!(format_time(600), "10:00");
        assert_eq!(format_score(0), "0");
        assert_eq!(format_score(975), "975");
        assert_eq!(format_score(1_250), "1,250");
        assert_eq!(format_score(1_234_567), "1,234,567");
    }

    #[test]
    fn summary_reflects_terminal_snapshot() {
        let summary = GameOverSummary::from_snapshot(&final_snapshot());
        assert_eq!(summary.score, "1,250");
        assert_eq!(summary.time, "1:15");
        assert_eq!(summary.level, 8);
        assert_eq!(summary.hits, 50);
        assert_eq!(summary.best_combo, 21);
        assert_eq!(summary.subtitle(), "Mission Failed - 3 Planets Lost");
    }

    #[test]
    fn every_dismissal_closes() {
        for input in [
            OverlayInput::Escape,
            OverlayInput::BackdropClick,
            OverlayInput::CloseButton,
        ] {
            let mut overlay = Overlay::new();
            overlay.show(&final_snapshot());
            assert_eq!(overlay.handle(input), Some(OverlayAction::Close));
            assert!(!overlay.visible());
        }
    }

    #[test]
    fn play_again_only_once() {
        let mut overlay = Overlay::new();
        assert_eq!(overlay.handle(OverlayInput::PlayAgainButton), None);
        overlay.show(&final_snapshot());
        assert!(overlay.visible());
        assert_eq!(
            overlay.handle(OverlayInput::PlayAgainButton),
            Some(OverlayAction::PlayAgain)
        );
        assert_eq!(overlay.handle(OverlayInput::Escape), None);
    }
}
