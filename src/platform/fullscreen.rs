//! Fullscreen controller
//!
//! Desktop uses the native Fullscreen API. Mobile tries it too and otherwise
//! simulates fullscreen by pinning the game to the viewport.
//!
//! Leaving simulated fullscreen is two-phase: styles are unpinned at once and
//! `is_exiting` stays set until the shell calls [`FullscreenController::finish_exit`]
//! after [`EXIT_CLEANUP_DELAY_MS`]. Entering again during that window cancels
//! the pending cleanup.

/// Delay before the post-exit layout cleanup (ms)
pub const EXIT_CLEANUP_DELAY_MS: i32 = 50;
/// Viewport height left to page chrome around the play field in mobile fullscreen (px)
pub const MOBILE_CHROME_PX: f64 = 200.0;

/// Play-field height for mobile fullscreen in a viewport `inner_height` tall
pub fn mobile_area_height(inner_height: f64) -> f64 {
    if inner_height.is_finite() {
        (inner_height - MOBILE_CHROME_PX).max(0.0)
    } else {
        0.0
    }
}

/// Failures reported by a [`FullscreenHost`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("fullscreen API unavailable")]
    Unsupported,
    #[error("fullscreen request rejected: {0}")]
    Rejected(String),
}

/// Page-side operations the controller drives
pub trait FullscreenHost {
    /// Whether the document can go fullscreen natively
    fn native_supported(&self) -> bool;
    /// Whether the document is natively fullscreen right now
    fn native_active(&self) -> bool;
    fn request_native(&mut self) -> Result<(), PlatformError>;
    fn exit_native(&mut self) -> Result<(), PlatformError>;
    /// Pin the game container to the viewport and lock scroll/zoom
    fn pin_viewport(&mut self);
    /// Undo `pin_viewport` styles
    fn unpin_viewport(&mut self);
    /// Size the play field to the fullscreen viewport
    fn fit_game_area(&mut self);
    /// Layout reset after leaving fullscreen (deferred for simulated exits)
    fn finish_cleanup(&mut self);
    /// Reflect the fullscreen flag on the page (body class)
    fn mark_active(&mut self, active: bool);
}

/// How this platform goes fullscreen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenStrategy {
    /// Native API; failures leave the game windowed
    NativeOnly,
    /// Native API, falling back to the simulated mode
    NativeOrSimulated,
}

/// Current fullscreen mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenMode {
    #[default]
    Windowed,
    Native,
    Simulated,
}

/// What the UI binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FullscreenState {
    pub is_fullscreen: bool,
    pub is_exiting: bool,
}

/// A cleanup the shell must run after `delay_ms` via `finish_exit(token)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCleanup {
    pub token: u32,
    pub delay_ms: i32,
}

#[derive(Debug, Clone)]
pub struct FullscreenController {
    strategy: FullscreenStrategy,
    mode: FullscreenMode,
    is_exiting: bool,
    cleanup_token: u32,
}

impl FullscreenController {
    pub fn new(strategy: FullscreenStrategy) -> Self {
        Self {
            strategy,
            mode: FullscreenMode::Windowed,
            is_exiting: false,
            cleanup_token: 0,
        }
    }

    pub fn mode(&self) -> FullscreenMode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode != FullscreenMode::Windowed
    }

    pub fn state(&self) -> FullscreenState {
        FullscreenState {
            is_fullscreen: self.is_fullscreen(),
            is_exiting: self.is_exiting,
        }
    }

    /// Enter when windowed, exit otherwise
    pub fn toggle(&mut self, host: &mut impl FullscreenHost) -> Option<PendingCleanup> {
        if !self.is_fullscreen() && !host.native_active() {
            self.enter(host);
            None
        } else {
            self.exit(host)
        }
    }

    pub fn enter(&mut self, host: &mut impl FullscreenHost) {
        if self.is_fullscreen() {
            return;
        }
        if self.is_exiting {
            // Invalidate the cleanup still in flight
            self.is_exiting = false;
            self.cleanup_token = self.cleanup_token.wrapping_add(1);
        }

        if host.native_supported() {
            match host.request_native() {
                Ok(()) => {
                    self.set_mode(FullscreenMode::Native, host);
                    if self.strategy == FullscreenStrategy::NativeOrSimulated {
                        host.fit_game_area();
                    }
                    return;
                }
                Err(e) => log::warn!("Error entering fullscreen: {e}"),
            }
        } else {
            log::warn!("Error entering fullscreen: {}", PlatformError::Unsupported);
        }

        if self.strategy == FullscreenStrategy::NativeOrSimulated {
            self.simulate(host);
        }
    }

    pub fn exit(&mut self, host: &mut impl FullscreenHost) -> Option<PendingCleanup> {
        match self.mode {
            FullscreenMode::Simulated => {
                self.is_exiting = true;
                self.set_mode(FullscreenMode::Windowed, host);
                host.unpin_viewport();
                self.cleanup_token = self.cleanup_token.wrapping_add(1);
                log::info!("Leaving simulated fullscreen");
                Some(PendingCleanup {
                    token: self.cleanup_token,
                    delay_ms: EXIT_CLEANUP_DELAY_MS,
                })
            }
            FullscreenMode::Native | FullscreenMode::Windowed => {
                let was_native = self.mode == FullscreenMode::Native;
                if host.native_active() {
                    if let Err(e) = host.exit_native() {
                        log::warn!("Error exiting fullscreen: {e}");
                    }
                }
                self.set_mode(FullscreenMode::Windowed, host);
                if was_native && self.strategy == FullscreenStrategy::NativeOrSimulated {
                    host.finish_cleanup();
                }
                None
            }
        }
    }

    /// Delayed second phase of a simulated exit; stale tokens are ignored
    pub fn finish_exit(&mut self, token: u32, host: &mut impl FullscreenHost) {
        if !self.is_exiting || token != self.cleanup_token {
            return;
        }
        self.is_exiting = false;
        host.finish_cleanup();
    }

    /// Browser `fullscreenchange`
    pub fn on_fullscreen_change(&mut self, native_active: bool, host: &mut impl FullscreenHost) {
        match (native_active, self.mode) {
            (true, FullscreenMode::Windowed) => self.set_mode(FullscreenMode::Native, host),
            (false, FullscreenMode::Native) => {
                self.set_mode(FullscreenMode::Windowed, host);
                if self.strategy == FullscreenStrategy::NativeOrSimulated {
                    host.finish_cleanup();
                }
            }
            _ => {}
        }
    }

    /// Browser `fullscreenerror`: the async request was rejected after all
    pub fn on_fullscreen_error(&mut self, host: &mut impl FullscreenHost) {
        if self.mode != FullscreenMode::Native {
            return;
        }
        log::warn!("Fullscreen request rejected by the browser");
        self.set_mode(FullscreenMode::Windowed, host);
        if self.strategy == FullscreenStrategy::NativeOrSimulated {
            self.simulate(host);
        }
    }

    /// Drop every fullscreen side effect at once (page teardown)
    pub fn teardown(&mut self, host: &mut impl FullscreenHost) {
        match self.mode {
            FullscreenMode::Simulated => host.unpin_viewport(),
            FullscreenMode::Native => {
                if let Err(e) = host.exit_native() {
                    log::warn!("Error exiting fullscreen on teardown: {e}");
                }
            }
            FullscreenMode::Windowed => {}
        }
        if self.is_exiting || self.mode == FullscreenMode::Simulated {
            host.finish_cleanup();
        }
        self.is_exiting = false;
        self.cleanup_token = self.cleanup_token.wrapping_add(1);
        self.set_mode(FullscreenMode::Windowed, host);
    }

    /// A run is starting; re-fit the play field when fullscreen on mobile
    pub fn on_run_start(&mut self, host: &mut impl FullscreenHost) {
        if self.is_fullscreen() && self.strategy == FullscreenStrategy::NativeOrSimulated {
            host.fit_game_area();
        }
    }

    fn simulate(&mut self, host: &mut impl FullscreenHost) {
        host.pin_viewport();
        host.fit_game_area();
        self.set_mode(FullscreenMode::Simulated, host);
        log::info!("Using simulated fullscreen");
    }

    fn set_mode(&mut self, mode: FullscreenMode, host: &mut impl FullscreenHost) {
        self.mode = mode;
        host.mark_active(self.is_fullscreen());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockHost {
        supported: bool,
        accept: bool,
        native: bool,
        pinned: bool,
        marked: bool,
        cleanups: u32,
        fits: u32,
        exits: u32,
    }

    impl MockHost {
        fn desktop() -> Self {
            Self {
                supported: true,
                accept: true,
                ..Default::default()
            }
        }

        fn no_native() -> Self {
            Self::default()
        }
    }

    impl FullscreenHost for MockHost {
        fn native_supported(&self) -> bool {
            self.supported
        }
        fn native_active(&self) -> bool {
            self.native
        }
        fn request_native(&mut self) -> Result<(), PlatformError> {
            if self.accept {
                self.native = true;
                Ok(())
            } else {
                Err(PlatformError::Rejected("denied".into()))
            }
        }
        fn exit_native(&mut self) -> Result<(), PlatformError> {
            self.exits += 1;
            self.native = false;
            Ok(())
        }
        fn pin_viewport(&mut self) {
            self.pinned = true;
        }
        fn unpin_viewport(&mut self) {
            self.pinned = false;
        }
        fn fit_game_area(&mut self) {
            self.fits += 1;
        }
        fn finish_cleanup(&mut self) {
            self.cleanups += 1;
        }
        fn mark_active(&mut self, active: bool) {
            self.marked = active;
        }
    }

    #[test]
    fn desktop_toggles_native() {
        let mut host = MockHost::desktop();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOnly);
        assert_eq!(fs.toggle(&mut host), None);
        assert_eq!(fs.mode(), FullscreenMode::Native);
        assert!(host.marked);
        assert_eq!(fs.toggle(&mut host), None);
        assert!(!fs.is_fullscreen());
        assert!(!host.native);
        assert!(!fs.state().is_exiting);
    }

    #[test]
    fn desktop_rejection_stays_windowed() {
        let mut host = MockHost {
            accept: false,
            ..MockHost::desktop()
        };
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOnly);
        fs.toggle(&mut host);
        assert_eq!(fs.mode(), FullscreenMode::Windowed);
        assert!(!host.pinned);
    }

    #[test]
    fn mobile_falls_back_to_simulated() {
        let mut host = MockHost::no_native();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        assert_eq!(fs.mode(), FullscreenMode::Simulated);
        assert!(host.pinned);
        assert!(fs.state().is_fullscreen);
    }

    #[test]
    fn simulated_exit_is_two_phase() {
        let mut host = MockHost::no_native();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        let pending = fs.toggle(&mut host).unwrap();
        assert_eq!(pending.delay_ms, EXIT_CLEANUP_DELAY_MS);
        assert_eq!(
            fs.state(),
            FullscreenState {
                is_fullscreen: false,
                is_exiting: true
            }
        );
        assert!(!host.pinned);

        fs.finish_exit(pending.token, &mut host);
        assert!(!fs.state().is_exiting);
        assert_eq!(host.cleanups, 1);
    }

    #[test]
    fn rapid_toggles_ignore_stale_cleanup() {
        let mut host = MockHost::no_native();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        let pending = fs.toggle(&mut host).unwrap();
        // Re-enter before the cleanup fires
        fs.toggle(&mut host);
        assert_eq!(
            fs.state(),
            FullscreenState {
                is_fullscreen: true,
                is_exiting: false
            }
        );
        fs.finish_exit(pending.token, &mut host);
        assert_eq!(host.cleanups, 0);
        assert!(host.pinned);
        assert!(fs.is_fullscreen());
    }

    #[test]
    fn browser_exit_syncs_state() {
        let mut host = MockHost::desktop();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOnly);
        fs.toggle(&mut host);
        host.native = false;
        fs.on_fullscreen_change(false, &mut host);
        assert!(!fs.is_fullscreen());
        assert!(!host.marked);
        // Next toggle enters again rather than exiting
        fs.toggle(&mut host);
        assert!(fs.is_fullscreen());
    }

    #[test]
    fn late_rejection_falls_back_on_mobile() {
        let mut host = MockHost::desktop();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        host.native = false;
        fs.on_fullscreen_error(&mut host);
        assert_eq!(fs.mode(), FullscreenMode::Simulated);
        assert!(host.pinned);
    }

    #[test]
    fn teardown_restores_page() {
        let mut host = MockHost::no_native();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        fs.teardown(&mut host);
        assert!(!host.pinned);
        assert_eq!(host.cleanups, 1);
        assert_eq!(fs.state(), FullscreenState::default());
    }

    #[test]
    fn mobile_area_leaves_room_for_chrome() {
        assert_eq!(mobile_area_height(800.0), 600.0);
        assert_eq!(mobile_area_height(150.0), 0.0);
        assert_eq!(mobile_area_height(f64::NAN), 0.0);
    }

    #[test]
    fn simulated_mode_sizes_and_resets_the_play_field() {
        let mut host = MockHost::no_native();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        assert_eq!(host.fits, 1);

        fs.on_run_start(&mut host);
        assert_eq!(host.fits, 2);

        let pending = fs.toggle(&mut host).unwrap();
        assert_eq!(host.cleanups, 0);
        fs.finish_exit(pending.token, &mut host);
        assert_eq!(host.cleanups, 1);

        // Windowed runs leave the play field alone
        fs.on_run_start(&mut host);
        assert_eq!(host.fits, 2);
    }

    #[test]
    fn mobile_native_fullscreen_fits_and_resets_at_once() {
        let mut host = MockHost::desktop();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOrSimulated);
        fs.toggle(&mut host);
        assert_eq!(fs.mode(), FullscreenMode::Native);
        assert_eq!(host.fits, 1);
        assert_eq!(fs.toggle(&mut host), None);
        assert_eq!(host.cleanups, 1);
    }

    #[test]
    fn desktop_never_touches_the_play_field() {
        let mut host = MockHost::desktop();
        let mut fs = FullscreenController::new(FullscreenStrategy::NativeOnly);
        fs.toggle(&mut host);
        fs.on_run_start(&mut host);
        fs.toggle(&mut host);
        assert_eq!((host.fits, host.cleanups), (0, 0));
    }
}
