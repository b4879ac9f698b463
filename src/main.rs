//! Falling Planet entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use falling_planet::audio::{AudioManager, SoundEffect};
    use falling_planet::consts::CLOCK_INTERVAL_MS;
    use falling_planet::overlay::{
        GameOverSummary, Overlay, OverlayAction, OverlayInput, format_score, format_time,
    };
    use falling_planet::platform::dom::{DomFullscreenHost, set_page_scroll_locked};
    use falling_planet::platform::{
        Capabilities, FullscreenController, FullscreenHost, FullscreenMode, InputAdapter,
        InputContext, KeyAction, KeyInput, PendingCleanup, route_key,
    };
    use falling_planet::renderer::{Layout, RenderState, Scene, SceneStyle};
    use falling_planet::sim::{Engine, GameEvent};
    use falling_planet::{Settings, Tuning};

    const CANVAS_ID: &str = "game-canvas";
    const CONTAINER_ID: &str = "game-container";
    const GAME_AREA_ID: &str = "game-area";

    /// High-resolution time in the same base as animation frame timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
    }

    /// Game instance holding all state
    struct Game {
        engine: Engine,
        input: InputAdapter,
        fullscreen: FullscreenController,
        host: DomFullscreenHost,
        overlay: Overlay,
        audio: AudioManager,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
        layout: Layout,
        style: SceneStyle,
        settings: Settings,
        caps: Capabilities,
        /// Pending animation frame
        frame_handle: Option<i32>,
        /// Running 1 s interval
        clock_handle: Option<i32>,
        /// Callback registered with `setInterval`
        clock_fn: Option<js_sys::Function>,
        labels_dirty: bool,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, document: Document) -> Self {
            let tuning = Tuning::load();
            let settings = Settings::load();
            let caps = Capabilities::detect();
            let layout = Layout::new(
                canvas.client_width() as f32,
                canvas.client_height() as f32,
                caps.is_mobile,
            )
            .with_hit_zone_y(tuning.hit_zone_y);
            let style = SceneStyle {
                is_mobile: caps.is_mobile,
                reduced_motion: !settings.glow_pulse(),
                glow_duration_ms: tuning.glow_duration_ms,
            };

            Self {
                engine: Engine::new(seed, tuning).with_touch_tolerance(caps.touch_tolerance()),
                input: InputAdapter::new(caps.is_mobile),
                fullscreen: FullscreenController::new(caps.fullscreen_strategy()),
                host: DomFullscreenHost::new(
                    document.clone(),
                    CONTAINER_ID,
                    GAME_AREA_ID,
                    caps.native_fullscreen,
                ),
                overlay: Overlay::new(),
                audio: AudioManager::new(settings.effective_volume(), settings.muted),
                render_state: None,
                canvas,
                document,
                layout,
                style,
                settings,
                caps,
                frame_handle: None,
                clock_handle: None,
                clock_fn: None,
                labels_dirty: true,
            }
        }

        fn input_context(&self) -> InputContext {
            InputContext {
                running: self.engine.running(),
                fullscreen: self.fullscreen.is_fullscreen(),
                overlay_visible: self.overlay.visible(),
            }
        }

        /// Match the canvas backing store to its CSS size
        fn resize(&mut self) {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let client_w = self.canvas.client_width().max(1);
            let client_h = self.canvas.client_height().max(1);
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);

            self.layout = Layout::new(client_w as f32, client_h as f32, self.caps.is_mobile)
                .with_hit_zone_y(self.engine.tuning().hit_zone_y);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, (client_w as f32, client_h as f32));
            }
            self.labels_dirty = true;
        }

        /// Re-measure after the container changed size without a `resize` event
        fn relayout(&mut self) {
            self.resize();
            self.render(now_ms());
            self.update_hud();
        }

        fn start_clock(&mut self) {
            if self.clock_handle.is_some() {
                return;
            }
            let (Some(window), Some(f)) = (web_sys::window(), self.clock_fn.as_ref()) else {
                return;
            };
            let interval = window.set_interval_with_callback_and_timeout_and_arguments_0(
                f,
                CLOCK_INTERVAL_MS,
            );
            match interval {
                Ok(handle) => self.clock_handle = Some(handle),
                Err(e) => log::warn!("Failed to start clock: {:?}", e),
            }
        }

        /// Cancel the pending frame and the clock interval
        fn stop_loops(&mut self) {
            let Some(window) = web_sys::window() else { return };
            if let Some(handle) = self.frame_handle.take() {
                let _ = window.cancel_animation_frame(handle);
            }
            if let Some(handle) = self.clock_handle.take() {
                window.clear_interval_with_handle(handle);
            }
        }

        fn hit(&mut self, lane: usize) {
            if let Some(event) = self.engine.hit(lane) {
                log::debug!("{:?}", event);
                self.audio.play(SoundEffect::for_event(&event));
            }
        }

        fn handle_events(&mut self, events: Vec<GameEvent>) {
            for event in events {
                self.audio.play(SoundEffect::for_event(&event));
                if let GameEvent::GameOver(snapshot) = event {
                    self.stop_loops();
                    let summary = self.overlay.show(&snapshot).clone();
                    log::info!("Game over: score {}, level {}", summary.score, summary.level);
                    self.show_overlay(&summary);
                }
            }
        }

        fn clock(&mut self, now: f64) {
            if self.engine.clock(now) {
                log::info!("Level {}", self.engine.state().level);
                self.audio.play(SoundEffect::LevelUp);
            }
            self.update_hud();
        }

        /// Render the current frame
        fn render(&mut self, now: f64) {
            let snapshot = self.engine.snapshot();
            let press = self.input.press_feedback(now);
            let scene = Scene::build(&snapshot, &self.layout, &press, &self.style);

            if self.labels_dirty {
                self.place_key_labels(&scene);
                self.labels_dirty = false;
            }

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn place_key_labels(&self, scene: &Scene) {
            if self.caps.is_mobile {
                for lane in 0..scene.zones.len() {
                    if let Some(el) = html_element(&self.document, &format!("key-label-{lane}")) {
                        let _ = el.style().set_property("display", "none");
                    }
                }
                return;
            }
            for (lane, key, pos) in scene.labels() {
                let Some(el) = html_element(&self.document, &format!("key-label-{lane}")) else {
                    continue;
                };
                el.set_text_content(Some(&key.to_string()));
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", pos.x));
                let _ = style.set_property("top", &format!("{}px", pos.y));
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = &self.document;
            let state = self.engine.state();

            set_text(document, "hud-score", &format_score(state.score));
            set_text(document, "hud-time", &format_time(state.elapsed_s));
            set_text(document, "hud-level", &state.level.to_string());
            set_text(
                document,
                "hud-missed",
                &format!("{}/{}", state.missed, self.engine.tuning().miss_limit),
            );
            set_text(document, "hud-combo", &state.combo.to_string());
            set_class(document, "hud-combo", "hidden", state.combo < 2);

            let running = self.engine.running();
            set_text(document, "start-btn", if running { "End Game" } else { "Start Game" });
            set_class(document, "start-btn", "running", running);

            let fs = self.fullscreen.state();
            set_class(document, "fullscreen-btn", "active", fs.is_fullscreen);
            set_class(document, "fullscreen-btn", "exiting", fs.is_exiting);
        }

        fn show_overlay(&self, summary: &GameOverSummary) {
            let document = &self.document;
            set_text(document, "final-score", &summary.score);
            set_text(document, "final-time", &summary.time);
            set_text(document, "final-level", &summary.level.to_string());
            set_text(document, "final-hits", &summary.hits.to_string());
            set_text(document, "final-missed", &summary.missed.to_string());
            set_text(document, "final-combo", &summary.best_combo.to_string());
            set_text(document, "game-over-subtitle", &summary.subtitle());
            set_class(document, "game-over-modal", "visible", true);
            set_page_scroll_locked(document, true);

            if let Some(btn) = html_element(document, "play-again-btn") {
                let _ = btn.focus();
            }
        }

        fn hide_overlay(&self) {
            set_class(&self.document, "game-over-modal", "visible", false);
            // Simulated fullscreen keeps its own lock
            if self.fullscreen.mode() != FullscreenMode::Simulated {
                set_page_scroll_locked(&self.document, false);
            }
        }

        fn end_run(&mut self) {
            self.engine.end();
            self.stop_loops();
            self.render(now_ms());
            self.update_hud();
        }

        /// Page is going away
        fn teardown(&mut self) {
            self.stop_loops();
            // A page restored from the back/forward cache starts idle
            self.engine.end();
            let Game { fullscreen, host, .. } = &mut *self;
            fullscreen.teardown(host);
            if self.overlay.visible() {
                set_page_scroll_locked(&self.document, false);
            }
            self.audio.close();
            self.update_hud();
            log::info!("Torn down");
        }
    }

    fn start_run(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.stop_loops();
            let Game { fullscreen, host, .. } = &mut *g;
            fullscreen.on_run_start(host);
            g.resize();
            g.engine.start(now_ms());
            g.start_clock();
            g.update_hud();
            log::info!("Started run with seed: {}", g.engine.seed());
        }
        request_animation_frame(game.clone());
    }

    fn close_overlay(game: &Rc<RefCell<Game>>, input: OverlayInput) {
        let action = {
            let mut g = game.borrow_mut();
            let action = g.overlay.handle(input);
            if action.is_some() {
                g.hide_overlay();
            }
            action
        };
        match action {
            Some(OverlayAction::PlayAgain) => start_run(game),
            Some(OverlayAction::Close) => game.borrow_mut().end_run(),
            None => {}
        }
    }

    fn schedule_cleanup(game: &Rc<RefCell<Game>>, pending: PendingCleanup) {
        let game = game.clone();
        let Some(window) = web_sys::window() else { return };
        let callback = Closure::once_into_js(move || {
            let mut g = game.borrow_mut();
            let Game { fullscreen, host, .. } = &mut *g;
            fullscreen.finish_exit(pending.token, host);
            g.relayout();
        });
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            pending.delay_ms,
        ) {
            log::warn!("Failed to schedule fullscreen cleanup: {:?}", e);
        }
    }

    fn toggle_fullscreen(game: &Rc<RefCell<Game>>) {
        let pending = {
            let mut g = game.borrow_mut();
            let Game { fullscreen, host, .. } = &mut *g;
            let pending = fullscreen.toggle(host);
            g.relayout();
            pending
        };
        if let Some(pending) = pending {
            schedule_cleanup(game, pending);
        }
    }

    fn exit_fullscreen(game: &Rc<RefCell<Game>>) {
        let pending = {
            let mut g = game.borrow_mut();
            let Game { fullscreen, host, .. } = &mut *g;
            let pending = fullscreen.exit(host);
            g.relayout();
            pending
        };
        if let Some(pending) = pending {
            schedule_cleanup(game, pending);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Falling Planet starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone(), document.clone())));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let (width, height) = (canvas.width(), canvas.height());
                        let logical = (canvas.client_width() as f32, canvas.client_height() as f32);
                        match RenderState::new(surface, &adapter, width, height, logical).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {e}"),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {e}"),
                }
            }
            Err(e) => log::error!("Failed to create surface: {e}"),
        }

        setup_clock(game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_fullscreen_events(game.clone());
        setup_window_events(game.clone());

        {
            let mut g = game.borrow_mut();
            g.render(now_ms());
            g.update_hud();
        }

        log::info!("Falling Planet ready!");
        Ok(())
    }

    fn setup_clock(game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut()>::new({
            let game = game.clone();
            move || game.borrow_mut().clock(now_ms())
        });
        let f: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        game.borrow_mut().clock_fn = Some(f);
        closure.forget();
    }

    /// Point relative to the canvas in CSS pixels
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        (
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press on a hit zone
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                let lane = g.layout.lane_at(x, y);
                if let Some(lane) = g.input.on_mouse_down(lane, now_ms()) {
                    g.hit(lane);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start; every new finger is its own press
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let now = now_ms();
                let touches = event.changed_touches();
                for i in 0..touches.length() {
                    let Some(touch) = touches.get(i) else { continue };
                    let (x, y) = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    let lane = g.layout.lane_at(x, y);
                    if let Some(lane) = g.input.on_touch_start(lane, now) {
                        g.hit(lane);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: one router for shortcuts and lane keys
        {
            let game = game.clone();
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let input = KeyInput {
                    key: &key,
                    ctrl: event.ctrl_key(),
                    meta: event.meta_key(),
                    repeat: event.repeat(),
                };
                let action = route_key(&input, &game.borrow().input_context());
                if action.prevents_default() {
                    event.prevent_default();
                }
                match action {
                    KeyAction::ToggleFullscreen => toggle_fullscreen(&game),
                    KeyAction::ExitFullscreen => exit_fullscreen(&game),
                    KeyAction::CloseOverlay => close_overlay(&game, OverlayInput::Escape),
                    KeyAction::Hit(lane) => game.borrow_mut().hit(lane),
                    KeyAction::Ignore => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id}");
            return;
        };
        let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        on_click(&document, "start-btn", {
            let game = game.clone();
            move |_event| {
                let running = game.borrow().engine.running();
                if running {
                    game.borrow_mut().end_run();
                } else {
                    // A stale overlay from the last run goes away with the new run
                    if game.borrow().overlay.visible() {
                        close_overlay(&game, OverlayInput::PlayAgainButton);
                    } else {
                        start_run(&game);
                    }
                }
            }
        });

        on_click(&document, "fullscreen-btn", {
            let game = game.clone();
            move |_event| toggle_fullscreen(&game)
        });

        on_click(&document, "play-again-btn", {
            let game = game.clone();
            move |_event| close_overlay(&game, OverlayInput::PlayAgainButton)
        });

        on_click(&document, "close-modal-btn", {
            let game = game.clone();
            move |_event| close_overlay(&game, OverlayInput::CloseButton)
        });

        // Only clicks on the backdrop itself, not bubbled from the dialog
        on_click(&document, "game-over-modal", {
            let game = game.clone();
            move |event| {
                let on_backdrop = match (event.target(), event.current_target()) {
                    (Some(target), Some(current)) => target == current,
                    _ => false,
                };
                if on_backdrop {
                    close_overlay(&game, OverlayInput::BackdropClick);
                }
            }
        });
    }

    fn setup_fullscreen_events(game: Rc<RefCell<Game>>) {
        let document = game.borrow().document.clone();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let Game { fullscreen, host, .. } = &mut *g;
                let active = host.native_active();
                fullscreen.on_fullscreen_change(active, host);
                g.resize();
                g.render(now_ms());
                g.update_hud();
            });
            let _ = document.add_event_listener_with_callback(
                "fullscreenchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let Game { fullscreen, host, .. } = &mut *g;
                fullscreen.on_fullscreen_error(host);
                g.relayout();
            });
            let _ = document.add_event_listener_with_callback(
                "fullscreenerror",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn setup_window_events(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Resize
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.resize();
                g.render(now_ms());
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ = window
                .add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page teardown
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().teardown();
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let handle_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => handle_game.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.frame_handle = None;

            let events = g.engine.tick(time);
            g.handle_events(events);
            g.render(time);
            g.update_hud();
            g.engine.running()
        };

        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Falling Planet failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Falling Planet (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning headless demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one seeded run with a bot that presses every lane on each frame
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use falling_planet::consts::{CLOCK_INTERVAL_MS, LANES};
    use falling_planet::overlay::Overlay;
    use falling_planet::sim::{Engine, GameEvent};
    use falling_planet::Tuning;

    let mut engine = Engine::new(7, Tuning::load());
    let mut overlay = Overlay::new();
    engine.start(0.0);

    let mut now = 0.0;
    let mut next_clock = CLOCK_INTERVAL_MS as f64;
    // Two minutes of frames, or until the bot lets three planets through
    while engine.running() && now < 120_000.0 {
        now += 16.7;
        for event in engine.tick(now) {
            if let GameEvent::GameOver(snapshot) = event {
                overlay.show(&snapshot);
            }
        }
        if now >= next_clock {
            engine.clock(now);
            next_clock += CLOCK_INTERVAL_MS as f64;
        }
        // Miss a lane every few seconds so the run ends
        let skipped = (now / 3_000.0) as usize % LANES;
        for lane in (0..LANES).filter(|&l| l != skipped) {
            engine.hit(lane);
        }
    }

    match overlay.summary() {
        Some(summary) => println!(
            "{}: score {}, time {}, level {}, hits {}, best combo {}",
            summary.subtitle(),
            summary.score,
            summary.time,
            summary.level,
            summary.hits,
            summary.best_combo
        ),
        None => {
            let snap = engine.snapshot();
            println!("Survived: score {}, level {}", snap.score, snap.level);
        }
    }
}
