//! Trailstep entry point
//!
//! Handles platform-specific initialization and runs the walk loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_walk {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use trailstep::WalkError;
    use trailstep::audio::FootstepAudio;
    use trailstep::platform::GestureDelta;
    use trailstep::platform::haptics::NavigatorHaptics;
    use trailstep::platform::web::select_gesture_source;
    use trailstep::render::CanvasRenderer;
    use trailstep::settings::WalkConfig;
    use trailstep::sim::{FootprintTrail, PlayerState, StepController};
    use trailstep::ui::HudSnapshot;

    /// Walk instance holding all state
    struct Walk {
        config: WalkConfig,
        controller: StepController,
        player: PlayerState,
        footprints: FootprintTrail,
        haptics: NavigatorHaptics,
        audio: FootstepAudio,
        renderer: CanvasRenderer,
    }

    impl Walk {
        fn new(config: WalkConfig, renderer: CanvasRenderer, now_ms: f64) -> Self {
            let controller = match config.build_controller() {
                Ok(controller) => controller,
                Err(e) => {
                    log::warn!("Invalid track ({}), using default", e);
                    StepController::default()
                }
            };
            Self {
                config,
                controller,
                player: PlayerState::new(now_ms),
                footprints: FootprintTrail::new(now_ms as u64),
                haptics: NavigatorHaptics::new(),
                audio: FootstepAudio::new(),
                renderer,
            }
        }

        /// Apply one gesture sample
        fn on_gesture(&mut self, delta: GestureDelta) {
            let result = self
                .controller
                .step(&mut self.player, delta.dy, &mut self.haptics);
            if result.step_completed {
                self.footprints.spawn(delta.at);
                self.audio.play_step(result.terrain);
            }
        }

        /// Fade, draw, update HUD
        fn frame(&mut self, now_ms: f64) {
            self.footprints.fade();
            self.renderer.render(
                self.controller.track(),
                self.player.scroll_position,
                &self.footprints,
            );
            self.update_hud(now_ms);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, now_ms: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = HudSnapshot::capture(
                &self.player,
                self.controller.track(),
                self.config.pixels_per_meter,
                now_ms,
            );

            for (id, text) in [
                ("distanceDisplay", hud.distance_text()),
                ("terrainDisplay", hud.terrain_text()),
                ("timeDisplay", hud.time_text()),
                ("stepsDisplay", hud.steps_text()),
            ] {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            }
        }
    }

    /// Find `#canvas`, creating it if the page has none
    fn acquire_canvas(document: &web_sys::Document) -> Result<HtmlCanvasElement, WalkError> {
        let element = match document.get_element_by_id("canvas") {
            Some(el) => el,
            None => {
                let el = document
                    .create_element("canvas")
                    .map_err(|_| WalkError::MissingRenderContext("cannot create canvas".into()))?;
                el.set_id("canvas");
                let body = document
                    .body()
                    .ok_or_else(|| WalkError::MissingRenderContext("page has no body".into()))?;
                body.append_child(&el)
                    .map_err(|_| WalkError::MissingRenderContext("cannot attach canvas".into()))?;
                el
            }
        };
        element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WalkError::MissingRenderContext("#canvas is not a canvas".into()))
    }

    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    pub fn run() -> Result<(), WalkError> {
        log::info!("Trailstep starting...");

        let window = web_sys::window()
            .ok_or_else(|| WalkError::MissingRenderContext("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| WalkError::MissingRenderContext("no document".into()))?;

        let canvas = acquire_canvas(&document)?;
        let mut renderer = CanvasRenderer::new(canvas.clone())?;
        let (w, h) = window_size(&window);
        renderer.resize(w, h);

        let config = WalkConfig::load();
        let gestures = config.gestures;
        let now = js_sys::Date::now();
        let walk = Rc::new(RefCell::new(Walk::new(config, renderer, now)));

        log::info!(
            "Track: {} segments, {} units per lap",
            walk.borrow().controller.track().len(),
            walk.borrow().controller.track().total_length()
        );

        // Listeners outlive the source; it can drop once installed
        match select_gesture_source(&canvas, gestures) {
            Ok(mut source) => {
                let walk = walk.clone();
                source.on_gesture_delta(Box::new(move |delta| {
                    walk.borrow_mut().on_gesture(delta);
                }))?;
            }
            Err(e) => log::warn!("{} - touch input is inert", e),
        }

        setup_resize(walk.clone());

        request_animation_frame(walk);

        log::info!("Trailstep running!");
        Ok(())
    }

    fn setup_resize(walk: Rc<RefCell<Walk>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                let (w, h) = window_size(&window);
                walk.borrow_mut().renderer.resize(w, h);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(walk: Rc<RefCell<Walk>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            walk_loop(walk);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn walk_loop(walk: Rc<RefCell<Walk>>) {
        walk.borrow_mut().frame(js_sys::Date::now());
        request_animation_frame(walk);
    }

    /// Put a fatal startup error in front of the user
    pub fn show_fatal(err: &WalkError) {
        log::error!("{}", err);
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let target = document
            .get_element_by_id("instructionsDisplay")
            .or_else(|| document.body().map(Into::into));
        if let Some(el) = target {
            el.set_text_content(Some(&format!("Unable to start: {}", err)));
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_walk::run() {
        if e.is_recoverable() {
            log::warn!("{}", e);
        } else {
            wasm_walk::show_fatal(&e);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trailstep (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    walk_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted walk over one lap of the configured track
#[cfg(not(target_arch = "wasm32"))]
fn walk_demo() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use trailstep::WalkConfig;
    use trailstep::platform::{GestureDelta, GestureSource, RecordingHaptics, ScriptedGestures};
    use trailstep::sim::{FootprintTrail, PlayerState, StepController};
    use trailstep::ui::HudSnapshot;

    let config = WalkConfig::load();
    let controller = match config.build_controller() {
        Ok(controller) => controller,
        Err(e) => {
            log::warn!("Invalid track ({}), using default", e);
            StepController::default()
        }
    };

    let state = Rc::new(RefCell::new((
        PlayerState::new(0.0),
        RecordingHaptics::new(),
        FootprintTrail::new(1),
    )));

    // Swipe in 20 px samples until the camera completes a lap
    let lap = controller.track().total_length().max(1.0);
    let mut source = ScriptedGestures::new((0..400).map(|i| GestureDelta {
        dy: 20.0,
        at: Vec2::new(200.0, 300.0 + (i % 10) as f32),
    }));

    {
        let state = state.clone();
        let controller = controller.clone();
        let result = source.on_gesture_delta(Box::new(move |delta| {
            let mut guard = state.borrow_mut();
            let (player, haptics, footprints) = &mut *guard;
            if player.scroll_position >= lap {
                return;
            }
            let result = controller.step(player, delta.dy, haptics);
            if result.step_completed {
                footprints.spawn(delta.at);
                log::info!(
                    "Step {} on {} at {:.1}",
                    player.step_count,
                    result.terrain.label(),
                    player.scroll_position
                );
            }
        }));
        if let Err(e) = result {
            log::error!("{}", e);
            return;
        }
    }

    let sent = source.pump();
    let guard = state.borrow();
    let (player, haptics, footprints) = &*guard;
    let hud = HudSnapshot::capture(player, controller.track(), config.pixels_per_meter, 0.0);

    println!("\nWalked one lap with {} gesture samples", sent);
    println!("{}", hud.distance_text());
    println!("{}", hud.terrain_text());
    println!("{}", hud.steps_text());
    println!(
        "Haptic requests: {} ({} ms of vibration), footprints: {}",
        haptics.played.len(),
        haptics.total_pulse_ms(),
        footprints.len()
    );
}
