//! Sky Gap entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build renders with WebGPU; the native build runs a headless
//! autopilot session and prints a JSON report.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use sky_gap::SetupError;
    use sky_gap::Settings;
    use sky_gap::audio::AudioManager;
    use sky_gap::consts::*;
    use sky_gap::renderer::{RenderState, build_scene};
    use sky_gap::sim::{GameEvent, GameState, TickInput, tick};
    use sky_gap::sound::cues_for;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        document: Document,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, document: Document) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                state: GameState::new(seed),
                settings,
                render_state: None,
                audio,
                document,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Queue a tap for the next tick
        fn tap(&mut self) {
            self.input.tap = true;
            self.audio.resume();
        }

        fn toggle_autopilot(&mut self) {
            self.input.autopilot = !self.input.autopilot;
            log::info!("Autopilot: {}", self.input.autopilot);
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.tap = false;
            }

            self.drain_events();
            self.audio.update();

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Forward simulation events to audio
        fn drain_events(&mut self) {
            let events = self.state.take_events();
            for event in &events {
                if let GameEvent::SceneReset { seed } = event {
                    log::debug!("New scene {}", seed);
                }
            }
            for cue in cues_for(&events) {
                self.audio.handle(cue);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.state, &self.settings);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = &self.document;

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score_label()));
            }

            if let Some(el) = document.get_element_by_id("logo") {
                if self.state.logo_visible {
                    let style = format!("opacity: {:.3}", self.state.logo_alpha);
                    let _ = el.set_attribute("style", &style);
                    let _ = el.set_attribute("class", "overlay");
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.game_over_visible {
                    let _ = el.set_attribute("class", "overlay");
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} FPS", self.fps)));
                    let _ = el.set_attribute("class", "overlay");
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("autopilot") {
                let class = if self.input.autopilot { "overlay" } else { "overlay hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() -> Result<(), SetupError> {
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| SetupError::Logger(e.to_string()))?;

        log::info!("Sky Gap starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(SetupError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| SetupError::NotACanvas("canvas"))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings, document.clone())));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_auto_mute(&window, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(&window, game);

        log::info!("Sky Gap running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().tap();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Keep the browser from synthesizing a second (mouse) tap
                event.prevent_default();
                game.borrow_mut().tap();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        g.tap();
                    }
                    "a" | "A" => g.toggle_autopilot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(window: &Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        if let Some(window) = web_sys::window() {
            request_animation_frame(&window, game);
        }
    }

    /// Silence audio while the page is hidden or unfocused
    fn setup_auto_mute(window: &Window, game: Rc<RefCell<Game>>) {
        if !game.borrow().settings.mute_on_blur {
            return;
        }

        let listeners: [(&str, bool); 2] = [("blur", true), ("focus", false)];
        for (name, muted) in listeners {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.audio.set_muted(muted);
                // Don't let the hidden time turn into a burst of catch-up ticks
                g.last_time = 0.0;
                log::debug!("Audio muted: {}", muted);
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
        wasm_bindgen::throw_str(&e.to_string());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use sky_gap::Settings;
    use sky_gap::headless::{HeadlessConfig, run_headless};

    env_logger::init();
    log::info!("Sky Gap (native) starting headless autopilot run...");

    let settings = Settings::load();
    let config = HeadlessConfig::from_env();
    log::info!("Seed {}, {} simulated seconds", config.seed, config.seconds);

    let report = run_headless(&config, &settings);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize report: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
