//! Flappy Wings entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use flappy_wings::Settings;
    use flappy_wings::audio::{AudioManager, SoundCue};
    use flappy_wings::consts::*;
    use flappy_wings::highscore;
    use flappy_wings::renderer::Renderer;
    use flappy_wings::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(seed, highscore::load()),
                renderer: None,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks for the elapsed wall-clock time
        fn update(&mut self, dt: f32) {
            // A backgrounded tab hands us an arbitrarily large delta;
            // clamp it so one frame can never tunnel through a pipe
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                let events = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs are consumed by the first tick
                self.input = TickInput::default();

                self.dispatch(&events);
            }
        }

        /// Map tick events to collaborator side effects. Audio and
        /// storage failures stay inside the collaborators.
        fn dispatch(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::Flapped => self.audio.play(SoundCue::Jump),
                    GameEvent::Scored => self.audio.play(SoundCue::Score),
                    GameEvent::Collided => self.audio.play(SoundCue::Hit),
                    GameEvent::NewHighScore => {
                        highscore::save(self.state.high_score);
                        self.audio.play(SoundCue::NewHighScore);
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.draw(&self.state);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("best-score") {
                el.set_text_content(Some(&self.state.high_score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Overlay visibility follows the phase
            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute(
                        "class",
                        if visible { "overlay" } else { "overlay hidden" },
                    );
                }
            };
            show("start-screen", self.state.phase == GamePhase::Start);
            show("gameover-screen", self.state.phase == GamePhase::GameOver);
            show(
                "new-record",
                self.state.phase == GamePhase::GameOver && self.state.new_high_score,
            );
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no #canvas element")
            .dyn_into()
            .expect("#canvas is not a canvas");

        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed);
        game.renderer = Renderer::new(&canvas);
        if game.renderer.is_none() {
            log::error!("Failed to acquire 2D canvas context");
        }

        let game = Rc::new(RefCell::new(game));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame_loop(game);

        log::info!("Flappy Wings running (seed {seed})");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Primary activate: click/tap on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut game = game.borrow_mut();
                game.audio.resume();
                game.input.activate = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Primary activate: touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                let mut game = game.borrow_mut();
                game.audio.resume();
                game.input.activate = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: space activates, M toggles mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default();
                        let mut game = game.borrow_mut();
                        game.audio.resume();
                        game.input.activate = true;
                    }
                    "KeyM" => game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let window = web_sys::window().expect("no window");
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Secondary navigate: menu button on the game-over overlay
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(button) = document.get_element_by_id("menu-btn") {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().input.menu = true;
                });
                let _ = button
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Drive update/render off the browser's frame-presentation cadence
    fn request_animation_frame_loop(game: Rc<RefCell<Game>>) {
        let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let handle_clone = handle.clone();

        *handle_clone.borrow_mut() = Some(Closure::new(move |time: f64| {
            {
                let mut game = game.borrow_mut();
                let dt = if game.last_time > 0.0 {
                    ((time - game.last_time) / 1000.0) as f32
                } else {
                    0.0
                };
                game.last_time = time;
                game.update(dt);
                game.render();
                game.update_hud();
            }

            if let Some(window) = web_sys::window() {
                if let Some(closure) = handle.borrow().as_ref() {
                    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
                }
            }
        }));

        if let Some(window) = web_sys::window() {
            if let Some(closure) = handle_clone.borrow().as_ref() {
                let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_wings::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Flappy Wings (native) starting...");
    log::info!("Rendering requires a browser - build for wasm32 for the web version");

    // Headless demo run: flap on a fixed cadence and report the outcome
    let mut state = GameState::new(0xF1AB, 0);
    let activate = TickInput {
        activate: true,
        menu: false,
    };
    tick(&mut state, &activate);

    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 36_000 {
        let input = if state.bird.pos.y >= 300.0 {
            activate
        } else {
            TickInput::default()
        };
        tick(&mut state, &input);
        ticks += 1;
    }

    println!(
        "Headless run over after {} ticks, score {}",
        ticks, state.score
    );
}
