//! Ball Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use ball_dash::audio::AudioManager;
    use ball_dash::persistence::LocalStore;
    use ball_dash::platform::now_ms;
    use ball_dash::renderer::CanvasSurface;
    use ball_dash::sim::{Field, GamePhase};
    use ball_dash::{Driver, FrameOutcome};

    /// Game instance holding all state
    struct Game {
        driver: Driver<LocalStore>,
        surface: CanvasSurface,
        audio: AudioManager,
        /// An animation frame is already requested
        loop_active: bool,
    }

    impl Game {
        /// Run one frame; returns whether to keep looping
        fn step(&mut self) -> bool {
            let outcome = self
                .driver
                .frame(&mut self.surface, &mut self.audio, now_ms());
            outcome == FrameOutcome::Continue
        }

        /// Sync overlay screens with the current phase
        fn update_overlays(&self, document: &Document) {
            let phase = self.driver.phase();

            if let Some(btn) = document.get_element_by_id("pauseButton") {
                let label = if phase == GamePhase::Paused {
                    "Resume"
                } else {
                    "Pause"
                };
                btn.set_text_content(Some(label));
            }

            if let Some(el) = document.get_element_by_id("gameOverScreen") {
                if phase == GamePhase::GameOver {
                    let state = self.driver.state();
                    set_text(document, "gameOverPlayer", &state.player_name);
                    set_text(document, "currentScore", &state.score.to_string());
                    set_text(document, "highScore", &self.driver.high_score().to_string());
                    set_text(document, "currentLives", &state.lives.to_string());
                    let _ = el.set_attribute("class", "overlay");
                } else {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn current_document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ball Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the play field from the viewport once, at load
        let viewport_w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1000.0);
        let viewport_h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let field = Field::from_viewport(viewport_w, viewport_h);
        canvas.set_width(field.width as u32);
        canvas.set_height(field.height as u32);

        let surface = CanvasSurface::new(canvas).expect("no 2d context");
        let seed = js_sys::Date::now() as u64;
        let driver = Driver::new(seed, field, LocalStore::open());
        let audio = AudioManager::new(driver.settings().effective_volume());

        let game = Rc::new(RefCell::new(Game {
            driver,
            surface,
            audio,
            loop_active: false,
        }));

        setup_keyboard(game.clone());
        setup_start_button(game.clone());
        setup_pause_button(game.clone());
        setup_play_again_button(game.clone());

        log::info!("Ball Dash ready!");
    }

    /// Request frames until the driver says stop
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_active || !g.driver.is_running() {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.step();
            if !keep_going {
                g.loop_active = false;
                g.update_overlays(&current_document());
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let toggled = {
                    let mut g = game.borrow_mut();
                    let toggled = g.driver.key_down(&event.key());
                    let volume = g.driver.settings().effective_volume();
                    g.audio.set_volume(volume);
                    toggled
                };
                if toggled {
                    game.borrow().update_overlays(&current_document());
                    ensure_loop(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().driver.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(game: Rc<RefCell<Game>>) {
        let document = current_document();

        if let Some(btn) = document.get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let document = current_document();
                let name = document
                    .get_element_by_id("playerName")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();

                {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    if !g.driver.start(&name) {
                        return;
                    }
                }
                if let Some(el) = document.get_element_by_id("startScreen") {
                    let _ = el.set_attribute("class", "overlay hidden");
                }
                ensure_loop(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pause_button(game: Rc<RefCell<Game>>) {
        let document = current_document();

        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if game.borrow_mut().driver.toggle_pause() {
                    game.borrow().update_overlays(&current_document());
                    ensure_loop(&game);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_again_button(game: Rc<RefCell<Game>>) {
        let document = current_document();

        if let Some(btn) = document.get_element_by_id("playAgainButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if game.borrow_mut().driver.play_again() {
                    game.borrow().update_overlays(&current_document());
                    ensure_loop(&game);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulated frame length for the headless run (ms)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAME_MS: f64 = 1000.0 / 60.0;

/// Give up after this many frames (about five minutes of play)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_MAX_FRAMES: u64 = 60 * 60 * 5;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_dash::audio::NullAudio;
    use ball_dash::persistence::MemoryStore;
    use ball_dash::renderer::NullSurface;
    use ball_dash::sim::Field;
    use ball_dash::{Driver, FrameOutcome};

    env_logger::init();
    log::info!("Ball Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` to play in a browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let mut driver = Driver::new(seed, Field::new(800.0, 400.0), MemoryStore::new());
    driver.start("Autopilot");

    let mut surface = NullSurface;
    let mut audio = NullAudio;
    let mut now = 0.0;
    let mut frames = 0;

    while frames < HEADLESS_MAX_FRAMES {
        let jump = autopilot_wants_jump(driver.state());
        if jump {
            driver.key_down("ArrowUp");
        } else {
            driver.key_up("ArrowUp");
        }

        now += HEADLESS_FRAME_MS;
        frames += 1;
        if driver.frame(&mut surface, &mut audio, now) == FrameOutcome::Stop {
            break;
        }
    }

    let state = driver.state();
    println!(
        "{} finished after {} frames: score {}, lives {}, speed {}, background {}",
        state.player_name,
        frames,
        state.score,
        state.lives,
        state.speed,
        state.background.as_str()
    );
    println!("High score: {}", driver.high_score());
}

/// Jump when a harmful obstacle is about to reach the ball
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_jump(state: &ball_dash::sim::GameState) -> bool {
    let player = &state.player;
    let reach = player.radius + state.speed * 12.0;
    state.obstacles.iter().any(|o| {
        o.kind.is_harmful()
            && o.pos.x > player.pos.x - player.radius
            && o.pos.x - (player.pos.x + player.radius) < reach
    })
}
