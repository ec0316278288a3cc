//! Rock Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use rock_dodge::renderer::CanvasRenderer;
    use rock_dodge::sim::{Direction, GamePhase, GameState, tick};
    use rock_dodge::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        settings: Settings,
        highscores: HighScores,
        /// A frame callback is already queued; stops resume spam from
        /// starting a second loop
        frame_pending: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase for the high-score commit
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer) -> Self {
            Self {
                state: GameState::new(seed),
                renderer,
                settings: Settings::load(),
                highscores: HighScores::load(),
                frame_pending: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::NotStarted,
            }
        }

        /// One scheduler callback: tick, bookkeeping, draw. Returns whether
        /// the host should request another frame.
        fn frame(&mut self, time: f64) -> bool {
            tick(&mut self.state);
            self.track_fps(time);
            self.check_phase_transition();
            self.render();
            self.state.is_running()
        }

        fn render(&self) {
            self.renderer.draw(
                &self.state,
                &self.settings,
                self.fps,
                self.highscores.top_score(),
            );
        }

        fn track_fps(&mut self, time: f64) {
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

        /// Commit the score to the leaderboard when a run ends
        fn check_phase_transition(&mut self) {
            let phase = self.state.phase;
            if phase != self.last_phase {
                if phase == GamePhase::GameOver {
                    if let Some(rank) = self.highscores.add_score(
                        self.state.score,
                        self.state.level,
                        js_sys::Date::now(),
                    ) {
                        log::info!("New high score: rank {}", rank);
                        self.highscores.save();
                    }
                }
                self.last_phase = phase;
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rock Dodge starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("the-canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(canvas)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));

        // Static scene until the first start press
        game.borrow().render();

        setup_input_handlers(&document, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_auto_pause(game)?;

        log::info!("Rock Dodge ready");
        Ok(())
    }

    /// Begin a fresh session (start button, or Enter/Space). Ignored while a
    /// session is running; allowed from NotStarted, Paused, and GameOver.
    fn start_session(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.state.is_running() {
                return;
            }
            let seed = js_sys::Date::now() as u64;
            g.state.reset(seed);
            g.last_phase = GamePhase::Running;
        }
        set_pause_label("Pause");
        schedule(game.clone());
    }

    /// Running ⇄ Paused. Resuming re-requests the next frame; the sim itself
    /// ignores the toggle before the first start and after game over.
    fn toggle_pause(game: &Rc<RefCell<Game>>) {
        let resumed = {
            let mut g = game.borrow_mut();
            let running = g.state.toggle_pause();
            match g.state.phase {
                GamePhase::Running => set_pause_label("Pause"),
                GamePhase::Paused => set_pause_label("Resume"),
                _ => {}
            }
            running
        };
        if resumed {
            schedule(game.clone());
        }
    }

    fn set_pause_label(text: &str) {
        if let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("pause"))
        {
            btn.set_text_content(Some(text));
        }
    }

    /// Queue the next animation frame unless one is already pending
    fn schedule(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_pending {
                return;
            }
            g.frame_pending = true;
        }
        let window = web_sys::window().expect("no window");
        let cb = Closure::once_into_js(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(cb.unchecked_ref());
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;
            g.frame(time)
        };
        if keep_going {
            schedule(game);
        }
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                "ArrowLeft" => game.borrow_mut().state.handle_input(Direction::Left),
                "ArrowRight" => game.borrow_mut().state.handle_input(Direction::Right),
                " " | "Enter" => start_session(&game),
                "Escape" | "p" | "P" => toggle_pause(&game),
                _ => {}
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("start") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_session(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                toggle_pause(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let running = game.borrow().state.is_running();
                    if running {
                        toggle_pause(&game);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let running = game.borrow().state.is_running();
                if running {
                    toggle_pause(&game);
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rock_dodge::consts::*;
    use rock_dodge::sim::{Direction, GamePhase, GameState, tick};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Rock Dodge headless demo (seed {})", seed);

    let mut state = GameState::new(seed);
    state.reset(seed);

    // Naive dodge policy: once a rock in the player's column reaches the
    // lower half of the play area, step away from its center.
    let mut frames = 0u32;
    for _ in 0..100_000u32 {
        let p = state.player.pos;
        let threat = state
            .rocks
            .iter()
            .filter(|r| r.pos.y > PLAY_AREA_HEIGHT / 2.0)
            .filter(|r| r.pos.x < p.x + PLAYER_SIZE && r.pos.x + r.size > p.x)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        if let Some(rock) = threat {
            let rock_center = rock.pos.x + rock.size / 2.0;
            let player_center = p.x + PLAYER_SIZE / 2.0;
            state.handle_input(if rock_center > player_center {
                Direction::Left
            } else {
                Direction::Right
            });
        }

        tick(&mut state);
        frames += 1;
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "demo over after {} frames: score {} at level {}",
        frames, state.score, state.level
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
