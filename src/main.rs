//! Block Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, Performance};

    use block_dodge::audio::{AudioManager, SoundEffect};
    use block_dodge::render::{BlockSprite, Frame, game_over_message};
    use block_dodge::sim::{Clock, Game, GameEvent, GamePhase, PlayerInput};
    use block_dodge::{GameConfig, GameError, Settings};

    /// `performance.now()` in whole milliseconds
    struct PerformanceClock {
        performance: Performance,
    }

    impl Clock for PerformanceClock {
        fn now_ms(&self) -> u64 {
            self.performance.now() as u64
        }
    }

    /// DOM nodes the game writes to
    struct Dom {
        document: Document,
        playfield: HtmlElement,
        player: HtmlElement,
        score: Element,
        lives: Element,
        /// Optional effect readout
        effects: Option<Element>,
        blocks: HashMap<u32, HtmlElement>,
    }

    /// Game instance holding all state
    struct App {
        game: Game,
        settings: Settings,
        clock: PerformanceClock,
        dom: Dom,
        audio: AudioManager,
    }

    fn element(document: &Document, id: &'static str) -> Result<Element, GameError> {
        document
            .get_element_by_id(id)
            .ok_or(GameError::MissingElement(id))
    }

    fn html_element(document: &Document, id: &'static str) -> Result<HtmlElement, GameError> {
        element(document, id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GameError::MissingElement(id))
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        if el.style().set_property(property, value).is_err() {
            log::warn!("Failed to set {property}");
        }
    }

    fn px(value: f32) -> String {
        format!("{value}px")
    }

    /// Optional `<script id="game-config" type="application/json">` override
    fn load_config(document: &Document) -> GameConfig {
        let Some(json) = document
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
        else {
            return GameConfig::default();
        };

        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded game config");
                config
            }
            Err(e) => {
                log::warn!("Ignoring game config: {e}");
                GameConfig::default()
            }
        }
    }

    impl Dom {
        fn block_element(&mut self, sprite: &BlockSprite) -> Option<HtmlElement> {
            if let Some(el) = self.blocks.get(&sprite.id) {
                return Some(el.clone());
            }

            let el = self
                .document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            let classes = el.class_list();
            classes.add_1("block").ok()?;
            if let Some(class) = sprite.kind.css_class() {
                classes.add_1(class).ok()?;
            }
            self.playfield.append_child(&el).ok()?;
            self.blocks.insert(sprite.id, el.clone());
            Some(el)
        }

        fn apply(&mut self, frame: &Frame) {
            set_style(&self.playfield, "background-color", frame.background);
            set_style(&self.player, "left", &px(frame.player.min.x));

            let mut alive = HashSet::with_capacity(frame.blocks.len());
            for sprite in &frame.blocks {
                alive.insert(sprite.id);
                match self.block_element(sprite) {
                    Some(el) => {
                        set_style(&el, "left", &px(sprite.rect.min.x));
                        set_style(&el, "top", &px(sprite.rect.min.y));
                    }
                    None => log::warn!("Failed to create block {}", sprite.id),
                }
            }
            self.blocks.retain(|id, el| {
                let keep = alive.contains(id);
                if !keep {
                    el.remove();
                }
                keep
            });

            self.score.set_text_content(Some(&frame.hud.score));
            self.lives.set_text_content(Some(&frame.hud.lives));
            if let Some(effects) = &self.effects {
                effects.set_text_content(Some(&frame.hud.effects.join(" ")));
            }
        }
    }

    impl App {
        /// Catch up the timers, react to events and redraw.
        /// Returns false once the run is over.
        fn update(&mut self) -> bool {
            let now = self.clock.now_ms();
            self.game.advance_to(now);

            let mut final_score = None;
            for event in self.game.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::GameOver { final_score: score } = event {
                    final_score = Some(score);
                }
            }

            let frame = Frame::capture(&self.game.state, &self.settings);
            self.dom.apply(&frame);

            if let Some(score) = final_score {
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&game_over_message(score));
                }
            }

            self.game.phase() != GamePhase::GameOver
        }
    }

    pub fn run() -> Result<(), GameError> {
        log::info!("Block Dodge starting...");

        let window = web_sys::window().ok_or(GameError::MissingElement("window"))?;
        let document = window
            .document()
            .ok_or(GameError::MissingElement("document"))?;
        let performance = window
            .performance()
            .ok_or(GameError::MissingElement("performance"))?;

        let playfield = html_element(&document, "game")?;
        let player = html_element(&document, "player")?;
        let score = element(&document, "score")?;
        let lives = element(&document, "lives")?;
        let effects = document.get_element_by_id("effects");

        // Playfield must be laid out before the simulation starts
        let config = load_config(&document).with_measured_sizes(
            (
                playfield.offset_width() as f32,
                playfield.offset_height() as f32,
            ),
            (player.offset_width() as f32, player.offset_height() as f32),
        )?;

        let seed = js_sys::Date::now() as u64;
        let clock = PerformanceClock { performance };
        let mut game = Game::new(seed, config.tuning)?;
        game.start_with(&clock)?;

        let audio = AudioManager::new(&config.settings);
        let app = Rc::new(RefCell::new(App {
            game,
            settings: config.settings,
            clock,
            dom: Dom {
                document: document.clone(),
                playfield,
                player,
                score,
                lives,
                effects,
                blocks: HashMap::new(),
            },
            audio,
        }));

        setup_keyboard(app.clone());
        setup_visibility(app.clone(), &document);

        // Start game loop
        request_animation_frame(app);

        log::info!("Block Dodge running with seed {}", seed);
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let mut app = app.borrow_mut();

            if key == "i" || key == "I" {
                app.game.idle_mode = !app.game.idle_mode;
                log::info!("Idle mode: {}", app.game.idle_mode);
                return;
            }

            if let Some(input) = PlayerInput::from_key(&key) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                let now = app.clock.now_ms();
                app.game.handle_input(input, now);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_visibility(app: Rc<RefCell<App>>, document: &Document) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            app.borrow_mut().audio.set_hidden(hidden);
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let running = app.borrow_mut().update();
        if running {
            request_animation_frame(app);
        } else {
            log::info!("Game loop stopped");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Block Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    if let Err(e) = run_demo(seed) {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let the autopilot play for up to five simulated minutes
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(seed: u64) -> Result<(), block_dodge::GameError> {
    use block_dodge::render::{Frame, game_over_message};
    use block_dodge::sim::{Clock, Game, GameEvent, GamePhase, ManualClock};
    use block_dodge::{Settings, Tuning};

    const DEMO_LIMIT_MS: u64 = 5 * 60 * 1000;

    let tuning = Tuning::default();
    let step = tuning.fast_tick_ms;
    let mut game = Game::new(seed, tuning)?;
    game.idle_mode = true;

    let clock = ManualClock::new(0);
    game.start_with(&clock)?;

    while game.phase() == GamePhase::Running && clock.now_ms() < DEMO_LIMIT_MS {
        clock.advance(step);
        game.advance(&clock);

        let secs = game.state.now_ms as f32 / 1000.0;
        for event in game.drain_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("[{secs:.1}s] level {level}"),
                GameEvent::LifeLost { lives } => log::info!("[{secs:.1}s] life lost, {lives} left"),
                GameEvent::LifeGained { lives } => log::info!("[{secs:.1}s] shield, {lives} lives"),
                GameEvent::SlowMotionStarted => log::info!("[{secs:.1}s] slow motion"),
                GameEvent::GameOver { final_score } => println!("{}", game_over_message(final_score)),
                _ => {}
            }
        }
    }

    let frame = Frame::capture(&game.state, &Settings::default());
    println!(
        "seed {} after {:.1}s: {} | {}",
        seed,
        game.state.now_ms as f32 / 1000.0,
        frame.hud.score,
        frame.hud.lives
    );
    Ok(())
}
