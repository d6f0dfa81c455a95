//! Verse Cricket entry point
//!
//! The browser build wires DOM input and the HUD to the simulation. The
//! native build runs a headless innings with a simple batting bot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent, PointerEvent};

    use verse_cricket::audio::AudioManager;
    use verse_cricket::persistence::LocalStorage;
    use verse_cricket::sim::{Direction, GameEvent, GamePhase, RewardBanner};
    use verse_cricket::{Game, KeyValueStore, MemoryStore, Settings, Snapshot};

    type Store = Box<dyn KeyValueStore>;

    /// Game instance plus its audio
    struct App {
        game: Game<Store>,
        audio: AudioManager,
    }

    impl App {
        fn swing(&mut self, direction: Direction) {
            self.game.swing(direction);
        }

        fn start(&mut self) {
            self.audio.resume();
            self.game.start();
        }

        fn toggle_mute(&mut self) {
            let muted = !self.audio.settings().muted;
            self.audio.set_muted(muted);
            self.audio.settings().save(self.game.store_mut());
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        fn frame(&mut self, time: f64) {
            for event in self.game.tick(time) {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::Banner(banner) => show_banner(&banner),
                    GameEvent::BatSwung(direction) => show_swing(direction),
                    GameEvent::GameOver { score } => {
                        log::info!("Game over with {} runs", score);
                    }
                    _ => {}
                }
            }
            update_hud(&self.game.snapshot());
        }
    }

    fn dom_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn show_banner(banner: &RewardBanner) {
        let Some(document) = dom_document() else { return };
        if let Some(el) = document.get_element_by_id("banner") {
            el.set_text_content(Some(&banner.text));
            let _ = el.set_attribute("style", &format!("color: {}", banner.color));
            let _ = el.set_attribute("data-id", &banner.id.to_string());
            restart_animation(&el, "pop");
        }
    }

    fn show_swing(direction: Direction) {
        let Some(document) = dom_document() else { return };
        if let Some(el) = document.get_element_by_id("bat") {
            let class = match direction {
                Direction::Left => "swing-left",
                Direction::Right => "swing-right",
            };
            restart_animation(&el, class);
        }
    }

    /// Swap in `class`, forcing a layout in between so the CSS animation replays
    fn restart_animation(el: &Element, class: &str) {
        let _ = el.set_attribute("class", "");
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.offset_width();
        }
        let _ = el.set_attribute("class", class);
    }

    /// Update HUD elements in DOM
    fn update_hud(snap: &Snapshot) {
        let Some(document) = dom_document() else { return };

        set_text(&document, "hud-score", &snap.score.to_string());
        set_text(&document, "hud-outs", &format!("{}/3", snap.outs));
        set_text(&document, "hud-balls", &snap.balls_faced.to_string());
        set_text(&document, "hud-last", &snap.last_outcome_label);
        set_text(&document, "hud-history", &snap.outcome_history.join(" "));
        if let Some(name) = &snap.player_name {
            set_text(&document, "hud-player", name);
        }

        set_visible(&document, "name-screen", snap.phase == GamePhase::EnteringName);
        set_visible(&document, "start-screen", snap.phase == GamePhase::Idle);
        set_visible(&document, "hud", snap.phase == GamePhase::Playing);
        set_visible(&document, "gameover-screen", snap.phase == GamePhase::Ended);

        if snap.phase == GamePhase::Ended {
            set_text(&document, "final-score", &snap.score.to_string());
        }

        let board = snap
            .leaderboard
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {} - {}", i + 1, e.name, e.score))
            .collect::<Vec<_>>()
            .join("\n");
        set_text(&document, "leaderboard", &board);
    }

    fn open_store() -> Store {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("{} - progress will not be saved", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Verse Cricket starting...");

        let store = open_store();
        let settings = Settings::load(&store);
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(store, seed),
            audio: AudioManager::new(settings),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(app.clone());
        setup_buttons(app.clone());
        setup_name_form(app.clone());

        update_hud(&app.borrow().game.snapshot());
        request_animation_frame(app);

        log::info!("Verse Cricket running!");
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut a = app.borrow_mut();
            match event.key().as_str() {
                "ArrowLeft" | "a" | "A" => a.swing(Direction::Left),
                "ArrowRight" | "d" | "D" => a.swing(Direction::Right),
                "m" | "M" => a.toggle_mute(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = dom_document() else { return };

        for (id, direction) in [("btn-left", Direction::Left), ("btn-right", Direction::Right)] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    app.borrow_mut().swing(direction);
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        for id in ["start-btn", "replay-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    app.borrow_mut().start();
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_name_form(app: Rc<RefCell<App>>) {
        let Some(document) = dom_document() else { return };
        let Some(form) = document.get_element_by_id("name-form") else { return };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Some(document) = dom_document() else { return };
            let Some(input) = document
                .get_element_by_id("name-input")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };

            let result = app.borrow_mut().game.submit_name(&input.value());
            match result {
                Ok(()) => set_text(&document, "name-error", ""),
                Err(e) => {
                    log::warn!("Name rejected: {}", e);
                    set_text(&document, "name-error", &e.to_string());
                }
            }
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};
    use verse_cricket::sim::{Direction, GameEvent, GamePhase};
    use verse_cricket::{Game, MemoryStore};

    env_logger::init();
    log::info!("Verse Cricket (native) starting...");
    log::info!("Browser build required for play - running a headless innings");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(MemoryStore::new(), seed);
    if let Err(e) = game.submit_name("Bot") {
        log::warn!("{}", e);
        return;
    }
    game.start();

    // Bat at a random point late in the approach, connecting more often than not
    const FRAME_MS: f64 = 1000.0 / 60.0;
    let mut now = 0.0;
    let mut aim = 0.0f32;
    while game.state().phase != GamePhase::Ended && now < 600_000.0 {
        now += FRAME_MS;
        let ball = &game.state().ball;
        if ball.is_active() && ball.depth >= aim {
            let direction = if ball.depth.to_bits() % 2 == 0 {
                Direction::Left
            } else {
                Direction::Right
            };
            game.swing(direction);
        }
        for event in game.tick(now) {
            match event {
                GameEvent::Banner(banner) => println!("{}", banner.text),
                GameEvent::DeliverySpawned { .. } => {
                    aim = 0.6 + (seed.wrapping_add(now as u64) % 40) as f32 / 100.0;
                }
                _ => {}
            }
        }
    }

    let snap = game.snapshot();
    println!(
        "Final score: {} from {} balls ({})",
        snap.score,
        snap.balls_faced,
        snap.outcome_history.join(" ")
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
