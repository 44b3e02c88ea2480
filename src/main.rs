//! Shadow Runner entry point
//!
//! Handles platform-specific initialization and wires input and
//! presentation around the simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use shadow_runner::consts::*;
    use shadow_runner::platform::web::{BrowserScheduler, WakeupSink};
    use shadow_runner::platform::{InputAction, key_action};
    use shadow_runner::sim::{CollectibleKind, GameEvent, GamePhase, ObstacleKind, Wakeup};
    use shadow_runner::{Game, Tuning};

    type SharedGame = Rc<RefCell<Game<BrowserScheduler>>>;

    /// Read an optional JSON tuning blob embedded in the page
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from page");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring page tuning: {}", e);
                Tuning::default()
            }
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Entity markup for the play field, positioned from the shared geometry
    fn field_html(game: &Game<BrowserScheduler>) -> String {
        let state = game.state();
        let tuning = game.tuning();
        let mut html = String::new();

        let player_bottom = if state.airborne {
            GROUND_HEIGHT + JUMP_RISE
        } else {
            GROUND_HEIGHT
        };
        let _ = write!(
            html,
            r#"<div class="player {}" style="left:{}px;bottom:{}px;width:{}px;height:{}px"></div>"#,
            if state.airborne { "jump" } else { "run" },
            tuning.player_x,
            player_bottom,
            tuning.player_width,
            tuning.player_height,
        );

        for obstacle in &state.obstacles {
            let (class, bottom, height) = match obstacle.kind {
                ObstacleKind::Barrier => ("barrier", GROUND_HEIGHT, BARRIER_HEIGHT),
                ObstacleKind::Hole => ("hole", GROUND_HEIGHT - HOLE_HEIGHT, HOLE_HEIGHT),
            };
            let _ = write!(
                html,
                r#"<div class="{}" style="left:{}px;bottom:{}px;width:{}px;height:{}px"></div>"#,
                class, obstacle.x, bottom, tuning.obstacle_width, height,
            );
        }

        for collectible in &state.collectibles {
            let class = match collectible.kind {
                CollectibleKind::Star => "star",
                CollectibleKind::Cookie => "cookie",
            };
            let _ = write!(
                html,
                r#"<div class="{}" style="left:{}px;bottom:{}px;width:{size}px;height:{size}px"></div>"#,
                class,
                collectible.x,
                collectible.y,
                size = tuning.collectible_size,
            );
        }

        html
    }

    /// Push the current snapshot into the DOM
    fn present(game: &Game<BrowserScheduler>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let state = game.state();

        show(&document, "menu", state.phase == GamePhase::Menu);
        show(&document, "hud", state.phase == GamePhase::Playing);
        show(&document, "game-over", state.phase == GamePhase::GameOver);

        let score = state.score.to_string();
        let meters = format!("{}m", state.meters());
        match state.phase {
            GamePhase::Playing => {
                set_text(&document, "#hud-score .hud-value", &score);
                set_text(&document, "#hud-distance .hud-value", &meters);
            }
            GamePhase::GameOver => {
                set_text(&document, "#final-score", &score);
                set_text(&document, "#final-distance", &meters);
            }
            GamePhase::Menu => {}
        }

        if let Some(field) = document.get_element_by_id("field") {
            if state.phase == GamePhase::Playing {
                field.set_inner_html(&field_html(game));
            } else {
                field.set_inner_html("");
            }
        }
    }

    fn on_wakeup(game: &SharedGame, wakeup: Wakeup) {
        let mut g = game.borrow_mut();
        if let Some(outcome) = g.wake(wakeup) {
            for event in &outcome.events {
                if let GameEvent::SpeedUp { distance, speed } = event {
                    log::info!("Speed up at {}: {}", distance, speed);
                }
            }
        }
        present(&g);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shadow Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Entities appear at the right edge of the viewport
        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(FIELD_WIDTH as f64) as f32;
        let tuning = load_tuning(&document).with_field_width(width);
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Falling back to default tuning: {}", e);
                Tuning::default()
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game: SharedGame = Rc::new_cyclic(|weak: &Weak<RefCell<Game<BrowserScheduler>>>| {
            let weak = weak.clone();
            let sink: WakeupSink = Rc::new(move |wakeup: Wakeup| {
                if let Some(game) = weak.upgrade() {
                    on_wakeup(&game, wakeup);
                }
            });
            RefCell::new(
                Game::new(tuning, seed, BrowserScheduler::new(window.clone(), sink))
                    .expect("tuning was validated"),
            )
        });

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        setup_start_buttons(&document, game.clone());

        show(&document, "loading", false);
        present(&game.borrow());

        log::info!("Shadow Runner running!");
    }

    fn jump(game: &SharedGame) {
        let mut g = game.borrow_mut();
        if g.jump() {
            present(&g);
        }
    }

    fn setup_input_handlers(document: &Document, game: SharedGame) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if key_action(&event.code()) == Some(InputAction::Jump) {
                    event.prevent_default();
                    jump(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click/tap anywhere on the play area
        if let Some(root) = document.get_element_by_id("game") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                jump(&game);
            });
            let _ = root.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(document: &Document, game: SharedGame) {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Keep the click from reaching the play area and jumping
                event.stop_propagation();
                let mut g = game.borrow_mut();
                g.start();
                present(&g);
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use shadow_runner::sim::ManualScheduler;
    use shadow_runner::{Game, Tuning};

    /// Virtual display at ~60 Hz
    const FRAME_MS: u64 = 16;
    /// Stop an unbeatable autopilot eventually
    const MAX_FRAMES: u64 = 100_000;

    env_logger::init();
    log::info!("Shadow Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    let mut game = match Game::new(Tuning::default(), seed, ManualScheduler::new()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    game.start();

    while let Some(handle) = game.scheduler_mut().fire_frame() {
        game.on_frame(handle);
        if game.state().distance >= MAX_FRAMES {
            break;
        }
        if should_jump(&game) {
            game.jump();
        }
        for timer in game.scheduler_mut().advance(FRAME_MS) {
            game.on_timeout(timer);
        }
    }

    println!(
        "Seed {}: score {}, distance {}m, final speed {}",
        seed,
        game.state().score,
        game.state().meters(),
        game.state().speed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Jump when the nearest obstacle will reach the player next frame
#[cfg(not(target_arch = "wasm32"))]
fn should_jump(game: &shadow_runner::Game<shadow_runner::sim::ManualScheduler>) -> bool {
    let state = game.state();
    if !state.is_playing() || state.airborne {
        return false;
    }
    let player = game.player();
    let width = game.tuning().obstacle_width;
    state.obstacles.iter().any(|o| {
        let next_x = o.x - state.speed;
        !player.hitbox.overlaps_x(o.x, width) && player.hitbox.overlaps_x(next_x, width)
    })
}
