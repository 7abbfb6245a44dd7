//! ACUCYBER: throw glowing needles at acupoints on a rotating qi body
//!
//! Each case lists the points that treat its symptoms. Hit them all to move
//! on; every throw costs or earns qi, and the session ends when qi runs out.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod data;
mod engine;
mod game;
mod rasterizer;
mod wisdom;

use std::cell::RefCell;
use std::rc::Rc;
use macroquad::logging::{error, info, warn};
use macroquad::prelude::*;
use config::{load_tuning_or_default, TUNING_PATH};
use engine::{
    shared_inputs, Driver, DriverState, EngineSetup, FrameInputs, MacroquadPresenter, SharedInputs, TickStatus,
};
use game::{draw_game_over, draw_hud, draw_start_screen, GameSession, HudAction, StartStats};
use data::PointRegistry;
use wisdom::{api_key_from_env, Oracle};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("ACUCYBER v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Start,
    Playing,
}

/// Pointer presses that began this frame: left mouse plus new touches
fn frame_presses() -> Vec<(f32, f32)> {
    let mut presses = Vec::new();
    if is_mouse_button_pressed(MouseButton::Left) {
        presses.push(mouse_position());
    }
    for touch in touches() {
        if touch.phase == TouchPhase::Started {
            presses.push((touch.position.x, touch.position.y));
        }
    }
    presses
}

/// Build a fresh engine wired to the session
fn mount_engine(
    driver: &mut Driver,
    registry: &PointRegistry,
    tuning: &config::Tuning,
    inputs: &SharedInputs,
    session: &Rc<RefCell<GameSession>>,
) {
    let sink_session = Rc::clone(session);
    let setup = EngineSetup {
        registry,
        tuning,
        inputs: Rc::clone(inputs),
        sink: Box::new(move |id: &str, correct: bool| {
            sink_session.borrow_mut().on_hit(id, correct);
        }),
    };
    if let Err(e) = driver.mount(setup, Box::new(MacroquadPresenter::new()), screen_width(), screen_height()) {
        error!("Could not start the scene: {}", e);
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    // Touch input is handled explicitly, don't double it up as mouse clicks
    simulate_mouse_with_touch(false);

    let tuning = load_tuning_or_default(TUNING_PATH);
    let (registry, cases) = match data::load_builtin() {
        Ok(data) => data,
        Err(e) => {
            error!("Built-in game data is invalid: {}", e);
            return;
        }
    };
    info!("Loaded {} acupoints and {} cases", registry.len(), cases.len());

    let stats = StartStats {
        particles: tuning.body_count,
        points: registry.len(),
        cases: cases.len(),
    };

    let inputs = shared_inputs(FrameInputs::default());
    let session = Rc::new(RefCell::new(GameSession::new(cases, Rc::clone(&inputs))));
    let mut oracle = Oracle::new(api_key_from_env());
    let mut driver = Driver::new();
    let mut screen = Screen::Start;
    let mut last_size = (screen_width(), screen_height());

    loop {
        let presses = frame_presses();

        match screen {
            Screen::Start => {
                if draw_start_screen(stats, &presses) {
                    mount_engine(&mut driver, &registry, &tuning, &inputs, &session);
                    if driver.state() == DriverState::Running {
                        last_size = (screen_width(), screen_height());
                        screen = Screen::Playing;
                    }
                }
            }
            Screen::Playing => {
                let size = (screen_width(), screen_height());
                if size != last_size {
                    driver.resize(size.0, size.1);
                    last_size = size;
                }

                let game_over = session.borrow().is_game_over();
                if !game_over {
                    let blocked = game::hud::blocking_rects();
                    for &(x, y) in &presses {
                        if blocked.iter().any(|r| r.contains(x, y)) {
                            continue;
                        }
                        driver.pointer_down(x, y);
                    }
                }

                if driver.tick(get_frame_time()) == TickStatus::Halted {
                    warn!("Scene is not running, returning to the start screen");
                    screen = Screen::Start;
                    next_frame().await;
                    continue;
                }

                let (level, symptoms) = {
                    let mut s = session.borrow_mut();
                    let changed = s.take_level_changed();
                    (s.level(), changed.then(|| s.case().symptoms.clone()))
                };
                if let Some(symptoms) = symptoms {
                    oracle.request(level, &symptoms);
                }
                oracle.poll(level);

                let mut restart = false;
                {
                    let s = session.borrow();
                    let hud_presses: &[(f32, f32)] = if s.is_game_over() { &[] } else { &presses };
                    if draw_hud(&s, &registry, oracle.text(), hud_presses, get_time() as f32) == HudAction::Restart {
                        restart = true;
                    }
                    if s.is_game_over() && draw_game_over(s.score(), &presses) {
                        restart = true;
                    }
                }

                if restart {
                    info!("Restarting session");
                    session.borrow_mut().restart();
                    mount_engine(&mut driver, &registry, &tuning, &inputs, &session);
                    if driver.state() != DriverState::Running {
                        warn!("Returning to the start screen");
                        screen = Screen::Start;
                    }
                }
            }
        }

        next_frame().await
    }
}
