//! TILERUNNER: a side-scrolling platformer
//!
//! Collect the level's shards, watch the portal open, step through it and
//! clear the gate challenge to move on. Fastest full runs go on the board.
//! - Fixed 60 Hz simulation, decoupled from the render rate
//! - 640x360 software framebuffer, letterboxed to the window
//! - Levels as RON (optionally brotli-packed) under `assets/levels`

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod world;
mod ui;
mod app;
mod game;
mod input;
mod asset;
mod storage;
mod config;
mod challenge;

use macroquad::prelude::*;
use app::AppState;
use config::GameConfig;
use storage::LocalStorage;
use world::Campaign;

/// Level files searched at startup
const LEVELS_DIR: &str = "assets/levels";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("TILERUNNER v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("TILERUNNER v{}", VERSION);

    let config = GameConfig::discover();
    let campaign = Campaign::discover(LEVELS_DIR);
    let mut app = AppState::new(config, campaign, LocalStorage::user_data());

    // Closing the window goes through our own shutdown path
    prevent_quit();

    loop {
        let frame_start = get_time();

        app.update(get_frame_time());
        app.draw();

        if app.quit_requested || is_quit_requested() {
            log::info!("Shutting down");
            break;
        }

        game::wait_for_frame(frame_start, app.fps_limit);
        next_frame().await;
    }
}
