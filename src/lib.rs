//! Blockfall core crate.
//!
//! A falling-block puzzle game for the browser. The rules live in [`engine`]
//! and are plain Rust (tested natively with `cargo test`); the `web` module
//! wraps them with a canvas renderer, keyboard input and `<audio>` playback.
//! The host page calls `start_game()` (or `start_game_with_config(json)` with
//! the `serde_json` feature) after loading the wasm module.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod engine;
pub mod input;
mod logging;
mod web;

pub use config::{ConfigError, GameConfig};
pub use engine::{ActivePiece, BoardEngine, BoardEvent, Grid, PieceKind, Shift, Spin, Sweep};
pub use input::{Command, command_for_key};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Start the game with the default 18x32 layout.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start(GameConfig::default())
}

/// Start the game from a JSON config object; missing fields use defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::start(config)
}
