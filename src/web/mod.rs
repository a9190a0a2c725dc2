//! Browser glue (wasm32 only)
//!
//! - `canvas`: `Surface` over a 2D canvas context
//! - `widget`: the `<ki-games-invaders>` custom element (`defineInvaders`)
//! - `loader`: page scan and script injection (`loadGames`)
//!
//! Loading the module defines no elements. A page calls `loadGames()`, which
//! injects `games/<tag>.js` for each game tag found, and that bootstrap
//! calls the game's define export.

pub mod canvas;
pub mod loader;
pub mod widget;

use wasm_bindgen::prelude::*;

/// Module start: logging and panic hook
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialised");
    }
}
