//! KI Games - arcade games delivered as self-registering custom elements
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, tick, collisions)
//! - `renderer`: Drawing-surface abstraction and overlay content
//! - `engine`: Attach/detach lifecycle and the per-frame loop
//! - `platform`: Host abstraction (input subscription, frame scheduling)
//! - `input`: Keyboard bindings and held-key tracking
//! - `tuning`: Data-driven game balance
//! - `registry`: Custom element naming and one-time registration
//! - `loader`: Tag discovery and script request planning
//! - `web`: Browser glue (wasm32 only)

pub mod engine;
pub mod input;
pub mod loader;
pub mod platform;
pub mod registry;
pub mod renderer;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use engine::{Engine, Lifecycle};
pub use tuning::{Tuning, TuningError};

/// Tag name the invaders widget registers under
pub const INVADERS_TAG: &str = "ki-games-invaders";

/// Playfield and layout constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const GAME_WIDTH: f32 = 600.0;
    pub const GAME_HEIGHT: f32 = 400.0;

    /// Player cannon
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 10.0;
    pub const PLAYER_Y: f32 = GAME_HEIGHT - 30.0;

    /// Invader grid layout
    pub const INVADER_COLS: usize = 10;
    pub const INVADER_ROWS: usize = 4;
    pub const INVADER_SIZE: f32 = 20.0;
    pub const INVADER_PADDING: f32 = 10.0;
    pub const INVADER_OFFSET_TOP: f32 = 40.0;
    pub const INVADER_OFFSET_LEFT: f32 = 30.0;

    /// Bullet sizes
    pub const PLAYER_BULLET_WIDTH: f32 = 2.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 6.0;
    pub const INVADER_BULLET_WIDTH: f32 = 2.0;
    pub const INVADER_BULLET_HEIGHT: f32 = 8.0;
}
