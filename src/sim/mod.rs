//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed step order
//! - Caller-supplied RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Rect, resolve_collisions};
pub use state::{
    Bullet, Color, Direction, GamePhase, GameState, Invader, InvaderKind, Player, invader_grid,
};
pub use tick::{
    TickInput, advance_bullets, advance_invaders, check_win, invader_fire, move_player,
    step_invaders, tick,
};
