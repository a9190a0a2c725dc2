//! Fixed-order simulation tick
//!
//! One call advances the game by one frame: player, bullets, invaders,
//! collisions, win check. Each step finishes before the next begins.

use rand::Rng;

use super::collision::{CollisionReport, resolve_collisions};
use super::state::{Bullet, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Held-key state sampled at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
}

/// Advance the game state by one tick. Does nothing unless Running.
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut R,
) -> CollisionReport {
    if !state.is_running() {
        return CollisionReport::default();
    }

    move_player(state, input, tuning);
    advance_bullets(state, tuning);
    advance_invaders(state, tuning, rng);
    let report = resolve_collisions(state, tuning);
    check_win(state);

    report
}

/// Apply held movement keys and clamp to the playfield
pub fn move_player(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let player = &mut state.player;
    if input.left {
        player.rect.pos.x -= tuning.player_speed;
    }
    if input.right {
        player.rect.pos.x += tuning.player_speed;
    }
    player.rect.pos.x = player.rect.pos.x.clamp(0.0, player.max_x());
}

/// Move bullets and drop any that left the playfield vertically
pub fn advance_bullets(state: &mut GameState, tuning: &Tuning) {
    for bullet in &mut state.bullets {
        bullet.rect.pos.y -= tuning.bullet_speed;
    }
    state.bullets.retain(|b| b.rect.top() > 0.0);

    let invader_speed = tuning.bullet_speed / 2.0;
    for bullet in &mut state.invader_bullets {
        bullet.rect.pos.y += invader_speed;
    }
    state.invader_bullets.retain(|b| b.rect.top() < GAME_HEIGHT);
}

/// Count the tick, step the block on its interval, then run the fire trial.
/// Returns true if the block moved (either sideways or down).
pub fn advance_invaders<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> bool {
    state.frame_counter += 1;
    let moved = if state.frame_counter >= tuning.invader_step_interval.max(1) {
        state.frame_counter = 0;
        step_invaders(state, tuning);
        true
    } else {
        false
    };

    invader_fire(state, tuning, rng);
    moved
}

/// Move the whole block one step: sideways, or down with a reversal when
/// the next sideways step would cross an edge.
pub fn step_invaders(state: &mut GameState, tuning: &Tuning) {
    let dx = tuning.invader_speed_x * state.direction.sign();

    let hits_edge = state
        .invaders
        .iter()
        .any(|inv| inv.rect.right() + dx > GAME_WIDTH || inv.rect.left() + dx < 0.0);

    if hits_edge {
        state.direction = state.direction.flipped();
        let player_y = state.player.rect.top();
        let mut landed = false;
        for invader in &mut state.invaders {
            invader.rect.pos.y += tuning.invader_drop;
            if invader.rect.bottom() >= player_y {
                landed = true;
            }
        }
        if landed {
            state.end(false);
        }
    } else {
        for invader in &mut state.invaders {
            invader.rect.pos.x += dx;
        }
    }
}

/// Single Bernoulli trial per tick: at most one invader fires
pub fn invader_fire<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) -> bool {
    let roll: f64 = rng.random();
    if roll <= tuning.invader_non_fire_rate || state.invaders.is_empty() {
        return false;
    }

    let shooter = &state.invaders[rng.random_range(0..state.invaders.len())];
    let x = shooter.rect.center_x() - INVADER_BULLET_WIDTH / 2.0;
    let y = shooter.rect.bottom();
    state.invader_bullets.push(Bullet::invader(x, y));
    true
}

/// Clearing the last invader wins, whatever the lives count
pub fn check_win(state: &mut GameState) {
    if state.invaders.is_empty() {
        state.end(true);
    }
}
