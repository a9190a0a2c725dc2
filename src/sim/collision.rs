//! Axis-aligned bounding boxes and collision resolution
//!
//! Every entity in the playfield is a rectangle. Overlap is tested on open
//! intervals: rectangles that only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal centre
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// What a collision pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player bullet / invader pairs that overlapped
    pub invader_hits: u32,
    /// Invader bullets that struck the player
    pub player_hits: u32,
}

/// Resolve bullet collisions against invaders and the player
///
/// Marks first, removes after each full pairwise scan. A bullet overlapping
/// two invaders scores both.
pub fn resolve_collisions(state: &mut GameState, tuning: &Tuning) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut bullet_hit = vec![false; state.bullets.len()];
    let mut invader_hit = vec![false; state.invaders.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        for (ii, invader) in state.invaders.iter().enumerate() {
            if bullet.rect.overlaps(&invader.rect) {
                bullet_hit[bi] = true;
                invader_hit[ii] = true;
                state.score += tuning.points_per_invader;
                report.invader_hits += 1;
            }
        }
    }

    retain_unmarked(&mut state.bullets, &bullet_hit);
    retain_unmarked(&mut state.invaders, &invader_hit);

    let player_rect = state.player.rect;
    let mut invader_bullet_hit = vec![false; state.invader_bullets.len()];
    for (bi, bullet) in state.invader_bullets.iter().enumerate() {
        if bullet.rect.overlaps(&player_rect) {
            invader_bullet_hit[bi] = true;
            state.player.lives = state.player.lives.saturating_sub(1);
            report.player_hits += 1;
            if state.player.lives == 0 {
                state.phase = GamePhase::GameOver;
            }
        }
    }

    retain_unmarked(&mut state.invader_bullets, &invader_bullet_hit);

    report
}

fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marked[idx];
        idx += 1;
        keep
    });
}
