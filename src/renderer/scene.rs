//! Scene drawing: player, invaders, bullets and HUD

use glam::Vec2;

use super::surface::Surface;
use crate::consts::{GAME_WIDTH, INVADER_SIZE};
use crate::sim::{Color, GameState, Invader, InvaderKind, Player, Rect};

/// Cannon marker: half-width and height of the triangle above the player
const CANNON_HALF_WIDTH: f32 = 3.0;
const CANNON_HEIGHT: f32 = 5.0;

/// Sprite detail: inset square offset and size within an invader
const INSET_OFFSET: f32 = INVADER_SIZE / 4.0;
const INSET_SIZE: f32 = INVADER_SIZE / 2.0;

/// HUD text positions (baseline)
const SCORE_POS: Vec2 = Vec2::new(10.0, 20.0);
const LIVES_POS: Vec2 = Vec2::new(GAME_WIDTH - 80.0, 20.0);

fn invader_color(kind: InvaderKind) -> Color {
    match kind {
        InvaderKind::A => Color::MAGENTA,
        InvaderKind::B => Color::CYAN,
    }
}

/// Draw one frame of the playfield. Reads state only.
pub fn draw<S: Surface + ?Sized>(state: &GameState, surface: &mut S) {
    surface.clear(Color::BLACK);

    draw_player(&state.player, surface);
    for invader in &state.invaders {
        draw_invader(invader, surface);
    }
    for bullet in state.bullets.iter().chain(&state.invader_bullets) {
        surface.fill_rect(bullet.rect, bullet.color);
    }

    surface.fill_text(&format!("SCORE: {}", state.score), SCORE_POS, Color::WHITE);
    surface.fill_text(
        &format!("LIVES: {}", state.player.lives),
        LIVES_POS,
        Color::WHITE,
    );
}

fn draw_player<S: Surface + ?Sized>(player: &Player, surface: &mut S) {
    let r = player.rect;
    surface.fill_rect(r, Color::GREEN);

    let cx = r.center_x();
    surface.fill_triangle(
        Vec2::new(cx, r.top()),
        Vec2::new(cx + CANNON_HALF_WIDTH, r.top() - CANNON_HEIGHT),
        Vec2::new(cx - CANNON_HALF_WIDTH, r.top() - CANNON_HEIGHT),
        Color::GREEN,
    );
}

fn draw_invader<S: Surface + ?Sized>(invader: &Invader, surface: &mut S) {
    let r = invader.rect;
    surface.fill_rect(r, invader_color(invader.kind));
    surface.fill_rect(
        Rect::new(
            r.left() + INSET_OFFSET,
            r.top() + INSET_OFFSET,
            INSET_SIZE,
            INSET_SIZE,
        ),
        Color::BLACK,
    );
}
