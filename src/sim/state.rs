//! Game state and entity types
//!
//! One `GameState` holds every entity of a game instance. Nothing outside
//! the owning engine keeps references into it.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Simulation suspended, pause overlay shown
    Paused,
    /// Run ended (won or lost); waits for restart
    GameOver,
}

/// Horizontal travel direction of the invader block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// RGB color used by entities and the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GREEN: Color = Color::rgb(0x00, 0xff, 0x00);
    pub const RED: Color = Color::rgb(0xff, 0x00, 0x00);
    pub const MAGENTA: Color = Color::rgb(0xff, 0x00, 0xff);
    pub const CYAN: Color = Color::rgb(0x00, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#00ff00`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The player's cannon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub lives: u32,
}

impl Player {
    /// Player centred at the bottom of the playfield
    pub fn new(lives: u32) -> Self {
        Self {
            rect: Rect::new(
                (GAME_WIDTH - PLAYER_WIDTH) / 2.0,
                PLAYER_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            lives,
        }
    }

    /// Largest x the player may occupy
    #[inline]
    pub fn max_x(&self) -> f32 {
        GAME_WIDTH - self.rect.size.x
    }
}

/// Invader visual variants (alternating rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvaderKind {
    A,
    B,
}

impl InvaderKind {
    /// Variant for a grid row
    pub fn for_row(row: usize) -> Self {
        if row % 2 == 0 {
            InvaderKind::A
        } else {
            InvaderKind::B
        }
    }
}

/// An invader entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invader {
    pub rect: Rect,
    pub kind: InvaderKind,
}

impl Invader {
    pub fn new(x: f32, y: f32, kind: InvaderKind) -> Self {
        Self {
            rect: Rect::new(x, y, INVADER_SIZE, INVADER_SIZE),
            kind,
        }
    }
}

/// A bullet entity (player or invader)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub color: Color,
}

impl Bullet {
    /// Player bullet with its top-left at (x, y)
    pub fn player(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT),
            color: Color::GREEN,
        }
    }

    /// Invader bullet with its top-left at (x, y)
    pub fn invader(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, INVADER_BULLET_WIDTH, INVADER_BULLET_HEIGHT),
            color: Color::RED,
        }
    }
}

/// Build the full invader grid (column-major)
pub fn invader_grid() -> Vec<Invader> {
    let mut invaders = Vec::with_capacity(INVADER_COLS * INVADER_ROWS);
    for col in 0..INVADER_COLS {
        for row in 0..INVADER_ROWS {
            let x = col as f32 * (INVADER_SIZE + INVADER_PADDING) + INVADER_OFFSET_LEFT;
            let y = row as f32 * (INVADER_SIZE + INVADER_PADDING) + INVADER_OFFSET_TOP;
            invaders.push(Invader::new(x, y, InvaderKind::for_row(row)));
        }
    }
    invaders
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Live player bullets
    pub bullets: Vec<Bullet>,
    /// Live invader bullets
    pub invader_bullets: Vec<Bullet>,
    pub invaders: Vec<Invader>,
    pub direction: Direction,
    pub phase: GamePhase,
    /// Set when the game ended by clearing every invader
    pub won: bool,
    pub score: u32,
    /// Ticks since the invaders last moved
    pub frame_counter: u32,
}

impl GameState {
    /// Fresh game: player centred, full grid, moving right
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player: Player::new(tuning.starting_lives),
            bullets: Vec::new(),
            invader_bullets: Vec::new(),
            invaders: invader_grid(),
            direction: Direction::Right,
            phase: GamePhase::Running,
            won: false,
            score: 0,
            frame_counter: 0,
        }
    }

    /// Reinitialise everything, as on attach
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Spawn a player bullet at the cannon if fewer than the limit are live.
    /// Returns whether a bullet was fired.
    pub fn fire(&mut self, tuning: &Tuning) -> bool {
        if self.bullets.len() >= tuning.max_player_bullets {
            return false;
        }
        let x = self.player.rect.center_x() - PLAYER_BULLET_WIDTH / 2.0;
        self.bullets.push(Bullet::player(x, self.player.rect.top()));
        true
    }

    /// Switch between Running and Paused. Game over is left untouched.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// End the run
    pub fn end(&mut self, won: bool) {
        self.phase = GamePhase::GameOver;
        if won {
            self.won = true;
        }
    }
}
