//! Pause and game-over overlay content
//!
//! The overlay is a separate presentation layer above the drawing surface;
//! this module only decides what it says.

use crate::sim::{GamePhase, GameState};

/// Text shown over the playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: String,
    pub lines: Vec<String>,
}

impl Overlay {
    pub fn paused() -> Self {
        Self {
            title: "PAUSED".to_string(),
            lines: vec![
                "Press 'P' to resume.".to_string(),
                "Controls: Arrows/A/D to Move, Space to Fire".to_string(),
            ],
        }
    }

    pub fn game_over(won: bool, score: u32) -> Self {
        let title = if won { "YOU WIN!" } else { "GAME OVER" };
        Self {
            title: title.to_string(),
            lines: vec![
                format!("Final Score: {}", score),
                "Press 'Enter' to play again!".to_string(),
            ],
        }
    }

    /// Overlay for the current phase; `None` while running
    pub fn for_state(state: &GameState) -> Option<Self> {
        match state.phase {
            GamePhase::Running => None,
            GamePhase::Paused => Some(Self::paused()),
            GamePhase::GameOver => Some(Self::game_over(state.won, state.score)),
        }
    }
}
