//! Keyboard bindings and held-key tracking
//!
//! Keys are identified by their physical `KeyboardEvent.code` so the
//! bindings hold across keyboard layouts.

use std::collections::HashMap;

use crate::sim::TickInput;

/// Codes that move the cannon left
pub const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "KeyA"];
/// Codes that move the cannon right
pub const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "KeyD"];
pub const FIRE_KEY: &str = "Space";
pub const PAUSE_KEY: &str = "KeyP";
pub const RESTART_KEY: &str = "Enter";

/// Discrete actions triggered on key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fire,
    TogglePause,
    Restart,
}

impl Action {
    /// Action bound to a key code, if any
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            FIRE_KEY => Some(Action::Fire),
            PAUSE_KEY => Some(Action::TogglePause),
            RESTART_KEY => Some(Action::Restart),
            _ => None,
        }
    }
}

/// Latest pressed/released state per key code
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: HashMap<String, bool>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down and return the edge action it triggers
    pub fn press(&mut self, code: &str) -> Option<Action> {
        self.held.insert(code.to_string(), true);
        Action::from_code(code)
    }

    /// Record a key-up
    pub fn release(&mut self, code: &str) {
        self.held.insert(code.to_string(), false);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.get(code).copied().unwrap_or(false)
    }

    fn any_held(&self, codes: &[&str]) -> bool {
        codes.iter().any(|c| self.is_held(c))
    }

    /// Forget every held key
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Movement input for the next tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
        }
    }
}
