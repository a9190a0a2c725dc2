//! Drawing surface abstraction

use glam::Vec2;

use crate::sim::{Color, Rect};

/// Minimal immediate-mode 2D drawing target
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);
    /// Draw HUD text with its baseline starting at `at`
    fn fill_text(&mut self, text: &str, at: Vec2, color: Color);
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect(Rect, Color),
    Triangle([Vec2; 3], Color),
    Text(String, Vec2, Color),
}

/// Surface that records every call (headless runs, tests)
#[derive(Debug, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Rectangles drawn in a given color
    pub fn rects_in(&self, color: Color) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(move |cmd| match cmd {
            DrawCommand::Rect(rect, c) if *c == color => Some(rect),
            _ => None,
        })
    }

    /// All text drawn this frame
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect(rect, color));
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.commands.push(DrawCommand::Triangle([a, b, c], color));
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Color) {
        self.commands
            .push(DrawCommand::Text(text.to_string(), at, color));
    }
}
