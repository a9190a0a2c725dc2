//! 2D rendering module
//!
//! Draws the game through the `Surface` trait so the same scene code runs on
//! a browser canvas and in tests.

pub mod overlay;
pub mod scene;
pub mod surface;

pub use overlay::Overlay;
pub use scene::draw;
pub use surface::{DrawCommand, Recorder, Surface};
