//! Terminal presentation.

pub mod game_scene;

pub use game_scene::{Cell, TerminalScene};

use ratatui::Frame;

/// Draw the whole screen.
pub fn draw(frame: &mut Frame, scene: &TerminalScene) {
    scene.render(frame, frame.size());
}
