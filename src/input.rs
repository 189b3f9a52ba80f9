//! Key mapping for the terminal host.

use crate::core::session::GameInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Game(GameInput),
    Quit,
}

/// Translate one key press. Releases and repeats of the flap keys are
/// dropped so holding Space doesn't machine-gun flaps.
pub fn map_key(key: KeyEvent) -> Option<HostCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(HostCommand::Quit);
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => {
            if key.kind == KeyEventKind::Repeat {
                None
            } else {
                Some(HostCommand::Game(GameInput::Tap))
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostCommand::Game(GameInput::Restart)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(HostCommand::Quit),
        _ => None,
    }
}
