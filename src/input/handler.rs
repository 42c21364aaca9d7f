use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameMode};

/// Which physical key cluster produced a steering key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySet {
    Wasd,
    Arrows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Steering key; the session decides which snake (or menu value) it moves
    Steer(KeySet, Direction),
    Start(GameMode),
    TogglePause,
    Menu,
    /// q / Esc: leaves the app from the menu only
    Leave,
    /// Ctrl+C: leaves the app from any screen
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(KeySet::Arrows, Direction::Up),
            KeyCode::Down => KeyAction::Steer(KeySet::Arrows, Direction::Down),
            KeyCode::Left => KeyAction::Steer(KeySet::Arrows, Direction::Left),
            KeyCode::Right => KeyAction::Steer(KeySet::Arrows, Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(KeySet::Wasd, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(KeySet::Wasd, Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(KeySet::Wasd, Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(KeySet::Wasd, Direction::Right)
            }

            // Mode selection
            KeyCode::Char('1') => KeyAction::Start(GameMode::Solo),
            KeyCode::Char('2') => KeyAction::Start(GameMode::VersusBot),
            KeyCode::Char('3') => KeyAction::Start(GameMode::VersusPlayer),

            // Controls
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Enter => KeyAction::Menu,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Leave,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
