use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

/// What a key press means while a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    Quit,
    None,
}

/// What a key press means on the game over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndChoice {
    Restart,
    Quit,
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

pub fn map_play_key(ev: &KeyEvent) -> KeyAction {
    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => KeyAction::Steer(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => KeyAction::Steer(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => KeyAction::Steer(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => KeyAction::Steer(Right),
        KeyCode::Esc => KeyAction::TogglePause,
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

pub fn map_end_screen_key(ev: &KeyEvent) -> EndChoice {
    match ev.code {
        _ if is_ctrl_c(ev) => EndChoice::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') => EndChoice::Quit,
        _ => EndChoice::Restart,
    }
}
