/// Logical input actions and the key table that produces them.

use crossterm::event::{KeyCode, KeyModifiers};

/// A discrete key press, interpreted by the active game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Shoot,
    /// Pause in play, resume when paused, back out of level select.
    Pause,
    MenuUp,
    MenuDown,
    MenuConfirm,
    Quit,
    Restart,
}

/// Keys currently held down.  Drives the ship, which reacts to held keys
/// rather than to queued presses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub shoot: bool,
}

pub fn action_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Char(' ') => Some(Action::Shoot),
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pause),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::MenuUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Action::MenuDown),
        KeyCode::Enter => Some(Action::MenuConfirm),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        _ => None,
    }
}
