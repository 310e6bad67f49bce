//! Key mapping from terminal events to game actions.
//!
//! | Keys | Action |
//! |------|--------|
//! | `←` `a` / `→` `d` | move along the column axis |
//! | `↑` `w` / `↓` `s` | move along the row axis (up = toward row 0) |
//! | `x` `y` `z` | rotate about that axis |
//! | `Space` (held) | drop faster |
//! | `p` `m` | pause |
//! | `c` `r` | restart |
//! | `q` `Ctrl-C` | quit |

use crate::types::{Axis, GameAction, MoveDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Move direction bound to a key, if any.
pub fn move_direction(code: KeyCode) -> Option<MoveDirection> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(MoveDirection::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(MoveDirection::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MoveDirection::Backward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(MoveDirection::Forward),
        _ => None,
    }
}

/// Whether the key boosts gravity while held.
pub fn is_drop_key(code: KeyCode) -> bool {
    code == KeyCode::Char(' ')
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    if let Some(direction) = move_direction(key.code) {
        return Some(GameAction::Move(direction));
    }
    match key.code {
        // Rotation
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::Rotate(Axis::X)),
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(GameAction::Rotate(Axis::Y)),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::Rotate(Axis::Z)),

        // Actions
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('m') | KeyCode::Char('M') => {
            Some(GameAction::Pause)
        }
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(GameAction::Restart)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
