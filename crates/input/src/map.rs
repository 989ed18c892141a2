//! Terminal key mapping.
//!
//! Maps crossterm key events onto [`GameAction`] edges for the timing
//! controller. OS key-repeat events must be filtered by the event loop
//! (`KeyEventKind::Repeat`); the controller's own DAS/ARR generates all
//! repeats.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tetrion_types::GameAction;

/// Action for a pressed (or released) key, if any.
pub fn action_for(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateCcw),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Quit chord: q or ctrl-c.
pub fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_keys_map_to_moves() {
        assert_eq!(action_for(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(action_for(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(action_for(KeyCode::Down), Some(GameAction::SoftDrop));
        assert_eq!(action_for(KeyCode::Char('a')), Some(GameAction::MoveLeft));
        assert_eq!(action_for(KeyCode::Char('D')), Some(GameAction::MoveRight));
    }

    #[test]
    fn action_keys_map_to_edges() {
        assert_eq!(action_for(KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(action_for(KeyCode::Up), Some(GameAction::RotateCw));
        assert_eq!(action_for(KeyCode::Char('z')), Some(GameAction::RotateCcw));
        assert_eq!(action_for(KeyCode::Char('c')), Some(GameAction::Hold));
        assert_eq!(action_for(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(action_for(KeyCode::Char('r')), Some(GameAction::Restart));
        assert_eq!(action_for(KeyCode::Enter), None);
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
