//! Event handling utilities

use crossterm::event::KeyCode;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,

    // Selection
    Select,
    Back,

    /// Answer the current question with this option index
    Option(usize),

    // Quiz results
    Retake,
    PlayMaze,

    Quit,
}

/// Map a key press to an action (vim-style movement plus answer keys)
pub fn key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        // Options are answered by number (1-9) or letter (a-d)
        KeyCode::Char(c @ '1'..='9') => Some(Action::Option(c as usize - '1' as usize)),
        KeyCode::Char(c @ 'a'..='d') => Some(Action::Option(c as usize - 'a' as usize)),
        KeyCode::Char('r') => Some(Action::Retake),
        KeyCode::Char('g') => Some(Action::PlayMaze),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(key_to_action(KeyCode::Char('j')), Some(Action::Down));
    }

    #[test]
    fn arrows_map_to_movement() {
        assert_eq!(key_to_action(KeyCode::Up), Some(Action::Up));
        assert_eq!(key_to_action(KeyCode::Left), Some(Action::Left));
        assert_eq!(key_to_action(KeyCode::Right), Some(Action::Right));
    }

    #[test]
    fn digits_map_to_zero_based_options() {
        assert_eq!(key_to_action(KeyCode::Char('1')), Some(Action::Option(0)));
        assert_eq!(key_to_action(KeyCode::Char('4')), Some(Action::Option(3)));
    }

    #[test]
    fn letters_map_to_zero_based_options() {
        assert_eq!(key_to_action(KeyCode::Char('a')), Some(Action::Option(0)));
        assert_eq!(key_to_action(KeyCode::Char('d')), Some(Action::Option(3)));
    }

    #[test]
    fn escape_goes_back() {
        assert_eq!(key_to_action(KeyCode::Esc), Some(Action::Back));
        assert_eq!(key_to_action(KeyCode::Backspace), Some(Action::Back));
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(key_to_action(KeyCode::Char('x')), None);
        assert_eq!(key_to_action(KeyCode::Tab), None);
    }
}
