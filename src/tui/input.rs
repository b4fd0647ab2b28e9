use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Page(Direction),
    First,
    Last,
    /// Open a category, configure an item, or flip a plain leaf.
    Activate,
    Toggle,
    SelectAll,
    DeselectAll,
    Back,
    Save,
    Reset,
    ToggleHelp,
    Quit,
    Noop,
}

pub fn action_for_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::PageUp => Action::Page(Direction::Up),
        KeyCode::PageDown => Action::Page(Direction::Down),
        KeyCode::Home | KeyCode::Char('g') => Action::First,
        KeyCode::End | KeyCode::Char('G') => Action::Last,
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Action::Activate,
        KeyCode::Char(' ') => Action::Toggle,
        KeyCode::Char('a') => Action::SelectAll,
        KeyCode::Char('n') => Action::DeselectAll,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Action::Back,
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Noop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn vim_keys_match_arrows() {
        assert_eq!(action_for_key(key(KeyCode::Char('j'))), action_for_key(key(KeyCode::Down)));
        assert_eq!(action_for_key(key(KeyCode::Char('k'))), action_for_key(key(KeyCode::Up)));
        assert_eq!(action_for_key(key(KeyCode::Char('l'))), Action::Activate);
        assert_eq!(action_for_key(key(KeyCode::Char('h'))), Action::Back);
    }

    #[test]
    fn every_back_key_goes_back() {
        for code in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Left] {
            assert_eq!(action_for_key(key(code)), Action::Back, "{code:?}");
        }
    }

    #[test]
    fn unbound_keys_do_nothing() {
        assert_eq!(action_for_key(key(KeyCode::Char('x'))), Action::Noop);
        assert_eq!(action_for_key(key(KeyCode::F(5))), Action::Noop);
    }
}
