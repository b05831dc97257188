use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What to do with a key press aimed at an input field, decided before the
/// buffer mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    /// Navigation or editing key -- handle normally.
    Allow,
    /// Insert this character (a comma arrives here as '.').
    Insert(char),
    /// Swallow the key entirely.
    Reject,
}

/// First line of defence: blocks non-numeric keys before they reach the
/// field. Commas in a decimal field are silently replaced with a dot so the
/// user never has to remember which separator to use. The sanitizer still
/// has to cope with anything that reaches the buffer another way.
pub fn decide(key: &KeyEvent, current: &str, allow_decimal: bool) -> KeyDecision {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::SUPER)
    {
        return KeyDecision::Allow;
    }

    match key.code {
        KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Up
        | KeyCode::Down
        | KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Enter
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::Esc => KeyDecision::Allow,

        KeyCode::Char(c) if c.is_ascii_digit() => KeyDecision::Insert(c),

        KeyCode::Char(',') if allow_decimal => KeyDecision::Insert('.'),

        KeyCode::Char('.') if allow_decimal => {
            if current.contains('.') {
                KeyDecision::Reject
            } else {
                KeyDecision::Insert('.')
            }
        }

        _ => KeyDecision::Reject,
    }
}
