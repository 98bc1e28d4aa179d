//! Keypress descriptors.
//!
//! Every consumer in the input loop works on a `KeyPress` rather than on raw
//! terminal events, so the editor can be driven from tests without a TTY.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Non-printable keys the editor cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl NamedKey {
    pub fn label(&self) -> &'static str {
        match self {
            NamedKey::Enter => "Enter",
            NamedKey::Escape => "Esc",
            NamedKey::Backspace => "Backspace",
            NamedKey::Delete => "Delete",
            NamedKey::Tab => "Tab",
            NamedKey::Up => "Up",
            NamedKey::Down => "Down",
            NamedKey::Left => "Left",
            NamedKey::Right => "Right",
            NamedKey::Home => "Home",
            NamedKey::End => "End",
        }
    }
}

/// A single keypress: a character payload and/or a named key, plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub ch: Option<char>,
    pub key: Option<NamedKey>,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyPress {
    /// A plain printable character.
    pub fn char(c: char) -> Self {
        Self {
            ch: Some(c),
            shift: c.is_uppercase(),
            ..Self::default()
        }
    }

    /// A control chord such as Ctrl+C.
    pub fn ctrl(c: char) -> Self {
        Self {
            ch: Some(c),
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn named(key: NamedKey) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }

    /// True when the event carries neither a character nor a named key.
    pub fn is_malformed(&self) -> bool {
        self.ch.is_none() && self.key.is_none()
    }

    /// Returns true for Ctrl+`c` (case-insensitive).
    pub fn is_ctrl_char(&self, c: char) -> bool {
        self.ctrl && self.ch.is_some_and(|ch| ch.eq_ignore_ascii_case(&c))
    }

    /// The character to insert into text, if this is an unmodified printable key.
    pub fn printable(&self) -> Option<char> {
        if self.ctrl || self.meta || self.key.is_some() {
            return None;
        }
        self.ch.filter(|c| !c.is_control())
    }

    pub fn is(&self, key: NamedKey) -> bool {
        self.key == Some(key) && !self.ctrl && !self.meta
    }

    /// Human-readable form, e.g. `Ctrl+'c'` or `Shift+Up`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.meta {
            parts.push("Alt");
        }
        if self.shift {
            parts.push("Shift");
        }

        let name = match (self.ch, self.key) {
            (_, Some(key)) => key.label().to_string(),
            (Some(c), None) => format!("{c:?}"),
            (None, None) => "<none>".to_string(),
        };

        if parts.is_empty() {
            name
        } else {
            format!("{}+{name}", parts.join("+"))
        }
    }
}

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let mut press = KeyPress {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            meta: event.modifiers.contains(KeyModifiers::ALT),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
            ..KeyPress::default()
        };

        // Releases and repeats reported by enhanced keyboard protocols carry
        // no new input.
        if event.kind == KeyEventKind::Release {
            return press;
        }

        match event.code {
            KeyCode::Char(c) => press.ch = Some(c),
            KeyCode::Enter => press.key = Some(NamedKey::Enter),
            KeyCode::Esc => press.key = Some(NamedKey::Escape),
            KeyCode::Backspace => press.key = Some(NamedKey::Backspace),
            KeyCode::Delete => press.key = Some(NamedKey::Delete),
            KeyCode::Tab => press.key = Some(NamedKey::Tab),
            KeyCode::Up => press.key = Some(NamedKey::Up),
            KeyCode::Down => press.key = Some(NamedKey::Down),
            KeyCode::Left => press.key = Some(NamedKey::Left),
            KeyCode::Right => press.key = Some(NamedKey::Right),
            KeyCode::Home => press.key = Some(NamedKey::Home),
            KeyCode::End => press.key = Some(NamedKey::End),
            _ => {}
        }
        press
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_crossterm_char() {
        let press = KeyPress::from(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(press.ch, Some('A'));
        assert!(press.shift);
        assert_eq!(press.printable(), Some('A'));
    }

    #[test]
    fn test_from_crossterm_ctrl_c() {
        let press = KeyPress::from(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(press.is_ctrl_char('c'));
        assert_eq!(press.printable(), None);
    }

    #[test]
    fn test_unsupported_code_is_malformed() {
        let press = KeyPress::from(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE));
        assert!(press.is_malformed());
    }

    #[test]
    fn test_release_is_malformed() {
        let mut event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert!(KeyPress::from(event).is_malformed());
    }

    #[test]
    fn test_describe() {
        assert_eq!(KeyPress::ctrl('c').describe(), "Ctrl+'c'");
        assert_eq!(KeyPress::named(NamedKey::Escape).describe(), "Esc");
        assert_eq!(KeyPress::default().describe(), "<none>");
    }
}
