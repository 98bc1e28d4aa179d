//! Shared helpers for driving the editor with synthetic keypresses.

#![allow(dead_code)]

use modeline::config::{EditorConfig, MultilineConfig};
use modeline::editor::EditorSession;
use modeline::history::History;
use modeline::{InputCoordinator, InputOutcome, KeyPress, NamedKey};

/// A coordinator with in-memory history of the given capacity.
pub fn coordinator(capacity: usize) -> InputCoordinator {
    InputCoordinator::new(
        History::new_empty(capacity),
        EditorConfig::default(),
        MultilineConfig::default(),
    )
}

/// An enabled editor session holding `text` with the cursor at `cursor`.
pub fn session_at(text: &str, cursor: usize) -> EditorSession {
    let mut session = EditorSession::new();
    session.enable(text, cursor);
    session
}

/// Feed each character of `keys` to the session as a plain keypress.
pub fn feed(session: &mut EditorSession, keys: &str) {
    for c in keys.chars() {
        session.handle(&KeyPress::char(c));
    }
}

pub fn press(session: &mut EditorSession, key: NamedKey) -> bool {
    session.handle(&KeyPress::named(key))
}

/// Type `text` into the coordinator without submitting.
pub fn type_str(input: &mut InputCoordinator, text: &str) {
    for c in text.chars() {
        input.handle(&KeyPress::char(c));
    }
}

/// Type `text` and press Enter, returning the outcome of the Enter.
pub fn submit(input: &mut InputCoordinator, text: &str) -> InputOutcome {
    type_str(input, text);
    input.handle(&KeyPress::named(NamedKey::Enter))
}
