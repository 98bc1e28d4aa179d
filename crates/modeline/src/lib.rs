//! A prompt line editor for terminal chat front-ends, with an optional
//! vim-style modal editor layered over plain line editing, history
//! navigation and multi-line input.

pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod key;
pub mod logging;
pub mod multiline;
pub mod notice;
pub mod render;
pub mod terminal;
pub mod vim;

pub use input::{InputCoordinator, InputMode, InputOutcome, View};
pub use key::{KeyPress, NamedKey};
