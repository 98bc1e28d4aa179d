//! The modal editing session.
//!
//! `EditorSession` owns the buffer, register and mode of the vim editor and
//! executes the commands produced by `VimHandler`. It is created once and
//! kept for the life of the process, so the register survives toggling
//! modal editing off and on again.

use tracing::{debug, info, warn};

use crate::key::{KeyPress, NamedKey};
use crate::notice::Notice;
use crate::vim::{ExCommand, Motion, VimCommand, VimHandler, VimMode};

use super::buffer::is_word_char;
use super::{LineBuffer, Register};

/// How modal editing ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalExit {
    /// The buffer should be submitted as if it had been typed directly.
    Commit(String),
    /// Editing was abandoned; the host's input line stays as it was.
    Cancel,
}

#[derive(Debug, Default)]
pub struct EditorSession {
    mode: VimMode,
    buffer: LineBuffer,
    register: Register,
    handler: VimHandler,
    enabled: bool,
    exit: Option<ModalExit>,
    notice: Option<Notice>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start modal editing on `text`, with the cursor at `cursor`.
    pub fn enable(&mut self, text: &str, cursor: usize) {
        self.buffer.set_text(text, cursor);
        self.mode = VimMode::Normal;
        self.handler.clear_pending();
        self.exit = None;
        self.enabled = true;
        info!(target: "vim.mode", chars = self.buffer.len(), "modal editing enabled");
    }

    /// Stop modal editing without producing an exit.
    pub fn disable(&mut self) {
        if self.enabled {
            self.enabled = false;
            self.buffer.clear();
            info!(target: "vim.mode", "modal editing disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> &VimMode {
        &self.mode
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// The `:` command text while in command mode.
    pub fn command_input(&self) -> Option<&str> {
        match &self.mode {
            VimMode::Command { input } => Some(input),
            _ => None,
        }
    }

    /// The half-open `[start, end)` visual selection, if any.
    pub fn selection(&self) -> Option<(usize, usize)> {
        match self.mode {
            VimMode::Visual { anchor } => Some(self.selection_from(anchor)),
            _ => None,
        }
    }

    /// Take the exit recorded by the last keypress, if modal editing ended.
    pub fn take_exit(&mut self) -> Option<ModalExit> {
        self.exit.take()
    }

    /// Take the notice raised by the last keypress, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Handle one keypress.
    ///
    /// Returns `true` when the key was consumed and `false` when the host
    /// should apply its own handling. Insert- or Visual-mode Enter returns
    /// `false` after recording a commit, so the host submits the line.
    pub fn handle(&mut self, key: &KeyPress) -> bool {
        if !self.enabled {
            return false;
        }
        let command = self.handler.handle_key(key, &self.mode);
        self.execute(command, key)
    }

    fn set_mode(&mut self, mode: VimMode) {
        if std::mem::discriminant(&self.mode) != std::mem::discriminant(&mode) {
            debug!(target: "vim.mode", from = self.mode.label(), to = mode.label(), "mode change");
        }
        self.mode = mode;
    }

    fn finish(&mut self, exit: ModalExit) {
        match &exit {
            ModalExit::Commit(text) => {
                info!(target: "vim.mode", chars = text.chars().count(), "modal edit committed")
            }
            ModalExit::Cancel => info!(target: "vim.mode", "modal edit cancelled"),
        }
        if !self.mode.is_normal() {
            self.set_mode(VimMode::Normal);
        }
        self.handler.clear_pending();
        self.disable();
        self.exit = Some(exit);
    }

    /// Remove `[start, end)` into the register. Empty spans (`x` at the end
    /// of the buffer) leave the register untouched.
    fn cut(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let removed = self.buffer.delete_range(start, end);
        self.register.store(removed);
        self.buffer.set_cursor(start);
    }

    fn yank(&mut self, start: usize, end: usize) {
        let text = self.buffer.slice(start, end);
        if !text.is_empty() {
            self.register.store(text);
        }
    }

    fn selection_from(&self, anchor: usize) -> (usize, usize) {
        let cursor = self.buffer.cursor();
        let start = anchor.min(cursor);
        let end = (anchor.max(cursor) + 1).min(self.buffer.len());
        (start.min(end), end)
    }

    fn on_word(&self) -> bool {
        self.buffer
            .char_at(self.buffer.cursor())
            .is_some_and(is_word_char)
    }

    /// Exclusive end of the run of word characters starting at the cursor.
    fn word_run_end(&self) -> usize {
        let cursor = self.buffer.cursor();
        let run = self.buffer.chars()[cursor..]
            .iter()
            .take_while(|c| is_word_char(**c))
            .count();
        cursor + run
    }

    fn paste(&mut self, after: bool) {
        if self.register.is_empty() {
            return;
        }
        let text = self.register.get().to_string();
        let pos = if after && !self.buffer.is_empty() {
            (self.buffer.cursor() + 1).min(self.buffer.len())
        } else {
            self.buffer.cursor()
        };
        self.buffer.insert_at(pos, &text);
        self.buffer.set_cursor(pos + text.chars().count());
    }

    fn execute(&mut self, command: VimCommand, key: &KeyPress) -> bool {
        let len = self.buffer.len();
        let cursor = self.buffer.cursor();
        let to_insert = command.enters_insert_mode();

        match command {
            VimCommand::None => {}
            VimCommand::Unhandled => return false,

            VimCommand::Move(motion) => {
                let target = motion.target(&self.buffer);
                self.buffer.set_cursor(target);
            }

            VimCommand::EnterNormal | VimCommand::CancelVisual | VimCommand::CommandAbort => {
                self.set_mode(VimMode::Normal)
            }
            VimCommand::EnterInsert => {}
            VimCommand::EnterInsertAt(motion) => {
                let target = motion.target(&self.buffer);
                self.buffer.set_cursor(target);
            }
            VimCommand::OpenLine { above } => {
                if above {
                    self.buffer.insert_at(0, "\n");
                    self.buffer.set_cursor(0);
                } else {
                    self.buffer.set_cursor(len);
                    self.buffer.insert_str("\n");
                }
            }

            VimCommand::Substitute => self.cut(cursor, (cursor + 1).min(len)),
            VimCommand::DeleteChar => self.cut(cursor, (cursor + 1).min(len)),
            VimCommand::DeleteCharBefore => self.cut(cursor.saturating_sub(1), cursor),
            VimCommand::DeleteToEnd => self.cut(cursor, len),
            VimCommand::ChangeToEnd => self.cut(cursor, len),
            VimCommand::DeleteLine | VimCommand::ChangeLine => {
                let removed = self.buffer.delete_range(0, len);
                self.register.store(removed);
            }
            VimCommand::DeleteMotion(motion) => {
                let (start, end) = motion.span(&self.buffer);
                self.cut(start, end);
            }
            VimCommand::ChangeMotion(motion) => {
                // `cw` on a word stops at the end of that word, like vim.
                let (start, end) = if motion == Motion::WordForward && self.on_word() {
                    (cursor, self.word_run_end())
                } else {
                    motion.span(&self.buffer)
                };
                self.cut(start, end);
            }

            VimCommand::YankLine => self.register.store(self.buffer.text()),
            VimCommand::YankMotion(motion) => {
                let (start, end) = motion.span(&self.buffer);
                self.yank(start, end);
                self.buffer.set_cursor(start);
            }
            VimCommand::PasteAfter => self.paste(true),
            VimCommand::PasteBefore => self.paste(false),

            VimCommand::StartVisual => self.set_mode(VimMode::Visual { anchor: cursor }),
            VimCommand::VisualYank | VimCommand::VisualDelete | VimCommand::VisualChange => {
                let Some((start, end)) = self.selection() else {
                    return true;
                };
                match command {
                    VimCommand::VisualYank => {
                        self.yank(start, end);
                        self.buffer.set_cursor(start);
                        self.set_mode(VimMode::Normal);
                    }
                    VimCommand::VisualDelete => {
                        self.cut(start, end);
                        self.set_mode(VimMode::Normal);
                    }
                    _ => self.cut(start, end),
                }
            }

            VimCommand::EnterCommand => self.set_mode(VimMode::Command {
                input: String::new(),
            }),
            VimCommand::CommandChar(c) => {
                if let VimMode::Command { input } = &mut self.mode {
                    input.push(c);
                }
            }
            VimCommand::CommandBackspace => {
                let leave = match &mut self.mode {
                    VimMode::Command { input } => input.pop().is_none(),
                    _ => false,
                };
                if leave {
                    self.set_mode(VimMode::Normal);
                }
            }
            VimCommand::CommandExecute => {
                let input = match std::mem::take(&mut self.mode) {
                    VimMode::Command { input } => input,
                    _ => String::new(),
                };
                self.set_mode(VimMode::Normal);
                self.run_command_line(&input);
            }

            VimCommand::Commit => {
                let text = self.buffer.text();
                self.finish(ModalExit::Commit(text));
                // The host's own Enter handling submits the committed text.
                return false;
            }
            VimCommand::Cancel => self.finish(ModalExit::Cancel),

            VimCommand::PassThrough => return self.insert_key(key),
        }

        if to_insert && !self.mode.is_insert() {
            self.set_mode(VimMode::Insert);
        }
        true
    }

    fn run_command_line(&mut self, input: &str) {
        if input.trim().is_empty() {
            return;
        }
        match ExCommand::parse(input) {
            Ok(command) if !command.exits() => {
                debug!(target: "vim.command", ?command, "write acknowledged");
                self.notice = Some(Notice::info("Buffer kept; use :wq to submit"));
            }
            Ok(ExCommand::WriteQuit) => {
                let text = self.buffer.text();
                self.finish(ModalExit::Commit(text));
            }
            Ok(_) => self.finish(ModalExit::Cancel),
            Err(err) => {
                warn!(target: "vim.command", %err, "unrecognized command");
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    /// Text entry while in insert mode.
    fn insert_key(&mut self, key: &KeyPress) -> bool {
        if let Some(c) = key.printable() {
            self.buffer.insert_char(c);
            return true;
        }
        if key.ctrl || key.meta {
            return false;
        }
        match key.key {
            Some(NamedKey::Backspace) => {
                self.buffer.backspace();
            }
            Some(NamedKey::Delete) => {
                self.buffer.delete_forward();
            }
            Some(NamedKey::Left) => self.buffer.move_left(),
            Some(NamedKey::Right) => self.buffer.move_right(),
            Some(NamedKey::Home) => self.buffer.set_cursor(0),
            Some(NamedKey::End) => self.buffer.set_cursor(self.buffer.len()),
            _ => return false,
        }
        true
    }
}
