//! Vim commands and motions.
//!
//! This module defines the commands that can be produced by the vim handler.
//! These are high-level operations that the editor session then executes
//! against its line buffer and register.

use thiserror::Error;

use crate::editor::LineBuffer;

/// A motion defines cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Move left (back) one character.
    Left,
    /// Move right (forward) one character.
    Right,
    /// Start of the next word (w).
    WordForward,
    /// Start of the previous word (b).
    WordBack,
    /// End of the current or next word (e).
    WordEnd,
    /// Start of line (0).
    LineStart,
    /// End of line ($).
    LineEnd,
    /// First non-whitespace character (^).
    FirstNonBlank,
}

impl Motion {
    /// Resolve the cursor offset this motion lands on in `buf`.
    ///
    /// The result is always within `[0, buf.len()]`.
    pub fn target(self, buf: &LineBuffer) -> usize {
        match self {
            Motion::Left => buf.cursor().saturating_sub(1),
            Motion::Right => (buf.cursor() + 1).min(buf.len()),
            Motion::WordForward => buf.next_word_start(),
            Motion::WordBack => buf.prev_word_start(),
            Motion::WordEnd => buf.word_end(),
            Motion::LineStart => buf.line_start(),
            Motion::LineEnd => buf.line_end(),
            Motion::FirstNonBlank => buf.first_non_blank(),
        }
    }

    /// Whether an operator applied with this motion includes the character
    /// the motion lands on (vim's inclusive motions, e.g. `de`).
    pub fn is_inclusive(self) -> bool {
        matches!(self, Motion::WordEnd)
    }

    /// The `[start, end)` span an operator covers from the cursor to this
    /// motion's target.
    pub fn span(self, buf: &LineBuffer) -> (usize, usize) {
        let cursor = buf.cursor();
        let target = self.target(buf);
        let (start, end) = if target < cursor {
            (target, cursor)
        } else {
            (cursor, target)
        };
        if self.is_inclusive() {
            (start, (end + 1).min(buf.len()))
        } else {
            (start, end)
        }
    }
}

/// A complete vim command to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VimCommand {
    /// Key consumed without any effect (pending operator, unknown key).
    None,

    /// Key not consumed; the host applies its own handling.
    Unhandled,

    /// Move the cursor.
    Move(Motion),

    /// Return to normal mode (Esc in insert mode).
    EnterNormal,

    /// Enter insert mode at the cursor (i).
    EnterInsert,

    /// Move first, then enter insert mode (a, A, I).
    EnterInsertAt(Motion),

    /// Open a new line and enter insert mode.
    OpenLine {
        /// True for 'O' (above), false for 'o' (below).
        above: bool,
    },

    /// Delete character under cursor and enter insert mode (s).
    Substitute,

    /// Delete character under cursor (x).
    DeleteChar,

    /// Delete character before cursor (X).
    DeleteCharBefore,

    /// Delete to end of line (D).
    DeleteToEnd,

    /// Delete entire line (dd).
    DeleteLine,

    /// Delete by motion (dw, de, db, d$, d0).
    DeleteMotion(Motion),

    /// Change to end of line (C).
    ChangeToEnd,

    /// Change entire line (cc or S).
    ChangeLine,

    /// Change by motion (cw, ce, cb, c$, c0).
    ChangeMotion(Motion),

    /// Yank (copy) entire line (yy or Y).
    YankLine,

    /// Yank by motion (yw, ye, yb, y$, y0).
    YankMotion(Motion),

    /// Paste after cursor (p).
    PasteAfter,

    /// Paste before cursor (P).
    PasteBefore,

    /// Start visual selection.
    StartVisual,

    /// Cancel visual selection.
    CancelVisual,

    /// In visual mode: yank selection.
    VisualYank,

    /// In visual mode: delete selection.
    VisualDelete,

    /// In visual mode: change selection (delete and enter insert).
    VisualChange,

    /// Open the `:` command line.
    EnterCommand,

    /// Append a character to the command line.
    CommandChar(char),

    /// Remove the last character of the command line.
    CommandBackspace,

    /// Run the command line.
    CommandExecute,

    /// Abandon the command line.
    CommandAbort,

    /// Finish editing and hand the buffer to the host as a submitted line.
    Commit,

    /// Leave modal editing without submitting anything.
    Cancel,

    /// Insert-mode text entry handled by the session's own line editing.
    PassThrough,
}

impl VimCommand {
    /// Returns true if this command requires mode change to Insert.
    pub fn enters_insert_mode(&self) -> bool {
        matches!(
            self,
            VimCommand::EnterInsert
                | VimCommand::EnterInsertAt(_)
                | VimCommand::OpenLine { .. }
                | VimCommand::Substitute
                | VimCommand::ChangeToEnd
                | VimCommand::ChangeLine
                | VimCommand::ChangeMotion(_)
                | VimCommand::VisualChange
        )
    }
}

/// Commands accepted on the `:` command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExCommand {
    /// `:q` - leave modal editing.
    Quit,
    /// `:q!` - leave modal editing, discarding edits.
    ForceQuit,
    /// `:w` - acknowledge and stay in the editor.
    Write,
    /// `:wq` - submit the buffer and leave modal editing.
    WriteQuit,
}

/// Unrecognized command-line input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Not an editor command: {0}")]
    Unknown(String),
}

impl ExCommand {
    /// Parse command-line text (without the leading `:`).
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        match text.trim() {
            "q" => Ok(ExCommand::Quit),
            "q!" => Ok(ExCommand::ForceQuit),
            "w" => Ok(ExCommand::Write),
            "wq" => Ok(ExCommand::WriteQuit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Whether running this command ends modal editing.
    pub fn exits(&self) -> bool {
        !matches!(self, ExCommand::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(text: &str, cursor: usize) -> LineBuffer {
        let mut b = LineBuffer::from_text(text);
        b.set_cursor(cursor);
        b
    }

    #[test]
    fn test_motion_targets_clamp() {
        assert_eq!(Motion::Left.target(&buf("ab", 0)), 0);
        assert_eq!(Motion::Right.target(&buf("ab", 2)), 2);
        assert_eq!(Motion::LineEnd.target(&buf("ab", 0)), 2);
        assert_eq!(Motion::FirstNonBlank.target(&buf("  ab", 4)), 2);
    }

    #[test]
    fn test_motion_span() {
        assert_eq!(Motion::WordForward.span(&buf("foo bar", 0)), (0, 4));
        assert_eq!(Motion::WordBack.span(&buf("foo bar", 6)), (4, 6));
        assert_eq!(Motion::WordEnd.span(&buf("foo bar", 0)), (0, 3));
        assert_eq!(Motion::LineStart.span(&buf("foo bar", 3)), (0, 3));
    }

    #[test]
    fn test_vim_command_enters_insert() {
        assert!(VimCommand::EnterInsert.enters_insert_mode());
        assert!(VimCommand::ChangeToEnd.enters_insert_mode());
        assert!(VimCommand::ChangeLine.enters_insert_mode());
        assert!(VimCommand::Substitute.enters_insert_mode());
        assert!(VimCommand::OpenLine { above: false }.enters_insert_mode());

        assert!(!VimCommand::DeleteLine.enters_insert_mode());
        assert!(!VimCommand::Move(Motion::Left).enters_insert_mode());
        assert!(!VimCommand::Commit.enters_insert_mode());
    }

    #[test]
    fn test_parse_ex_commands() {
        assert_eq!(ExCommand::parse("q"), Ok(ExCommand::Quit));
        assert_eq!(ExCommand::parse(" wq "), Ok(ExCommand::WriteQuit));
        assert_eq!(ExCommand::parse("q!"), Ok(ExCommand::ForceQuit));
        assert_eq!(ExCommand::parse("w"), Ok(ExCommand::Write));
        assert_eq!(
            ExCommand::parse("wqa"),
            Err(CommandError::Unknown("wqa".to_string()))
        );
    }

    #[test]
    fn test_command_error_message() {
        let err = ExCommand::parse("foo").unwrap_err();
        assert_eq!(err.to_string(), "Not an editor command: foo");
    }

    #[test]
    fn test_only_write_stays() {
        assert!(!ExCommand::Write.exits());
        assert!(ExCommand::Quit.exits());
        assert!(ExCommand::WriteQuit.exits());
        assert!(ExCommand::ForceQuit.exits());
    }
}
