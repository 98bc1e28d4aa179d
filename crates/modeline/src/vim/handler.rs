//! Vim key event handler.
//!
//! This module processes keypresses and converts them into vim commands.
//! It handles operator-pending state for two-key sequences (`dd`, `cw`,
//! `yy`) and the different behaviors of Normal, Insert, Visual and Command
//! modes.

use crate::key::{KeyPress, NamedKey};

use super::command::{Motion, VimCommand};
use super::mode::VimMode;

/// Pending operator state for commands like `dw`, `cw`, `yy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp {
    /// No pending operator.
    None,
    /// Delete operator (d).
    Delete,
    /// Change operator (c).
    Change,
    /// Yank operator (y).
    Yank,
}

/// Vim key event handler.
///
/// Processes keypresses based on the current mode and returns
/// high-level vim commands to be executed by the editor session.
#[derive(Debug, Clone)]
pub struct VimHandler {
    /// Pending operator (d, c, y).
    pending: PendingOp,
}

impl Default for VimHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl VimHandler {
    pub fn new() -> Self {
        Self {
            pending: PendingOp::None,
        }
    }

    /// Handle a keypress in the given mode.
    ///
    /// Returns a `VimCommand` describing what action to take.
    pub fn handle_key(&mut self, key: &KeyPress, mode: &VimMode) -> VimCommand {
        if key.is_malformed() {
            return VimCommand::Unhandled;
        }

        // Ctrl+C leaves modal editing from every mode.
        if key.is_ctrl_char('c') {
            self.pending = PendingOp::None;
            return VimCommand::Cancel;
        }

        match mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Insert => self.handle_insert_mode(key),
            VimMode::Visual { .. } => self.handle_visual_mode(key),
            VimMode::Command { .. } => self.handle_command_mode(key),
        }
    }

    /// Clear pending state.
    pub fn clear_pending(&mut self) {
        self.pending = PendingOp::None;
    }

    /// Motions shared by Normal and Visual mode.
    fn motion_for(key: &KeyPress) -> Option<Motion> {
        if let Some(named) = key.key {
            return match named {
                NamedKey::Left | NamedKey::Backspace => Some(Motion::Left),
                NamedKey::Right => Some(Motion::Right),
                NamedKey::Home => Some(Motion::LineStart),
                NamedKey::End => Some(Motion::LineEnd),
                _ => None,
            };
        }

        match key.printable()? {
            'h' => Some(Motion::Left),
            'l' | ' ' => Some(Motion::Right),
            'w' => Some(Motion::WordForward),
            'b' => Some(Motion::WordBack),
            'e' => Some(Motion::WordEnd),
            '0' => Some(Motion::LineStart),
            '$' => Some(Motion::LineEnd),
            '^' => Some(Motion::FirstNonBlank),
            _ => None,
        }
    }

    /// Handle key events in Normal mode.
    fn handle_normal_mode(&mut self, key: &KeyPress) -> VimCommand {
        // If we have a pending operator, handle the motion
        if self.pending != PendingOp::None {
            return self.handle_pending_operator(key);
        }

        if let Some(named) = key.key {
            return match named {
                // Normal mode never submits.
                NamedKey::Enter | NamedKey::Escape => VimCommand::None,
                NamedKey::Delete => VimCommand::DeleteChar,
                _ => Self::motion_for(key)
                    .map(VimCommand::Move)
                    .unwrap_or(VimCommand::None),
            };
        }

        let Some(c) = key.printable() else {
            // Unbound chords are swallowed so the host never edits behind
            // the editor's back.
            return VimCommand::None;
        };

        match c {
            // === Insert mode entry ===
            'i' => VimCommand::EnterInsert,
            'a' => VimCommand::EnterInsertAt(Motion::Right),
            'I' => VimCommand::EnterInsertAt(Motion::FirstNonBlank),
            'A' => VimCommand::EnterInsertAt(Motion::LineEnd),
            'o' => VimCommand::OpenLine { above: false },
            'O' => VimCommand::OpenLine { above: true },
            's' => VimCommand::Substitute,
            'S' => VimCommand::ChangeLine,

            // === Delete operators ===
            'x' => VimCommand::DeleteChar,
            'X' => VimCommand::DeleteCharBefore,
            'D' => VimCommand::DeleteToEnd,
            'd' => {
                self.pending = PendingOp::Delete;
                VimCommand::None
            }

            // === Change operators ===
            'C' => VimCommand::ChangeToEnd,
            'c' => {
                self.pending = PendingOp::Change;
                VimCommand::None
            }

            // === Yank/paste ===
            'y' => {
                self.pending = PendingOp::Yank;
                VimCommand::None
            }
            'Y' => VimCommand::YankLine,
            'p' => VimCommand::PasteAfter,
            'P' => VimCommand::PasteBefore,

            // === Visual mode ===
            'v' => VimCommand::StartVisual,

            // === Command mode ===
            ':' => VimCommand::EnterCommand,

            _ => Self::motion_for(key)
                .map(VimCommand::Move)
                .unwrap_or(VimCommand::None),
        }
    }

    /// Handle key when there's a pending operator (d, c, y).
    fn handle_pending_operator(&mut self, key: &KeyPress) -> VimCommand {
        let op = self.pending;
        self.pending = PendingOp::None;

        let doubled = match op {
            PendingOp::Delete => 'd',
            PendingOp::Change => 'c',
            PendingOp::Yank => 'y',
            PendingOp::None => return VimCommand::None,
        };

        if key.printable() == Some(doubled) {
            return match op {
                PendingOp::Delete => VimCommand::DeleteLine,
                PendingOp::Change => VimCommand::ChangeLine,
                _ => VimCommand::YankLine,
            };
        }

        // Only the letter and line motions combine with operators; arrow
        // keys and Backspace cancel the pending operator.
        if key.key.is_some() {
            return VimCommand::None;
        }

        match (op, Self::motion_for(key)) {
            (PendingOp::Delete, Some(Motion::LineEnd)) => VimCommand::DeleteToEnd,
            (PendingOp::Change, Some(Motion::LineEnd)) => VimCommand::ChangeToEnd,
            (PendingOp::Delete, Some(motion)) => VimCommand::DeleteMotion(motion),
            (PendingOp::Change, Some(motion)) => VimCommand::ChangeMotion(motion),
            (PendingOp::Yank, Some(motion)) => VimCommand::YankMotion(motion),

            // Cancel pending on Esc or unrecognized key
            _ => VimCommand::None,
        }
    }

    /// Handle key events in Insert mode.
    fn handle_insert_mode(&mut self, key: &KeyPress) -> VimCommand {
        if key.is(NamedKey::Escape) {
            return VimCommand::EnterNormal;
        }
        if key.is(NamedKey::Enter) {
            return VimCommand::Commit;
        }

        // Everything else is text entry
        VimCommand::PassThrough
    }

    /// Handle key events in Visual mode.
    fn handle_visual_mode(&mut self, key: &KeyPress) -> VimCommand {
        if key.is(NamedKey::Escape) {
            return VimCommand::CancelVisual;
        }
        if key.is(NamedKey::Enter) {
            return VimCommand::Commit;
        }
        if key.is(NamedKey::Delete) {
            return VimCommand::VisualDelete;
        }

        if let Some(motion) = Self::motion_for(key) {
            return VimCommand::Move(motion);
        }

        match key.printable() {
            Some('v') => VimCommand::CancelVisual,
            Some('y') => VimCommand::VisualYank,
            Some('d') | Some('x') => VimCommand::VisualDelete,
            Some('c') | Some('s') => VimCommand::VisualChange,
            _ => VimCommand::None,
        }
    }

    /// Handle key events on the `:` command line.
    fn handle_command_mode(&mut self, key: &KeyPress) -> VimCommand {
        if let Some(named) = key.key {
            return match named {
                NamedKey::Escape => VimCommand::CommandAbort,
                NamedKey::Enter => VimCommand::CommandExecute,
                NamedKey::Backspace => VimCommand::CommandBackspace,
                _ => VimCommand::None,
            };
        }

        match key.printable() {
            Some(c) => VimCommand::CommandChar(c),
            None => VimCommand::None,
        }
    }
}
