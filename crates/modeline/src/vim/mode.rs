//! Vim editing modes.

/// The current vim editing mode.
///
/// Each variant carries only the state that mode needs: Visual remembers
/// where the selection started, Command owns the text typed after `:`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VimMode {
    /// Normal mode - navigation and commands.
    #[default]
    Normal,
    /// Insert mode - text input.
    Insert,
    /// Visual mode - text selection starting at `anchor`.
    Visual { anchor: usize },
    /// Command-line mode - text typed after `:`.
    Command { input: String },
}

impl VimMode {
    /// Returns true if in insert mode.
    pub fn is_insert(&self) -> bool {
        matches!(self, VimMode::Insert)
    }

    /// Returns true if in normal mode.
    pub fn is_normal(&self) -> bool {
        matches!(self, VimMode::Normal)
    }

    /// Returns the mode name for display.
    pub fn label(&self) -> &'static str {
        match self {
            VimMode::Normal => "NORMAL",
            VimMode::Insert => "INSERT",
            VimMode::Visual { .. } => "VISUAL",
            VimMode::Command { .. } => "COMMAND",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_mode_default() {
        assert_eq!(VimMode::default(), VimMode::Normal);
    }

    #[test]
    fn test_vim_mode_predicates() {
        assert!(VimMode::Normal.is_normal());
        assert!(!VimMode::Normal.is_insert());

        assert!(VimMode::Insert.is_insert());
        assert!(!VimMode::Insert.is_normal());

        assert!(!VimMode::Visual { anchor: 0 }.is_normal());
        assert!(!VimMode::Visual { anchor: 0 }.is_insert());
    }

    #[test]
    fn test_vim_mode_labels() {
        assert_eq!(VimMode::Normal.label(), "NORMAL");
        assert_eq!(VimMode::Insert.label(), "INSERT");
        assert_eq!(VimMode::Visual { anchor: 3 }.label(), "VISUAL");
        assert_eq!(
            VimMode::Command {
                input: "wq".into()
            }
            .label(),
            "COMMAND"
        );
    }
}
