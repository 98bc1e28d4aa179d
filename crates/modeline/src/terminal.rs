//! Scoped raw-mode acquisition.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::queue;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};
use tracing::debug;

/// Holds the terminal in raw mode for as long as it lives.
///
/// Dropping the handle shows the cursor again (modal views hide it) and
/// restores whatever raw-mode state the terminal had when it was acquired.
#[derive(Debug)]
pub struct TerminalHandle {
    was_raw: bool,
}

impl TerminalHandle {
    pub fn acquire() -> Result<Self> {
        let was_raw = is_raw_mode_enabled().context("failed to query terminal mode")?;
        if !was_raw {
            enable_raw_mode().context("failed to enable raw mode; are you running in a real TTY?")?;
        }
        debug!(target: "terminal", was_raw, "raw mode acquired");
        Ok(Self { was_raw })
    }
}

/// Undo cursor state the renderer may have left behind.
fn restore_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Show)?;
    out.flush()
}

impl Drop for TerminalHandle {
    fn drop(&mut self) {
        let _ = restore_cursor(&mut io::stdout());
        if !self.was_raw {
            let _ = disable_raw_mode();
        }
        debug!(target: "terminal", "raw mode released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_cursor_shows_cursor() {
        let mut out = Vec::new();
        restore_cursor(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?25h");
    }
}
