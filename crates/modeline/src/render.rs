//! Redraws the prompt line with terminal control sequences.
//!
//! Everything is drawn on the current terminal row: carriage return, clear
//! the line, prompt, text, then the cursor. In modal views the cursor cell
//! is drawn in reverse video and the terminal cursor is hidden. Text wider
//! than the terminal scrolls sideways so the cursor stays on screen.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveToColumn, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::input::View;
use crate::notice::Notice;

/// How an embedded newline is shown on the single prompt row.
const NEWLINE_GLYPH: char = '↵';

fn display_char(c: char) -> char {
    if c == '\n' {
        NEWLINE_GLYPH
    } else {
        c
    }
}

fn char_width(c: char) -> usize {
    display_char(c).width().unwrap_or(0)
}

fn column(width: usize) -> u16 {
    u16::try_from(width).unwrap_or(u16::MAX)
}

fn display(text: &[char]) -> String {
    text.iter().copied().map(display_char).collect()
}

/// The `[start, end)` slice of `text` that fits in `avail` columns with the
/// cursor cell still visible. Scrolls right as the cursor moves past the edge.
fn visible_range(text: &[char], cursor: usize, avail: usize) -> (usize, usize) {
    let cursor_cell = text.get(cursor).map_or(1, |c| char_width(*c).max(1));
    let mut before: usize = text[..cursor].iter().map(|c| char_width(*c)).sum();
    let mut start = 0;
    while start < cursor && before + cursor_cell > avail {
        before -= char_width(text[start]);
        start += 1;
    }

    let mut end = start;
    let mut used = 0;
    while end < text.len() {
        let w = char_width(text[end]);
        if used + w > avail {
            break;
        }
        used += w;
        end += 1;
    }
    (start, end)
}

/// Columns left for text after `prefix`, keeping the last column free so the
/// terminal never wraps.
fn available(width: usize, prefix: &str) -> usize {
    width.saturating_sub(prefix.width() + 1).max(1)
}

fn width_of(text: &[char]) -> usize {
    text.iter().map(|c| char_width(*c)).sum()
}

/// Draw `view` on the current row, clipped to the terminal width, and flush.
pub fn draw<W: Write>(out: &mut W, view: &View<'_>) -> io::Result<()> {
    let width = terminal::size().map_or(usize::MAX, |(cols, _)| usize::from(cols));
    draw_within(out, view, width)
}

/// Draw `view` on the current row within `width` columns and flush.
pub fn draw_within<W: Write>(out: &mut W, view: &View<'_>, width: usize) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

    match *view {
        View::Line {
            prompt,
            text,
            cursor,
        } => {
            let cursor = cursor.min(text.len());
            let (start, end) = visible_range(text, cursor, available(width, prompt));
            queue!(out, Print(prompt), Print(display(&text[start..end])))?;
            let col = prompt.width() + width_of(&text[start..cursor]);
            queue!(out, MoveToColumn(column(col)), Show)?;
        }
        View::Modal {
            prompt,
            mode,
            text,
            cursor,
            selection,
        } => {
            let prefix = format!("[{}] {}", mode.label(), prompt);
            queue!(out, Hide, Print(&prefix))?;

            let cursor = cursor.min(text.len());
            let (start, end) = visible_range(text, cursor, available(width, &prefix));
            let (sel_start, sel_end) = selection.unwrap_or((0, 0));
            for (i, c) in text.iter().enumerate().take(end).skip(start) {
                let shown = display_char(*c);
                if i == cursor {
                    queue!(
                        out,
                        SetAttribute(Attribute::Reverse),
                        Print(shown),
                        SetAttribute(Attribute::Reset)
                    )?;
                } else if i >= sel_start && i < sel_end {
                    queue!(
                        out,
                        SetAttribute(Attribute::Underlined),
                        Print(shown),
                        SetAttribute(Attribute::Reset)
                    )?;
                } else {
                    queue!(out, Print(shown))?;
                }
            }
            if cursor == text.len() {
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(' '),
                    SetAttribute(Attribute::Reset)
                )?;
            }

            let col = prefix.width() + width_of(&text[start..cursor]);
            queue!(out, MoveToColumn(column(col)))?;
        }
        View::Command { input } => {
            let chars: Vec<char> = input.chars().collect();
            let (start, end) = visible_range(&chars, chars.len(), available(width, ":"));
            let shown: String = chars[start..end].iter().collect();
            queue!(out, Print(':'), Print(&shown), Show)?;
            queue!(out, MoveToColumn(column(1 + shown.width())))?;
        }
    }

    out.flush()
}

/// Print a transient message on its own row; the caller redraws after.
pub fn notice<W: Write>(out: &mut W, notice: &Notice) -> io::Result<()> {
    let color = if notice.is_error() {
        Color::Red
    } else {
        Color::DarkGrey
    };
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        SetForegroundColor(color),
        Print(notice.to_string()),
        ResetColor,
        Print("\r\n")
    )?;
    out.flush()
}

/// Leave the current row as-is and start a fresh one.
pub fn newline<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Show, Print("\r\n"))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vim::VimMode;

    const CLEAR_LINE: &str = "\x1b[2K";
    const REVERSE: &str = "\x1b[7m";

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn render(view: View<'_>) -> String {
        render_within(view, usize::MAX)
    }

    #[test]
    fn test_line_view() {
        let text = chars("hello");
        let out = render(View::Line {
            prompt: "> ",
            text: &text,
            cursor: 5,
        });
        assert!(out.contains(CLEAR_LINE));
        assert!(out.contains("> hello"));
        assert!(!out.contains(REVERSE));
        // Cursor after "> hello" is column 7, i.e. 1-based column 8.
        assert!(out.contains("\x1b[8G"));
    }

    #[test]
    fn test_modal_view_reverses_cursor_cell() {
        let text = chars("abc");
        let out = render(View::Modal {
            prompt: "> ",
            mode: &VimMode::Normal,
            text: &text,
            cursor: 1,
            selection: None,
        });
        assert!(out.contains("[NORMAL] > "));
        assert!(out.contains(&format!("a{REVERSE}b")));
    }

    #[test]
    fn test_modal_view_cursor_at_end() {
        let text = chars("ab");
        let out = render(View::Modal {
            prompt: "> ",
            mode: &VimMode::Insert,
            text: &text,
            cursor: 2,
            selection: None,
        });
        assert!(out.contains(&format!("ab{REVERSE} ")));
    }

    #[test]
    fn test_embedded_newline_glyph() {
        let text = chars("a\nb");
        let out = render(View::Line {
            prompt: "",
            text: &text,
            cursor: 0,
        });
        assert!(out.contains("a↵b"));
    }

    #[test]
    fn test_command_view_omits_buffer() {
        let out = render(View::Command { input: "wq" });
        assert!(out.contains(":wq"));
        assert!(!out.contains("[NORMAL]"));
    }

    fn render_within(view: View<'_>, width: usize) -> String {
        let mut out = Vec::new();
        draw_within(&mut out, &view, width).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_long_line_scrolls_to_cursor() {
        let text = chars("abcdefghijklmnop");
        let out = render_within(
            View::Line {
                prompt: "> ",
                text: &text,
                cursor: 16,
            },
            10,
        );
        assert!(out.contains("> klmnop"));
        assert!(!out.contains("abc"));
        assert!(out.contains("\x1b[9G"));
    }

    #[test]
    fn test_long_line_clipped_after_cursor() {
        let text = chars("abcdefghijklmnop");
        let out = render_within(
            View::Line {
                prompt: "> ",
                text: &text,
                cursor: 0,
            },
            10,
        );
        assert!(out.contains("> abcdefg"));
        assert!(!out.contains("hij"));
    }

    #[test]
    fn test_modal_view_keeps_cursor_cell_visible() {
        let text = chars("0123456789abcdef");
        let out = render_within(
            View::Modal {
                prompt: "",
                mode: &VimMode::Normal,
                text: &text,
                cursor: 15,
                selection: None,
            },
            16,
        );
        // "[NORMAL] " leaves 6 columns for text.
        assert!(out.contains(&format!("abcde{REVERSE}f")));
        assert!(!out.contains("9"));
    }

    #[test]
    fn test_notice_line() {
        let mut out = Vec::new();
        notice(&mut out, &Notice::error("boom")).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("error: boom"));
        assert!(out.ends_with("\r\n"));
    }
}
