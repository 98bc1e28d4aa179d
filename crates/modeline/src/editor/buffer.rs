//! Line buffer and cursor motions.
//!
//! Offsets are character indices, not byte indices. The cursor always
//! satisfies `0 <= cursor <= len()`.

/// Returns true for characters that make up a word.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The text of the line being edited together with its cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text` with the cursor at its end.
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    /// Move the cursor, clamping to `[0, len]`.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.chars.len());
    }

    /// Replace the whole content, cursor at `cursor` (clamped).
    pub fn set_text(&mut self, text: &str, cursor: usize) {
        self.chars = text.chars().collect();
        self.set_cursor(cursor);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    /// Copy of the characters in `[start, end)`, clamped to the buffer.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Insert `text` at `pos` (clamped). The cursor moves with the text if it
    /// sat at or after the insertion point.
    pub fn insert_at(&mut self, pos: usize, text: &str) {
        let pos = pos.min(self.chars.len());
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        self.chars.splice(pos..pos, inserted);
        if self.cursor >= pos {
            self.cursor += count;
        }
    }

    /// Insert text at the cursor and leave the cursor after it.
    pub fn insert_str(&mut self, text: &str) {
        self.insert_at(self.cursor, text);
    }

    pub fn insert_char(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Remove `[start, end)` and return the removed text. The range is
    /// clamped; the cursor is pulled back so it stays in bounds.
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        let removed: String = self.chars.drain(start..end).collect();

        if self.cursor >= end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
        self.set_cursor(self.cursor);
        removed
    }

    /// Delete the character before the cursor (Backspace).
    pub fn backspace(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        let removed = self.chars.remove(self.cursor - 1);
        self.cursor -= 1;
        Some(removed)
    }

    /// Delete the character under the cursor.
    pub fn delete_forward(&mut self) -> Option<char> {
        if self.cursor >= self.chars.len() {
            return None;
        }
        Some(self.chars.remove(self.cursor))
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    pub fn line_start(&self) -> usize {
        0
    }

    pub fn line_end(&self) -> usize {
        self.chars.len()
    }

    /// Offset of the first non-whitespace character, or 0 if there is none.
    pub fn first_non_blank(&self) -> usize {
        self.chars
            .iter()
            .position(|c| !c.is_whitespace())
            .unwrap_or(0)
    }

    /// Start of the next word after the cursor, or the end of the buffer.
    pub fn next_word_start(&self) -> usize {
        let len = self.chars.len();
        let mut i = self.cursor;
        while i < len && is_word_char(self.chars[i]) {
            i += 1;
        }
        while i < len && !is_word_char(self.chars[i]) {
            i += 1;
        }
        i
    }

    /// Start of the nearest word before the cursor, or 0.
    pub fn prev_word_start(&self) -> usize {
        let mut i = self.cursor;
        while i > 0 && !is_word_char(self.chars[i - 1]) {
            i -= 1;
        }
        while i > 0 && is_word_char(self.chars[i - 1]) {
            i -= 1;
        }
        i
    }

    /// Inclusive end of the word containing or following the cursor.
    ///
    /// Like vim's `e`, a cursor already on the last character of a word
    /// moves on to the end of the next word. Returns `len()` when no word
    /// follows.
    pub fn word_end(&self) -> usize {
        let len = self.chars.len();
        let mut i = self.cursor + 1;
        while i < len && !is_word_char(self.chars[i]) {
            i += 1;
        }
        if i >= len {
            return len;
        }
        while i + 1 < len && is_word_char(self.chars[i + 1]) {
            i += 1;
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str, cursor: usize) -> LineBuffer {
        let mut buf = LineBuffer::from_text(text);
        buf.set_cursor(cursor);
        buf
    }

    #[test]
    fn test_from_text_cursor_at_end() {
        let buf = LineBuffer::from_text("héllo");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_insert_at_moves_cursor_after_insertion_point() {
        let mut buf = at("world", 0);
        buf.insert_at(0, "hello ");
        assert_eq!(buf.text(), "hello world");
        assert_eq!(buf.cursor(), 6);

        let mut buf = at("ab", 0);
        buf.insert_at(10, "c");
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_range_clamps() {
        let mut buf = at("hello world", 11);
        assert_eq!(buf.delete_range(5, 100), " world");
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), 5);

        let mut buf = at("hello", 3);
        assert_eq!(buf.delete_range(1, 4), "ell");
        assert_eq!(buf.cursor(), 1);

        let mut buf = at("hello", 2);
        assert_eq!(buf.delete_range(4, 2), "");
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_left_right_clamp() {
        let mut buf = at("ab", 0);
        buf.move_left();
        assert_eq!(buf.cursor(), 0);
        buf.move_right();
        buf.move_right();
        buf.move_right();
        assert_eq!(buf.cursor(), 2);
    }

    #[test]
    fn test_first_non_blank() {
        assert_eq!(at("   foo", 0).first_non_blank(), 3);
        assert_eq!(at("    ", 2).first_non_blank(), 0);
        assert_eq!(at("", 0).first_non_blank(), 0);
    }

    #[test]
    fn test_next_word_start() {
        assert_eq!(at("foo bar", 0).next_word_start(), 4);
        assert_eq!(at("foo bar", 1).next_word_start(), 4);
        assert_eq!(at("foo, bar", 3).next_word_start(), 5);
        assert_eq!(at("foo bar", 4).next_word_start(), 7);
        assert_eq!(at("foo   ", 0).next_word_start(), 6);
    }

    #[test]
    fn test_prev_word_start() {
        assert_eq!(at("foo bar", 7).prev_word_start(), 4);
        assert_eq!(at("foo bar", 4).prev_word_start(), 0);
        assert_eq!(at("foo bar", 5).prev_word_start(), 4);
        assert_eq!(at("  foo", 2).prev_word_start(), 0);
    }

    #[test]
    fn test_word_end() {
        assert_eq!(at("foo bar", 0).word_end(), 2);
        assert_eq!(at("foo bar", 2).word_end(), 6);
        assert_eq!(at("foo bar", 3).word_end(), 6);
        assert_eq!(at("foo bar", 6).word_end(), 7);
        assert_eq!(at("", 0).word_end(), 0);
    }

    #[test]
    fn test_backspace_and_delete_forward() {
        let mut buf = at("abc", 1);
        assert_eq!(buf.backspace(), Some('a'));
        assert_eq!(buf.backspace(), None);
        assert_eq!(buf.delete_forward(), Some('b'));
        assert_eq!(buf.text(), "c");
        buf.set_cursor(1);
        assert_eq!(buf.delete_forward(), None);
    }
}
