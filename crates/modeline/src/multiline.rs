//! Collects several submitted lines into one message.

use thiserror::Error;

/// Collection exceeded one of its bounds; the pending lines are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    #[error("multi-line input exceeds {max} lines; input discarded")]
    TooManyLines { max: usize },
    #[error("multi-line input exceeds {max} characters; input discarded")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiLineCollector {
    lines: Vec<String>,
    /// Length of the lines joined with `\n`, in characters.
    chars: usize,
    max_lines: usize,
    max_chars: usize,
}

impl MultiLineCollector {
    pub fn new(max_lines: usize, max_chars: usize) -> Self {
        Self {
            lines: Vec::new(),
            chars: 0,
            max_lines,
            max_chars,
        }
    }

    /// Append a line. On overflow the caller is expected to drop the
    /// collector; nothing collected so far should be flushed.
    pub fn push(&mut self, line: &str) -> Result<(), CollectError> {
        if self.lines.len() + 1 > self.max_lines {
            return Err(CollectError::TooManyLines {
                max: self.max_lines,
            });
        }

        let separator = usize::from(!self.lines.is_empty());
        let chars = self.chars + separator + line.chars().count();
        if chars > self.max_chars {
            return Err(CollectError::TooLong {
                max: self.max_chars,
            });
        }

        self.lines.push(line.to_string());
        self.chars = chars;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The collected lines joined with newlines.
    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}
