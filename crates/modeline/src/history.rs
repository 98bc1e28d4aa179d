//! Submitted-line history with JSON persistence.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::history_path;

/// Current history file schema version.
const HISTORY_VERSION: u32 = 1;

/// A single history entry with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The submitted text.
    pub text: String,
    /// When the line was submitted.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(text: String) -> Self {
        Self {
            text,
            timestamp: Utc::now(),
        }
    }
}

/// The history file format.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    entries: Vec<HistoryEntry>,
}

/// Bounded list of submitted lines, oldest first.
///
/// Entries are never modified once pushed; the oldest entry is evicted
/// when the capacity is exceeded.
pub struct History {
    entries: Vec<HistoryEntry>,
    capacity: usize,
    path: PathBuf,
    dirty: bool,
}

impl History {
    /// Load history from the default path.
    pub fn load(capacity: usize) -> Result<Self> {
        let path = history_path().context("Could not determine history path")?;
        Self::load_from_path(&path, capacity)
    }

    /// Load history from a specific path.
    pub fn load_from_path(path: &Path, capacity: usize) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read history file: {}", path.display()))?;

            let file: HistoryFile = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse history file: {}", path.display()))?;

            file.entries
        } else {
            Vec::new()
        };

        // Enforce capacity on load.
        let entries = if entries.len() > capacity {
            let skip_count = entries.len() - capacity;
            entries.into_iter().skip(skip_count).collect()
        } else {
            entries
        };

        Ok(Self {
            entries,
            capacity,
            path: path.to_path_buf(),
            dirty: false,
        })
    }

    /// Create a new empty history that is never written to disk.
    pub fn new_empty(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            path: PathBuf::new(),
            dirty: false,
        }
    }

    /// Save history to disk.
    /// Uses atomic write (temp file + rename) to prevent corruption on crash.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty || self.path.as_os_str().is_empty() {
            return Ok(());
        }

        let parent = self
            .path
            .parent()
            .context("History path has no parent directory")?;

        // Ensure parent directory exists.
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        let file = HistoryFile {
            version: HISTORY_VERSION,
            entries: self.entries.clone(),
        };

        let content = serde_json::to_string_pretty(&file).context("Failed to serialize history")?;

        let mut tmp = NamedTempFile::new_in(parent).with_context(|| {
            format!(
                "Failed to create temp history file in: {}",
                parent.display()
            )
        })?;
        tmp.write_all(content.as_bytes())
            .context("Failed to write temp history file")?;
        tmp.flush().context("Failed to flush temp history file")?;
        tmp.persist(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to persist history file: {}", e))?;

        self.dirty = false;
        Ok(())
    }

    /// Add a submitted line. Blank input is ignored.
    pub fn push(&mut self, text: &str) {
        if text.trim().is_empty() || self.capacity == 0 {
            return;
        }

        self.entries.push(HistoryEntry::new(text.to_string()));

        // Enforce capacity.
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
        }

        self.dirty = true;
        debug!(target: "history", len = self.entries.len(), "history entry added");
    }

    /// Get all history entries (oldest first).
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The entry `offset` steps back from the most recent one (0 = newest).
    pub fn entry_back(&self, offset: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(offset + 1)?;
        Some(self.entries[index].text.as_str())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for History {
    fn drop(&mut self) {
        // Try to save on drop, but don't panic on failure.
        let _ = self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let history = History::load_from_path(&dir.path().join("history.json"), 100).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        {
            let mut history = History::load_from_path(&path, 100).unwrap();
            history.push("what is a monad");
            history.push("explain lifetimes");
            history.save().unwrap();
        }

        let history = History::load_from_path(&path, 100).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].text, "what is a monad");
        assert_eq!(history.entries()[1].text, "explain lifetimes");
    }

    #[test]
    fn test_saved_on_drop() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        {
            let mut history = History::load_from_path(&path, 100).unwrap();
            history.push("hello");
        }

        let history = History::load_from_path(&path, 100).unwrap();
        assert_eq!(history.entry_back(0), Some("hello"));
    }

    #[test]
    fn test_capacity_limit() {
        let mut history = History::new_empty(3);
        for i in 1..=5 {
            history.push(&format!("line{}", i));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0].text, "line3");
        assert_eq!(history.entries()[1].text, "line4");
        assert_eq!(history.entries()[2].text, "line5");
    }

    #[test]
    fn test_blank_input_not_added() {
        let mut history = History::new_empty(100);
        history.push("");
        history.push("   ");
        assert!(history.is_empty());
    }

    #[test]
    fn test_entry_back() {
        let mut history = History::new_empty(100);
        history.push("first");
        history.push("second");

        assert_eq!(history.entry_back(0), Some("second"));
        assert_eq!(history.entry_back(1), Some("first"));
        assert_eq!(history.entry_back(2), None);
    }

    #[test]
    fn test_corrupted_file_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "not valid json {{{").unwrap();

        assert!(History::load_from_path(&path, 10).is_err());
    }

    #[test]
    fn test_load_enforces_capacity() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.json");

        // Create a file with more entries than the capacity.
        let file = HistoryFile {
            version: HISTORY_VERSION,
            entries: (1..=10)
                .map(|i| HistoryEntry::new(format!("line{}", i)))
                .collect(),
        };
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let history = History::load_from_path(&path, 3).unwrap();
        assert_eq!(history.len(), 3);
        // Should keep the most recent (last) entries.
        assert_eq!(history.entries()[0].text, "line8");
        assert_eq!(history.entries()[2].text, "line10");
    }
}
