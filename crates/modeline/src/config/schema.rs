//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Config {
    /// Editor settings
    pub editor: EditorConfig,
    /// Multi-line input settings
    pub multiline: MultilineConfig,
    /// Logging settings
    pub log: LogConfig,
}

/// Editor-related settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Prompt shown before the input line
    pub prompt: String,
    /// Esc on the plain input line switches to vim editing
    pub escape_enters_vim: bool,
    /// Start every session with vim editing enabled
    pub start_in_vim: bool,
    /// Return to vim editing after a line is submitted from it
    pub stay_in_vim: bool,
    /// Maximum history entries to keep
    pub history_capacity: usize,
    /// Save history to disk between runs
    pub persist_history: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            escape_enters_vim: true,
            start_in_vim: false,
            stay_in_vim: true,
            history_capacity: 1000,
            persist_history: true,
        }
    }
}

/// Multi-line collection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultilineConfig {
    /// Line that starts collection when submitted on its own
    pub trigger: String,
    /// Maximum number of collected lines
    pub max_lines: usize,
    /// Maximum length of the joined text, in characters
    pub max_chars: usize,
}

impl Default for MultilineConfig {
    fn default() -> Self {
        Self {
            trigger: "\"\"\"".to_string(),
            max_lines: 200,
            max_chars: 20_000,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `MODELINE_LOG` is unset (e.g. "info", "modeline=debug")
    pub level: String,
    /// Log file name inside the config directory
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "modeline.log".to_string(),
        }
    }
}
