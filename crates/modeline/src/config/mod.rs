//! Configuration module for modeline.
//!
//! Handles loading and managing configuration from:
//! - Default values
//! - Config file (~/.config/modeline/config.toml)
//! - Environment variables

mod schema;

pub use schema::{Config, EditorConfig, LogConfig, MultilineConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Returns the config directory path.
///
/// Checks `MODELINE_CONFIG_DIR` environment variable first, then falls back
/// to the system default (~/.config/modeline on Linux/macOS).
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("MODELINE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|p| p.join("modeline"))
}

/// Returns the default config file path (~/.config/modeline/config.toml)
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Returns the history file path (~/.config/modeline/history.json)
pub fn history_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("history.json"))
}

/// Load configuration from the default path or return defaults
pub fn load_config() -> Result<Config> {
    if let Some(path) = config_path() {
        if path.exists() {
            return load_config_from(&path);
        }
    }
    Ok(Config::default())
}

/// Load configuration from a specific path
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.prompt, "> ");
        assert_eq!(config.editor.history_capacity, 1000);
        assert_eq!(config.multiline.trigger, "\"\"\"");
    }

    #[test]
    #[serial]
    fn test_config_paths() {
        // These should return Some on most systems
        let config_dir = config_dir();
        let config_path = config_path();
        let history_path = history_path();

        // Just verify they're consistent
        if let (Some(dir), Some(cfg), Some(hist)) = (config_dir, config_path, history_path) {
            assert!(cfg.starts_with(&dir));
            assert!(hist.starts_with(&dir));
            assert!(cfg.ends_with("config.toml"));
            assert!(hist.ends_with("history.json"));
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_env_override() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("MODELINE_CONFIG_DIR", dir.path());
        assert_eq!(config_dir(), Some(dir.path().to_path_buf()));

        std::fs::write(
            dir.path().join("config.toml"),
            "[editor]\nprompt = \"? \"\n",
        )
        .unwrap();
        let config = load_config().unwrap();
        std::env::remove_var("MODELINE_CONFIG_DIR");

        assert_eq!(config.editor.prompt, "? ");
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[editor\nprompt = 1").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[multiline]
max_lines = 3
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.multiline.max_lines, 3);
        // Other fields should be default
        assert_eq!(config.editor.history_capacity, 1000);
        assert_eq!(config.multiline.max_chars, 20_000);
    }
}
