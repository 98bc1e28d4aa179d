//! File logging setup.
//!
//! The terminal is in raw mode while the editor runs, so log output goes to
//! a file in the config directory instead of stderr.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{config_dir, LogConfig};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "MODELINE_LOG";

/// Build the filter from `MODELINE_LOG`, falling back to the configured level.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered log lines are flushed.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let Some(dir) = config_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&dir, &config.file);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    match tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // A subscriber is already installed; let this writer shut down.
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_filter_falls_back_to_config() {
        std::env::remove_var(LOG_ENV);
        let config = LogConfig {
            level: "modeline=debug".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(env_filter(&config).to_string(), "modeline=debug");
    }

    #[test]
    #[serial]
    fn test_env_filter_invalid_level_uses_info() {
        std::env::remove_var(LOG_ENV);
        let config = LogConfig {
            level: "modeline=loud".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(env_filter(&config).to_string(), "info");
    }
}
