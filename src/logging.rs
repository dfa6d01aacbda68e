//! File logging
//!
//! The terminal is owned by the UI, so tracing output goes to a file.

use crate::config::LoggingConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

pub fn log_file_path(config: &LoggingConfig) -> PathBuf {
    config
        .file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("lazy-request-tui.log"))
}

pub fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

/// Install the global subscriber. Failing to open the log file only
/// disables logging; the app still starts.
pub fn init(config: &LoggingConfig) {
    let path = log_file_path(config);

    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(parse_level(&config.level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::info!("Logging to {}", path.display());
    }
}
