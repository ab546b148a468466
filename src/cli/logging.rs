//! File-backed `tracing` setup.
//!
//! The TUI owns the terminal, so log output never goes to stdout or stderr.

use crate::config::LoggingConfig;
use crate::error::{DashboardError, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive: `RUST_LOG` when set, else the configured level.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, rust_log: Option<String>) -> String {
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| config.level.to_lowercase())
}

/// Install the global subscriber writing to the configured log file.
///
/// Returns the file logs go to, or `None` when there is no file location
/// (no explicit path and no platform cache dir); logging is then disabled.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    let Some(path) = config.resolved_file() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DashboardError::io(parent, e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| DashboardError::io(&path, e))?;

    let directive = filter_directive(config, std::env::var("RUST_LOG").ok());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| DashboardError::config(format!("cannot install logger: {e}")))?;

    Ok(Some(path))
}
