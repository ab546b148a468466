//! Default values for saarthi-dash configuration.

use std::path::PathBuf;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "dark";

/// Default TUI redraw interval.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Default log level filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application directory name under the platform config/cache dirs.
pub const APP_DIR_NAME: &str = "saarthi-dash";

/// File name of the log inside the cache directory.
pub const LOG_FILE_NAME: &str = "saarthi-dash.log";

/// Themes the TUI knows.
pub const VALID_THEMES: &[&str] = &["dark", "light", "high-contrast"];

/// Level names accepted by `logging.level`.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Default log file: `<cache dir>/saarthi-dash/saarthi-dash.log`.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_shape() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with("saarthi-dash/saarthi-dash.log"));
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(VALID_THEMES.contains(&DEFAULT_THEME));
        assert!(VALID_LOG_LEVELS.contains(&DEFAULT_LOG_LEVEL));
    }
}
