//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::APP_DIR_NAME;
use super::types::DashboardConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".saarthi-dash.yaml",
    ".saarthi-dash.yml",
    "saarthi-dash.yaml",
    "saarthi-dash.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/saarthi-dash/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    let search_dirs = [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME)),
        dirs::home_dir(),
    ];
    search_dirs
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load a `DashboardConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<DashboardConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(DashboardConfig::default());
    }
    let config: DashboardConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from a discovered file, or return default.
///
/// A discovered file that fails to load is skipped with a warning. An
/// explicitly named file goes through [`load_config_file`] instead so the
/// failure reaches the caller.
#[must_use]
pub fn load_or_default() -> (DashboardConfig, Option<PathBuf>) {
    discover_config_file(None).map_or_else(
        || (DashboardConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (DashboardConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Values given on the command line. `None` leaves the file's value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,
    pub tick_rate_ms: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl DashboardConfig {
    /// Layer command-line values over this config.
    ///
    /// Every value that was given wins, including one equal to the default.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.base_url {
            self.api.base_url = Some(url.clone());
        }
        if let Some(secs) = overrides.timeout_secs {
            self.api.timeout_secs = Some(secs);
        }
        if let Some(theme) = &overrides.theme {
            self.tui.theme.clone_from(theme);
        }
        if let Some(ms) = overrides.tick_rate_ms {
            self.tui.tick_rate_ms = ms;
        }
        if let Some(level) = &overrides.log_level {
            self.logging.level.clone_from(level);
        }
        if let Some(path) = &overrides.log_file {
            self.logging.file = Some(path.clone());
        }
    }

    /// Load the config file and apply CLI overrides.
    ///
    /// With an explicit `config_path` the file must exist and parse. Without
    /// one, the standard locations are searched and defaults are used when
    /// nothing usable is found.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = match config_path {
            Some(path) => (load_config_file(path)?, Some(path.to_path_buf())),
            None => load_or_default(),
        };
        config.apply_overrides(overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r"# saarthi-dash configuration
# ==========================
#
# Place this file at:
#   - .saarthi-dash.yaml in the working directory
#   - ~/.config/saarthi-dash/saarthi-dash.yaml for global config
#
# CLI arguments always override file settings.

# Classification service
# api:
#   # Explicit service URL; wins over everything else
#   base_url: http://localhost:8000
#   # Origin the dashboard is served from, used when base_url is unset.
#   # Local hosts on a port other than 8000 resolve to http://localhost:8000.
#   origin:
#     scheme: https
#     host: dashboard.example.org
#     port: 443
#   # Per-request timeout in seconds (no timeout when omitted)
#   timeout_secs: 30

# Terminal UI
tui:
  # Theme: dark, light, high-contrast
  theme: dark
  # Redraw interval in milliseconds
  tick_rate_ms: 250

# Log output (always to a file; RUST_LOG overrides the level)
logging:
  level: info
  # file: /tmp/saarthi-dash.log
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
