//! Configuration types for saarthi-dash.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the keys
//! it wants to change.

use super::defaults::{DEFAULT_LOG_LEVEL, DEFAULT_THEME, DEFAULT_TICK_RATE_MS};
use crate::api::{resolve_base_url, ApiClientConfig, PageOrigin};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DashboardConfig {
    /// Classification service connection
    pub api: ApiConfig,
    /// Terminal UI settings
    pub tui: TuiConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Create a new builder for `DashboardConfig`.
    #[must_use]
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }
}

// ============================================================================
// Builder for DashboardConfig
// ============================================================================

/// Builder for creating `DashboardConfig` instances.
#[derive(Debug, Default)]
#[must_use]
pub struct DashboardConfigBuilder {
    config: DashboardConfig,
}

impl DashboardConfigBuilder {
    /// Set an explicit service base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.api.base_url = Some(base_url.into());
        self
    }

    /// Set the origin the base URL is derived from when none is explicit.
    pub fn origin(mut self, origin: PageOrigin) -> Self {
        self.config.api.origin = Some(origin);
        self
    }

    /// Set a per-request timeout in seconds.
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.api.timeout_secs = Some(secs);
        self
    }

    /// Set the TUI theme.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    /// Set the TUI tick rate.
    pub const fn tick_rate_ms(mut self, ms: u64) -> Self {
        self.config.tui.tick_rate_ms = ms;
        self
    }

    /// Set the log level filter.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Set the log file path.
    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.logging.file = Some(path.into());
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DashboardConfig {
        self.config
    }
}

// ============================================================================
// Section types
// ============================================================================

/// Where and how to reach the classification service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// Explicit base URL, e.g. `http://localhost:8000`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Origin the dashboard is served from, used when `base_url` is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<PageOrigin>,
    /// Per-request timeout in seconds (none by default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// The base URL requests go to.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        resolve_base_url(self.base_url.as_deref(), self.origin.as_ref())
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// HTTP client settings for this section.
    #[must_use]
    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.resolved_base_url(),
            timeout: self.timeout(),
        }
    }
}

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Redraw interval in milliseconds
    #[schemars(range(min = 16, max = 5000))]
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl TuiConfig {
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

/// Log output configuration.
///
/// The terminal belongs to the TUI, so logs always go to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter: "trace", "debug", "info", "warn" or "error".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log file path; defaults to the platform cache directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Configured log file, else the default location.
    #[must_use]
    pub fn resolved_file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(super::defaults::default_log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = DashboardConfig::builder()
            .base_url("http://api.example.org")
            .timeout_secs(5)
            .theme("light")
            .log_level("debug")
            .build();

        assert_eq!(config.api.resolved_base_url(), "http://api.example.org");
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.tui.theme, "light");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_base_url_from_origin() {
        let config = DashboardConfig::builder()
            .origin(PageOrigin::new("https", "dash.example.org", None))
            .build();
        assert_eq!(config.api.resolved_base_url(), "https://dash.example.org");
        assert_eq!(DashboardConfig::default().api.resolved_base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: DashboardConfig = serde_yaml::from_str("tui:\n  theme: light\n").unwrap();
        assert_eq!(config.tui.theme, "light");
        assert_eq!(config.tui.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert_eq!(config.api, ApiConfig::default());
    }
}
