//! Configuration validation for saarthi-dash.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::{VALID_LOG_LEVELS, VALID_THEMES};
use super::types::{ApiConfig, DashboardConfig, LoggingConfig, TuiConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for DashboardConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.api.validate());
        errors.extend(self.tui.validate());
        errors.extend(self.logging.validate());
        errors
    }
}

impl Validatable for ApiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref base_url) = self.base_url {
            match reqwest::Url::parse(base_url.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(ConfigError::new(
                    "api.base_url",
                    format!("Unsupported scheme '{}', expected http or https", url.scheme()),
                )),
                Err(e) => errors.push(ConfigError::new(
                    "api.base_url",
                    format!("Invalid URL '{base_url}': {e}"),
                )),
            }
        }

        if let Some(ref origin) = self.origin {
            if !matches!(origin.scheme.as_str(), "http" | "https") {
                errors.push(ConfigError::new(
                    "api.origin.scheme",
                    format!("Unsupported scheme '{}', expected http or https", origin.scheme),
                ));
            }
        }

        if self.timeout_secs == Some(0) {
            errors.push(ConfigError::new(
                "api.timeout_secs",
                "Timeout must be at least 1 second; omit it to disable timeouts",
            ));
        }

        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !VALID_THEMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    VALID_THEMES.join(", ")
                ),
            ));
        }

        if !(16..=5000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                format!(
                    "Tick rate must be between 16 and 5000 ms, got {}",
                    self.tick_rate_ms
                ),
            ));
        }

        errors
    }
}

impl Validatable for LoggingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            errors.push(ConfigError::new(
                "logging.level",
                format!(
                    "Invalid level '{}'. Valid options: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if let Some(ref file) = self.file {
            if file.as_os_str().is_empty() {
                errors.push(ConfigError::new("logging.file", "Log file path is empty"));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageOrigin;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DashboardConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = DashboardConfig::builder().base_url("not a url").build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "api.base_url");

        let config = DashboardConfig::builder().base_url("ftp://host").build();
        assert!(!config.is_valid());
    }

    #[test]
    fn test_invalid_origin_scheme() {
        let config = DashboardConfig::builder()
            .origin(PageOrigin::new("file", "", None))
            .build();
        assert_eq!(config.validate()[0].field, "api.origin.scheme");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = DashboardConfig::builder().timeout_secs(0).build();
        assert_eq!(config.validate()[0].field, "api.timeout_secs");
    }

    #[test]
    fn test_invalid_theme_and_tick_rate() {
        let config = DashboardConfig::builder()
            .theme("neon")
            .tick_rate_ms(1)
            .build();
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, ["tui.theme", "tui.tick_rate_ms"]);
    }

    #[test]
    fn test_log_level_case_insensitive() {
        assert!(DashboardConfig::builder().log_level("DEBUG").build().is_valid());
        assert!(!DashboardConfig::builder().log_level("loud").build().is_valid());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::new("tui.theme", "bad");
        assert_eq!(err.to_string(), "tui.theme: bad");
    }
}
