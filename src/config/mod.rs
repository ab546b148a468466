//! Configuration module for saarthi-dash.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use saarthi_dash::config::DashboardConfig;
//!
//! // Use defaults
//! let config = DashboardConfig::default();
//!
//! // Use builder
//! let config = DashboardConfig::builder()
//!     .base_url("http://localhost:8000")
//!     .theme("light")
//!     .build();
//!
//! // Load from file
//! use saarthi_dash::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default();
//! ```
//!
//! # Configuration File
//!
//! Place a `.saarthi-dash.yaml` file in the working directory or
//! `~/.config/saarthi-dash/`:
//!
//! ```yaml
//! api:
//!   base_url: http://localhost:8000
//! tui:
//!   theme: high-contrast
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    default_log_path, DEFAULT_LOG_LEVEL, DEFAULT_THEME, DEFAULT_TICK_RATE_MS, VALID_LOG_LEVELS,
    VALID_THEMES,
};
pub use types::{ApiConfig, DashboardConfig, DashboardConfigBuilder, LoggingConfig, TuiConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError, ConfigOverrides,
};

/// Generate a JSON Schema for the `DashboardConfig` configuration format.
///
/// Documents every option that can be set in `.saarthi-dash.yaml`, for
/// editor validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(DashboardConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        assert!(schema.contains("\"api\""));
        assert!(schema.contains("\"tick_rate_ms\""));
        assert!(schema.contains("\"logging\""));
    }
}
