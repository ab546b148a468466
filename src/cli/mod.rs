//! CLI command handlers.
//!
//! This module provides testable handlers that are invoked by main.rs. The
//! binary only parses arguments and layers them over the config file.

mod dashboard;
mod logging;

pub use dashboard::{render_config, run_dashboard, validate_config};
pub use logging::{filter_directive, init_logging};
