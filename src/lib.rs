//! **A terminal dashboard for the Rail Saarthi complaint intelligence service.**
//!
//! `saarthi-dash` talks to a complaint-classification backend over HTTP and
//! shows what it knows: whether it is reachable, how well its models score,
//! how complaints are distributed across categories and severities, how they
//! cluster, and which categories and severity levels it recognizes. An
//! operator can also type a complaint and have it classified on the spot.
//!
//! ## Core Concepts & Modules
//!
//! - **[`api`]**: The [`DashboardApi`] port, its reqwest implementation
//!   [`HttpDashboardClient`], and the wire types of the seven endpoints.
//! - **[`model`]**: Display-side values built from the wire types.
//! - **[`render`]**: Chart render models and the [`render::Slot`] that owns
//!   a component's current rendering.
//! - **[`panels`]**: One type per dashboard component. Each issues its own
//!   request and owns its own state; a failure in one never reaches another.
//! - **[`dashboard`]**: The [`Dashboard`] orchestrator that launches every
//!   feed and routes completions back to the component that asked.
//! - **[`tui`]**: The ratatui front end.
//!
//! ## Driving the dashboard without a terminal
//!
//! ```no_run
//! use std::sync::Arc;
//! use saarthi_dash::{ApiClientConfig, Dashboard, HttpDashboardClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpDashboardClient::new(&ApiClientConfig::default())?;
//!     let mut dashboard = Dashboard::new(Arc::new(client));
//!     dashboard.start();
//!     dashboard.run_until_idle().await;
//!
//!     println!("{}", dashboard.connectivity().state().label());
//!     println!("{}", dashboard.metrics().display().category_accuracy);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Cast safety: usize↔f64/u16 casts are pervasive in TUI layout math
    // and chart scaling; all values are bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    // Variable names like `min`/`mid` are clear in context
    clippy::similar_names
)]

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod panels;
pub mod render;
pub mod tui;

// Re-export main types for convenience
pub use api::{ApiClientConfig, DashboardApi, HttpDashboardClient, StubApi};
pub use config::{ConfigError, DashboardConfig, DashboardConfigBuilder, Validatable};
pub use dashboard::{ActionOutcome, Dashboard, DashboardEvent, UserAction};
pub use error::{ApiError, DashboardError, ErrorContext, Result};
pub use model::{ClassificationResult, MetricsSnapshot, Severity, TrendsSnapshot};
pub use panels::{
    AggregateChart, CategoryDirectory, ClassificationRequester, ClusterVisualization,
    ConnectivityProbe, MetricsPanel,
};
