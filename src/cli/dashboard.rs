//! Dashboard command handler.

use crate::api::{DashboardApi, HttpDashboardClient};
use crate::config::{DashboardConfig, Validatable};
use crate::dashboard::Dashboard;
use crate::error::{DashboardError, ErrorContext, Result};
use crate::tui::{run_tui, set_theme, Theme, TuiApp};
use std::sync::Arc;

/// Reject an invalid configuration with every problem listed.
pub fn validate_config(config: &DashboardConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let listed: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(DashboardError::validation(listed.join("; ")))
}

/// Effective configuration as YAML.
pub fn render_config(config: &DashboardConfig) -> Result<String> {
    serde_yaml::to_string(config)
        .map_err(|e| DashboardError::config(format!("failed to serialize config: {e}")))
}

/// Run the interactive dashboard until the operator quits.
///
/// Builds a single-threaded runtime: every request task and the UI loop
/// share one thread.
pub fn run_dashboard(config: &DashboardConfig) -> Result<()> {
    set_theme(Theme::from_name(&config.tui.theme));

    let client = HttpDashboardClient::new(&config.api.client_config())
        .context("creating HTTP client")?;
    tracing::info!(
        base_url = client.base_url(),
        timeout = ?config.api.timeout(),
        "using classification service"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let mut app = TuiApp::new(Dashboard::new(Arc::new(client)));
    runtime
        .block_on(run_tui(&mut app, config.tui.tick_rate()))
        .map_err(|e| DashboardError::terminal(e.to_string()))
}
