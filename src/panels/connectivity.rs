//! Liveness indicator for the classification service.

use crate::api::DashboardApi;
use crate::error::ApiError;
use crate::render::{Rendering, Slot};
use chrono::{DateTime, Local};

/// What the last liveness check found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// No check has completed yet
    Pending,
    Connected,
    /// The service answered with a non-success status
    Error,
    /// The service could not be reached
    Offline,
}

impl ConnectionState {
    /// Classify a ping outcome.
    #[must_use]
    pub fn from_ping(outcome: &Result<(), ApiError>) -> Self {
        match outcome {
            Ok(()) => Self::Connected,
            Err(err) if err.is_transport() => Self::Offline,
            Err(_) => Self::Error,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Connecting…",
            Self::Connected => "API connected",
            Self::Error => "API error",
            Self::Offline => "API offline — start the backend service",
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// The drawn status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicator {
    pub state: ConnectionState,
    pub checked_at: DateTime<Local>,
}

impl Rendering for StatusIndicator {
    fn dispose(&mut self) {
        self.state = ConnectionState::Pending;
    }
}

/// Pings the service root and shows the result in a status slot.
#[derive(Debug)]
pub struct ConnectivityProbe {
    slot: Slot<StatusIndicator>,
}

impl Default for ConnectivityProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityProbe {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Slot::new("status"),
        }
    }

    pub async fn fetch(api: &dyn DashboardApi) -> Result<(), ApiError> {
        api.ping().await
    }

    /// Replace the indicator with one for `outcome`.
    pub fn apply(&mut self, outcome: Result<(), ApiError>) -> ConnectionState {
        let state = ConnectionState::from_ping(&outcome);
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, state = ?state, "liveness check failed");
        }
        self.slot.replace_with(|| StatusIndicator {
            state,
            checked_at: Local::now(),
        });
        state
    }

    /// Current state; `Pending` until the first check completes.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.slot
            .current()
            .map_or(ConnectionState::Pending, |indicator| indicator.state)
    }

    #[must_use]
    pub fn indicator(&self) -> Option<&StatusIndicator> {
        self.slot.current()
    }

    #[must_use]
    pub const fn slot(&self) -> &Slot<StatusIndicator> {
        &self.slot
    }
}
