//! Accuracy / F1 summary of both classification models.

use crate::api::{DashboardApi, MetricsResponse};
use crate::error::ApiError;
use crate::model::{format_percent, MetricsSnapshot, PLACEHOLDER};

/// The four formatted values shown in the metrics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsDisplay {
    pub category_accuracy: String,
    pub category_f1: String,
    pub severity_accuracy: String,
    pub severity_f1: String,
}

impl MetricsDisplay {
    /// All four values absent.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            category_accuracy: PLACEHOLDER.to_string(),
            category_f1: PLACEHOLDER.to_string(),
            severity_accuracy: PLACEHOLDER.to_string(),
            severity_f1: PLACEHOLDER.to_string(),
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &MetricsSnapshot) -> Self {
        Self {
            category_accuracy: format_percent(snapshot.category.accuracy),
            category_f1: format_percent(snapshot.category.f1_weighted),
            severity_accuracy: format_percent(snapshot.severity.accuracy),
            severity_f1: format_percent(snapshot.severity.f1_weighted),
        }
    }

    /// `(label, value)` rows in display order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Category accuracy", self.category_accuracy.as_str()),
            ("Category F1", self.category_f1.as_str()),
            ("Severity accuracy", self.severity_accuracy.as_str()),
            ("Severity F1", self.severity_f1.as_str()),
        ]
    }
}

impl Default for MetricsDisplay {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[derive(Debug, Default)]
pub struct MetricsPanel {
    display: MetricsDisplay,
    snapshot: Option<MetricsSnapshot>,
}

impl MetricsPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch(api: &dyn DashboardApi) -> Result<MetricsResponse, ApiError> {
        api.metrics().await
    }

    /// Update the four values. A failed fetch shows placeholders everywhere.
    pub fn apply(&mut self, outcome: Result<MetricsResponse, ApiError>) -> &MetricsDisplay {
        match outcome {
            Ok(response) => {
                let snapshot = MetricsSnapshot::from(response);
                self.display = MetricsDisplay::from_snapshot(&snapshot);
                self.snapshot = Some(snapshot);
            }
            Err(err) => {
                tracing::warn!(error = %err, "metrics fetch failed");
                self.display = MetricsDisplay::placeholder();
                self.snapshot = None;
            }
        }
        &self.display
    }

    #[must_use]
    pub const fn display(&self) -> &MetricsDisplay {
        &self.display
    }

    /// The last decoded snapshot, `None` before the first success or after
    /// a failure.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&MetricsSnapshot> {
        self.snapshot.as_ref()
    }
}
