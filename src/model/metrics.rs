//! Model evaluation metrics.

use crate::api::{AxisMetricsPayload, MetricsResponse};

/// Text shown in place of any absent numeric value.
pub const PLACEHOLDER: &str = "—";

/// Accuracy / F1 of one classification axis. Absent stays absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisMetrics {
    pub accuracy: Option<f64>,
    pub f1_weighted: Option<f64>,
}

impl From<AxisMetricsPayload> for AxisMetrics {
    fn from(payload: AxisMetricsPayload) -> Self {
        Self {
            accuracy: payload.accuracy,
            f1_weighted: payload.f1_weighted,
        }
    }
}

/// Metrics for both classification axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub category: AxisMetrics,
    pub severity: AxisMetrics,
}

impl From<MetricsResponse> for MetricsSnapshot {
    fn from(response: MetricsResponse) -> Self {
        Self {
            category: response.category.map(Into::into).unwrap_or_default(),
            severity: response.severity.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Format a ratio as a percentage with one decimal (`0.91` → `91.0%`).
///
/// Absent and non-finite values format as [`PLACEHOLDER`], never as `0.0%`.
#[must_use]
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}%", v * 100.0),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(0.91)), "91.0%");
        assert_eq!(format_percent(Some(0.8947)), "89.5%");
        assert_eq!(format_percent(Some(1.0)), "100.0%");
        assert_eq!(format_percent(Some(0.0)), "0.0%");
    }

    #[test]
    fn test_absent_is_placeholder_not_zero() {
        assert_eq!(format_percent(None), PLACEHOLDER);
        assert_eq!(format_percent(Some(f64::NAN)), PLACEHOLDER);
    }

    #[test]
    fn test_snapshot_from_partial_response() {
        let response: MetricsResponse =
            serde_json::from_str(r#"{"category":{"accuracy":0.91}}"#).unwrap();
        let snapshot = MetricsSnapshot::from(response);
        assert_eq!(snapshot.category.accuracy, Some(0.91));
        assert_eq!(snapshot.category.f1_weighted, None);
        assert_eq!(snapshot.severity, AxisMetrics::default());
    }
}
