//! Result of classifying one submitted text.

use super::labels::humanize;
use super::metrics::PLACEHOLDER;
use crate::api::AnalyzeResponse;

/// Ordinal urgency label assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Parse a severity name case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Style class applied to the severity badge.
    #[must_use]
    pub const fn style_class(&self) -> &'static str {
        match self {
            Self::Low => "severity-low",
            Self::Medium => "severity-medium",
            Self::High => "severity-high",
            Self::Critical => "severity-critical",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a submitted text. Ephemeral: lives until the next
/// attempt or a clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: String,
    /// Severity as sent by the service, possibly unrecognized
    pub severity_text: String,
    pub cluster_id: Option<i64>,
}

impl ClassificationResult {
    /// Category with separators replaced by spaces.
    #[must_use]
    pub fn category_label(&self) -> String {
        humanize(&self.category)
    }

    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        Severity::parse(&self.severity_text)
    }

    /// Badge text: the raw severity, or the placeholder when empty.
    #[must_use]
    pub fn severity_label(&self) -> &str {
        if self.severity_text.trim().is_empty() {
            PLACEHOLDER
        } else {
            &self.severity_text
        }
    }

    /// Badge style class; unrecognized severities get the `low` style.
    #[must_use]
    pub fn severity_class(&self) -> &'static str {
        self.severity().unwrap_or(Severity::Low).style_class()
    }

    /// 1-based cluster label (`cluster_id` 2 → `Cluster #3`).
    #[must_use]
    pub fn cluster_label(&self) -> String {
        match self.cluster_id {
            Some(id) => format!("Cluster #{}", id.saturating_add(1)),
            None => format!("Cluster #{PLACEHOLDER}"),
        }
    }
}

impl From<AnalyzeResponse> for ClassificationResult {
    fn from(response: AnalyzeResponse) -> Self {
        Self {
            category: response.category,
            severity_text: response.severity,
            cluster_id: response.cluster_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("critical"), Some(Severity::Critical));
        assert_eq!(Severity::parse(" High "), Some(Severity::High));
        assert_eq!(Severity::parse("urgent"), None);
        assert!(Severity::Critical > Severity::Low);
    }

    #[test]
    fn test_result_labels() {
        let result = ClassificationResult::from(AnalyzeResponse {
            category: "service_delay".to_string(),
            severity: "critical".to_string(),
            cluster_id: Some(2),
        });
        assert_eq!(result.category_label(), "service delay");
        assert_eq!(result.severity_label(), "critical");
        assert_eq!(result.severity_class(), "severity-critical");
        assert_eq!(result.cluster_label(), "Cluster #3");
    }

    #[test]
    fn test_result_with_missing_fields() {
        let result = ClassificationResult::from(AnalyzeResponse::default());
        assert_eq!(result.category_label(), "");
        assert_eq!(result.severity_label(), PLACEHOLDER);
        assert_eq!(result.severity_class(), "severity-low");
        assert_eq!(result.cluster_label(), "Cluster #—");
    }

    #[test]
    fn test_unrecognized_severity_keeps_text() {
        let result = ClassificationResult {
            category: "other".to_string(),
            severity_text: "urgent".to_string(),
            cluster_id: Some(0),
        };
        assert_eq!(result.severity_label(), "urgent");
        assert_eq!(result.severity_class(), "severity-low");
    }
}
