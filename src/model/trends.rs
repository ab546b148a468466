//! Aggregate counts feeding the distribution charts.

use crate::api::TrendsResponse;

/// A (label, count) pair. Sequence order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSample {
    pub label: String,
    pub count: u64,
}

impl AggregateSample {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Both aggregate series from one trends response, labels kept raw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendsSnapshot {
    pub by_category: Vec<AggregateSample>,
    pub by_severity: Vec<AggregateSample>,
}

impl From<TrendsResponse> for TrendsSnapshot {
    fn from(response: TrendsResponse) -> Self {
        Self {
            by_category: response
                .by_category
                .into_iter()
                .map(|c| AggregateSample::new(c.category, c.count))
                .collect(),
            by_severity: response
                .by_severity
                .into_iter()
                .map(|s| AggregateSample::new(s.severity, s.count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_order_is_preserved() {
        let response: TrendsResponse = serde_json::from_str(
            r#"{"by_category":[{"category":"staff_behaviour","count":2},
                               {"category":"billing_issue","count":5},
                               {"category":"cleanliness","count":1}]}"#,
        )
        .unwrap();
        let snapshot = TrendsSnapshot::from(response);
        let labels: Vec<&str> = snapshot
            .by_category
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, ["staff_behaviour", "billing_issue", "cleanliness"]);
        assert!(snapshot.by_severity.is_empty());
    }
}
