//! Wire types for the classification service endpoints.
//!
//! Every response type is lenient: missing fields, `null` collections and
//! unknown keys decode to defaults instead of failing. Components decide what
//! an absent value means for display.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A JSON number that is a whole value, whether sent as `5` or `5.0`.
fn whole_number(value: &serde_json::Value) -> Option<i128> {
    let number = value.as_number()?;
    if let Some(n) = number.as_i64() {
        return Some(i128::from(n));
    }
    if let Some(n) = number.as_u64() {
        return Some(i128::from(n));
    }
    let f = number.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38).then_some(f as i128)
}

/// Decode a count. Whole floats are accepted; anything else counts as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(whole_number(&value)
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(0))
}

/// Decode a coordinate. `null`, strings and other non-numbers are absent.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|f| f.is_finite()))
}

/// Cluster index for a point the service did not assign.
pub const UNASSIGNED_CLUSTER: i64 = -1;

fn unassigned_cluster() -> i64 {
    UNASSIGNED_CLUSTER
}

/// Decode a cluster index. `null` or a non-integer is unassigned.
fn lenient_cluster<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(whole_number(&value)
        .and_then(|n| i64::try_from(n).ok())
        .unwrap_or(UNASSIGNED_CLUSTER))
}

// ============================================================================
// GET /api/metrics
// ============================================================================

/// Accuracy / F1 pair for one classification axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisMetricsPayload {
    pub accuracy: Option<f64>,
    pub f1_weighted: Option<f64>,
}

/// Evaluation metrics snapshot.
///
/// The service may also send a `clustering` section; it is not displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsResponse {
    pub category: Option<AxisMetricsPayload>,
    pub severity: Option<AxisMetricsPayload>,
}

// ============================================================================
// GET /api/trends
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCount {
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "lenient_count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityCount {
    #[serde(deserialize_with = "nullable")]
    pub severity: String,
    #[serde(deserialize_with = "lenient_count")]
    pub count: u64,
}

/// Aggregate counts by category and by severity, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsResponse {
    #[serde(deserialize_with = "nullable")]
    pub by_category: Vec<CategoryCount>,
    #[serde(deserialize_with = "nullable")]
    pub by_severity: Vec<SeverityCount>,
}

// ============================================================================
// GET /api/clustering-viz
// ============================================================================

/// Stable identifier a point may carry, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One projected record.
///
/// A point missing either coordinate cannot be plotted and is dropped when
/// the display set is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterPointPayload {
    #[serde(deserialize_with = "lenient_coordinate")]
    pub x: Option<f64>,
    #[serde(deserialize_with = "lenient_coordinate")]
    pub y: Option<f64>,
    #[serde(default = "unassigned_cluster", deserialize_with = "lenient_cluster")]
    pub cluster: i64,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PointId>,
}

/// Two-dimensional projection of the training records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringResponse {
    #[serde(deserialize_with = "nullable")]
    pub points: Vec<ClusterPointPayload>,
    pub n_clusters: Option<usize>,
}

// ============================================================================
// POST /api/analyze
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

impl AnalyzeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Classification of a single submitted text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    #[serde(deserialize_with = "nullable")]
    pub category: String,
    #[serde(deserialize_with = "nullable")]
    pub severity: String,
    pub cluster_id: Option<i64>,
}

/// Error body of a rejected request.
///
/// `detail` is usually a string. Request validation failures send a list of
/// `{loc, msg, type}` objects instead; their messages are joined.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the body carried one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        }
    }
}

// ============================================================================
// GET /api/categories, GET /api/severity-levels
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoriesResponse {
    #[serde(deserialize_with = "nullable")]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityLevelsResponse {
    #[serde(deserialize_with = "nullable")]
    pub severity_levels: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_missing_axis_fields() {
        let metrics: MetricsResponse = serde_json::from_str(
            r#"{"category":{"accuracy":0.91,"f1_weighted":0.89},"severity":{}}"#,
        )
        .unwrap();
        let category = metrics.category.unwrap();
        assert_eq!(category.accuracy, Some(0.91));
        let severity = metrics.severity.unwrap();
        assert_eq!(severity.accuracy, None);
        assert_eq!(severity.f1_weighted, None);
    }

    #[test]
    fn test_metrics_tolerates_unknown_sections() {
        let metrics: MetricsResponse = serde_json::from_str(
            r#"{"category":null,"clustering":{"n_clusters":5,"silhouette":0.12}}"#,
        )
        .unwrap();
        assert_eq!(metrics, MetricsResponse::default());
    }

    #[test]
    fn test_trends_null_collections() {
        let trends: TrendsResponse =
            serde_json::from_str(r#"{"by_category":null}"#).unwrap();
        assert!(trends.by_category.is_empty());
        assert!(trends.by_severity.is_empty());
    }

    #[test]
    fn test_clustering_point_ids() {
        let viz: ClusteringResponse = serde_json::from_str(
            r#"{"points":[{"x":0.5,"y":-1.0,"cluster":1,"text":"late train","id":17},
                         {"x":0.1,"y":0.2,"cluster":0,"text":"dirty coach","id":"c-9"},
                         {"x":0.3,"y":0.4,"cluster":2,"text":null}],
                "n_clusters":3}"#,
        )
        .unwrap();
        assert_eq!(viz.points[0].id, Some(PointId::Number(17)));
        assert_eq!(viz.points[1].id, Some(PointId::Text("c-9".to_string())));
        assert_eq!(viz.points[2].id, None);
        assert_eq!(viz.points[2].text, "");
        assert_eq!(viz.n_clusters, Some(3));
    }

    #[test]
    fn test_trends_whole_float_counts() {
        let trends: TrendsResponse = serde_json::from_str(
            r#"{"by_category":[{"category":"billing_issue","count":5.0},
                               {"category":"cleanliness","count":null}],
                "by_severity":[{"severity":"high","count":2.5},
                               {"severity":"low","count":-3}]}"#,
        )
        .unwrap();
        assert_eq!(trends.by_category[0].count, 5);
        assert_eq!(trends.by_category[1].count, 0);
        assert_eq!(trends.by_severity[0].count, 0);
        assert_eq!(trends.by_severity[1].count, 0);
    }

    #[test]
    fn test_clustering_null_coordinate_keeps_feed() {
        let viz: ClusteringResponse = serde_json::from_str(
            r#"{"points":[{"x":null,"y":0.4,"cluster":1,"text":"no x"},
                         {"y":0.4,"cluster":1,"text":"missing x"},
                         {"x":0.1,"y":0.2,"cluster":0,"text":"fine"}]}"#,
        )
        .unwrap();
        assert_eq!(viz.points.len(), 3);
        assert_eq!(viz.points[0].x, None);
        assert_eq!(viz.points[1].x, None);
        assert_eq!(viz.points[2].x, Some(0.1));
        assert_eq!(viz.points[2].y, Some(0.2));
    }

    #[test]
    fn test_clustering_nullable_cluster_index() {
        let viz: ClusteringResponse = serde_json::from_str(
            r#"{"points":[{"x":0.1,"y":0.2,"cluster":null},
                         {"x":0.1,"y":0.2},
                         {"x":0.1,"y":0.2,"cluster":2.0},
                         {"x":0.1,"y":0.2,"cluster":"a"}]}"#,
        )
        .unwrap();
        let clusters: Vec<i64> = viz.points.iter().map(|p| p.cluster).collect();
        assert_eq!(
            clusters,
            [UNASSIGNED_CLUSTER, UNASSIGNED_CLUSTER, 2, UNASSIGNED_CLUSTER]
        );
    }

    #[test]
    fn test_error_body_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"text too short"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("text too short"));
    }

    #[test]
    fn test_error_body_validation_list() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","text"],"msg":"field required","type":"missing"}]}"#,
        )
        .unwrap();
        assert_eq!(body.message().as_deref(), Some("field required"));
    }

    #[test]
    fn test_error_body_without_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(body.message(), None);
        let body: ErrorBody = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_analyze_request_shape() {
        let json = serde_json::to_string(&AnalyzeRequest::new("AC not working")).unwrap();
        assert_eq!(json, r#"{"text":"AC not working"}"#);
    }
}
