//! The service port consumed by the dashboard components.

use super::types::{
    AnalyzeRequest, AnalyzeResponse, CategoriesResponse, ClusteringResponse, MetricsResponse,
    SeverityLevelsResponse, TrendsResponse,
};
use crate::error::ApiError;
use async_trait::async_trait;

/// Read/submit operations against the classification service.
///
/// Components only ever talk to the service through this trait, so they can
/// be driven by an in-memory implementation in tests.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Liveness check against the service root.
    ///
    /// `Ok` for any success status, `ApiError::Status` for any other status
    /// and `ApiError::Transport` when the service is unreachable.
    async fn ping(&self) -> Result<(), ApiError>;

    /// Evaluation metrics of the category and severity models.
    async fn metrics(&self) -> Result<MetricsResponse, ApiError>;

    /// Record counts by category and by severity.
    async fn trends(&self) -> Result<TrendsResponse, ApiError>;

    /// 2-D projection of the records with their cluster assignment.
    async fn clustering(&self) -> Result<ClusteringResponse, ApiError>;

    /// Category taxonomy.
    async fn categories(&self) -> Result<CategoriesResponse, ApiError>;

    /// Ordered severity levels.
    async fn severity_levels(&self) -> Result<SeverityLevelsResponse, ApiError>;

    /// Classify one text.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError>;

    /// Base URL requests are sent to, for display.
    fn base_url(&self) -> &str;
}
