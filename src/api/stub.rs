//! In-memory [`DashboardApi`] with canned responses.
//!
//! Every endpoint answers with a configurable result and every call is
//! counted, so tests can drive the dashboard without a running service.

use super::traits::DashboardApi;
use super::types::{
    AnalyzeRequest, AnalyzeResponse, CategoriesResponse, ClusteringResponse, MetricsResponse,
    SeverityLevelsResponse, TrendsResponse,
};
use crate::error::ApiError;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// Per-endpoint call counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub ping: usize,
    pub metrics: usize,
    pub trends: usize,
    pub clustering: usize,
    pub categories: usize,
    pub severity_levels: usize,
    pub analyze: usize,
}

/// Canned responses. Defaults to a reachable service with empty data.
#[derive(Debug, Clone)]
pub struct StubResponses {
    pub ping: Result<(), ApiError>,
    pub metrics: Result<MetricsResponse, ApiError>,
    pub trends: Result<TrendsResponse, ApiError>,
    pub clustering: Result<ClusteringResponse, ApiError>,
    pub categories: Result<CategoriesResponse, ApiError>,
    pub severity_levels: Result<SeverityLevelsResponse, ApiError>,
    pub analyze: Result<AnalyzeResponse, ApiError>,
}

impl Default for StubResponses {
    fn default() -> Self {
        Self {
            ping: Ok(()),
            metrics: Ok(MetricsResponse::default()),
            trends: Ok(TrendsResponse::default()),
            clustering: Ok(ClusteringResponse::default()),
            categories: Ok(CategoriesResponse::default()),
            severity_levels: Ok(SeverityLevelsResponse::default()),
            analyze: Ok(AnalyzeResponse::default()),
        }
    }
}

impl StubResponses {
    /// Every endpoint fails as if the service were down.
    #[must_use]
    pub fn unreachable() -> Self {
        let down = ApiError::transport("connection refused");
        Self {
            ping: Err(down.clone()),
            metrics: Err(down.clone()),
            trends: Err(down.clone()),
            clustering: Err(down.clone()),
            categories: Err(down.clone()),
            severity_levels: Err(down.clone()),
            analyze: Err(down),
        }
    }
}

#[derive(Debug, Default)]
struct StubState {
    responses: StubResponses,
    calls: CallCounts,
    analyzed: Vec<String>,
}

/// A [`DashboardApi`] answering from [`StubResponses`].
#[derive(Debug)]
pub struct StubApi {
    base_url: String,
    state: Mutex<StubState>,
}

impl Default for StubApi {
    fn default() -> Self {
        Self::new(StubResponses::default())
    }
}

impl StubApi {
    #[must_use]
    pub fn new(responses: StubResponses) -> Self {
        Self {
            base_url: super::base_url::DEFAULT_BASE_URL.to_string(),
            state: Mutex::new(StubState {
                responses,
                ..StubState::default()
            }),
        }
    }

    /// Change responses for subsequent calls.
    pub fn update(&self, change: impl FnOnce(&mut StubResponses)) {
        change(&mut self.lock().responses);
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Texts submitted for analysis, in order.
    #[must_use]
    pub fn analyzed_texts(&self) -> Vec<String> {
        self.lock().analyzed.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer<T: Clone>(
        &self,
        count: impl FnOnce(&mut CallCounts) -> &mut usize,
        pick: impl FnOnce(&StubResponses) -> &Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut state = self.lock();
        *count(&mut state.calls) += 1;
        pick(&state.responses).clone()
    }
}

#[async_trait]
impl DashboardApi for StubApi {
    async fn ping(&self) -> Result<(), ApiError> {
        self.answer(|c| &mut c.ping, |r| &r.ping)
    }

    async fn metrics(&self) -> Result<MetricsResponse, ApiError> {
        self.answer(|c| &mut c.metrics, |r| &r.metrics)
    }

    async fn trends(&self) -> Result<TrendsResponse, ApiError> {
        self.answer(|c| &mut c.trends, |r| &r.trends)
    }

    async fn clustering(&self) -> Result<ClusteringResponse, ApiError> {
        self.answer(|c| &mut c.clustering, |r| &r.clustering)
    }

    async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        self.answer(|c| &mut c.categories, |r| &r.categories)
    }

    async fn severity_levels(&self) -> Result<SeverityLevelsResponse, ApiError> {
        self.answer(|c| &mut c.severity_levels, |r| &r.severity_levels)
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        self.lock().analyzed.push(request.text.clone());
        self.answer(|c| &mut c.analyze, |r| &r.analyze)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_counts_calls_and_records_texts() {
        let api = StubApi::default();
        api.ping().await.unwrap();
        api.analyze(&AnalyzeRequest {
            text: "late delivery".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(api.calls().ping, 1);
        assert_eq!(api.calls().analyze, 1);
        assert_eq!(api.analyzed_texts(), ["late delivery"]);
    }

    #[tokio::test]
    async fn test_update_changes_later_answers() {
        let api = StubApi::default();
        api.update(|r| r.ping = Err(ApiError::status(500, None)));
        assert_eq!(api.ping().await, Err(ApiError::status(500, None)));
    }
}
