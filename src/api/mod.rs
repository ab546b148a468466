//! Client side of the classification service.
//!
//! - [`DashboardApi`] is the port every dashboard component fetches through.
//! - [`HttpDashboardClient`] implements it over HTTP with `reqwest`.
//! - [`resolve_base_url`] decides where requests go.
//! - [`StubApi`] answers from memory, for tests.
//! - [`types`] holds the lenient wire types of each endpoint.

pub mod base_url;
mod client;
pub mod stub;
mod traits;
pub mod types;

pub use base_url::{resolve_base_url, PageOrigin, DEFAULT_BASE_URL};
pub use client::{ApiClientConfig, HttpDashboardClient};
pub use stub::{CallCounts, StubApi, StubResponses};
pub use traits::DashboardApi;
pub use types::{
    AnalyzeRequest, AnalyzeResponse, AxisMetricsPayload, CategoriesResponse, CategoryCount,
    ClusterPointPayload, ClusteringResponse, MetricsResponse, PointId, SeverityCount,
    SeverityLevelsResponse, TrendsResponse,
};
