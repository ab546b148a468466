//! HTTP client for the classification service.

use super::traits::DashboardApi;
use super::types::{
    AnalyzeRequest, AnalyzeResponse, CategoriesResponse, ClusteringResponse, ErrorBody,
    MetricsResponse, SeverityLevelsResponse, TrendsResponse,
};
use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the service, without trailing slash
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: super::base_url::DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// `reqwest`-backed implementation of [`DashboardApi`].
#[derive(Debug, Clone)]
pub struct HttpDashboardClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDashboardClient {
    pub fn new(config: &ApiClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        decode_response(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        decode_response(response).await
    }
}

/// Turn a response into a typed body or a status error carrying the
/// server's detail.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::transport(e.to_string()))?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message());
        return Err(ApiError::status(status.as_u16(), detail));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::decode(e.to_string()))
}

#[async_trait]
impl DashboardApi for HttpDashboardClient {
    async fn ping(&self) -> Result<(), ApiError> {
        let response = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::status(status.as_u16(), None))
        }
    }

    async fn metrics(&self) -> Result<MetricsResponse, ApiError> {
        self.get_json("/api/metrics").await
    }

    async fn trends(&self) -> Result<TrendsResponse, ApiError> {
        self.get_json("/api/trends").await
    }

    async fn clustering(&self) -> Result<ClusteringResponse, ApiError> {
        self.get_json("/api/clustering-viz").await
    }

    async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        self.get_json("/api/categories").await
    }

    async fn severity_levels(&self) -> Result<SeverityLevelsResponse, ApiError> {
        self.get_json("/api/severity-levels").await
    }

    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ApiError> {
        self.post_json("/api/analyze", request).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer a single request with a canned response and hand back the
    /// raw request text.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn client_for(base_url: String) -> HttpDashboardClient {
        HttpDashboardClient::new(&ApiClientConfig {
            base_url,
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"category":{"accuracy":0.91,"f1_weighted":0.89},"clustering":{"silhouette":0.1}}"#,
        )
        .await;
        let metrics = client_for(base_url).metrics().await.unwrap();
        assert_eq!(metrics.category.unwrap().accuracy, Some(0.91));
        assert_eq!(metrics.severity, None);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/metrics "), "{request}");
    }

    #[tokio::test]
    async fn test_rejected_analysis_keeps_server_detail() {
        let (base_url, server) = serve_once(
            "422 Unprocessable Entity",
            r#"{"detail":"text too short"}"#,
        )
        .await;
        let err = client_for(base_url)
            .analyze(&AnalyzeRequest::new("ok"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::status(422, Some("text too short".to_string())));
        assert_eq!(err.detail(), Some("text too short"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/analyze "), "{request}");
        assert!(request.ends_with(r#"{"text":"ok"}"#), "{request}");
    }

    #[tokio::test]
    async fn test_server_error_with_plain_body_has_no_detail() {
        let (base_url, server) =
            serve_once("500 Internal Server Error", "Internal Server Error").await;
        let err = client_for(base_url).trends().await.unwrap_err();
        assert_eq!(err, ApiError::status(500, None));
        assert!(!err.is_transport());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let (base_url, server) = serve_once("200 OK", r#"{"points":[{"x":0.1"#).await;
        let err = client_for(base_url).clustering().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)), "{err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_ping_reports_status_failures() {
        let (base_url, server) = serve_once("503 Service Unavailable", "").await;
        let err = client_for(base_url).ping().await.unwrap_err();
        assert_eq!(err, ApiError::status(503, None));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET / "), "{request}");
    }

    #[tokio::test]
    async fn test_ping_succeeds_on_ok() {
        let (base_url, server) = serve_once("200 OK", r#"{"status":"ok"}"#).await;
        assert!(client_for(base_url).ping().await.is_ok());
        server.await.unwrap();
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let client = HttpDashboardClient::new(&ApiClientConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/api/trends"), "http://localhost:8000/api/trends");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on loopback is not served in test environments.
        let client = HttpDashboardClient::new(&ApiClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Some(Duration::from_secs(2)),
        })
        .unwrap();
        let err = client.ping().await.unwrap_err();
        assert!(err.is_transport(), "expected transport error, got {err:?}");
    }
}
