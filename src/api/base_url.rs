//! Base URL resolution for the classification service.
//!
//! An explicit URL always wins. Otherwise the URL is derived from the origin
//! the dashboard was served from, with a local-development default for hosts
//! that are clearly a developer machine running the frontend on another port.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default service URL for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Port the service listens on during local development.
const LOCAL_SERVICE_PORT: u16 = 8000;

/// Origin (scheme, host, port) the dashboard is served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageOrigin {
    /// `http` or `https`
    pub scheme: String,
    /// Host name without port
    pub host: String,
    /// Explicit port, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl PageOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Parse an origin such as `http://localhost:5500`.
    ///
    /// Returns `None` when the string is not an absolute URL.
    #[must_use]
    pub fn parse(origin: &str) -> Option<Self> {
        let url = reqwest::Url::parse(origin).ok()?;
        let host = url.host_str().unwrap_or_default().to_string();
        Some(Self {
            scheme: url.scheme().to_string(),
            host,
            port: url.port(),
        })
    }

    fn is_local(&self) -> bool {
        matches!(self.host.as_str(), "" | "localhost" | "127.0.0.1")
    }

    fn is_default_port(&self) -> bool {
        matches!(self.port, None | Some(80 | 443))
    }
}

/// Resolve the service base URL.
///
/// Order: explicit URL, then the origin heuristics, then [`DEFAULT_BASE_URL`].
/// Trailing slashes are stripped so endpoint paths can be appended directly.
#[must_use]
pub fn resolve_base_url(explicit: Option<&str>, origin: Option<&PageOrigin>) -> String {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }

    let Some(origin) = origin else {
        return DEFAULT_BASE_URL.to_string();
    };

    if origin.is_local() && (origin.is_default_port() || origin.port != Some(LOCAL_SERVICE_PORT))
    {
        return DEFAULT_BASE_URL.to_string();
    }

    match origin.port {
        Some(port) if !origin.is_default_port() => {
            format!("{}://{}:{port}", origin.scheme, origin.host)
        }
        _ => format!("{}://{}", origin.scheme, origin.host),
    }
}
