//! Unified error types for saarthi-dash.
//!
//! Two layers live here. [`ApiError`] is the per-request taxonomy that every
//! dashboard component catches at its own boundary. [`DashboardError`] covers
//! everything around the components (configuration, IO, terminal) and carries
//! context chains for the binary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for saarthi-dash operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DashboardError {
    /// Errors talking to the classification service
    #[error("API request failed: {context}")]
    Api {
        context: String,
        #[source]
        source: ApiError,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Terminal setup or drawing errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failure of a single request against the classification service.
///
/// The variants map one-to-one onto how a component surfaces the failure:
/// transport failures mean the service is unreachable, status failures carry
/// the server's own explanation when it sent one, and decode failures mean
/// the payload was not the JSON shape we expected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, reset...)
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("server returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    /// The body could not be decoded
    #[error("Invalid response format: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self::Status { status, detail }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Whether the service could not be reached at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Server-provided detail for status failures.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref().filter(|d| !d.is_empty()),
            _ => None,
        }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for saarthi-dash operations
pub type Result<T> = std::result::Result<T, DashboardError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DashboardError {
    /// Create an API error with context
    pub fn api(context: impl Into<String>, source: ApiError) -> Self {
        Self::Api {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a terminal error
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<ApiError> for DashboardError {
    fn from(err: ApiError) -> Self {
        Self::api("", err)
    }
}

impl From<crate::config::ConfigFileError> for DashboardError {
    fn from(err: crate::config::ConfigFileError) -> Self {
        Self::Config(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context chains outward: the newest context comes first, separated from
/// the existing context by `": "`.
///
/// ```ignore
/// use saarthi_dash::error::ErrorContext;
///
/// let (config, _) = load_config_file(path).context("loading dashboard config")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DashboardError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: DashboardError, new_ctx: &str) -> DashboardError {
    match err {
        DashboardError::Api {
            context: existing,
            source,
        } => DashboardError::Api {
            context: chain_context(new_ctx, &existing),
            source,
        },
        DashboardError::Io {
            path,
            message,
            source,
        } => DashboardError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DashboardError::Terminal(msg) => DashboardError::Terminal(chain_context(new_ctx, &msg)),
        DashboardError::Config(msg) => DashboardError::Config(chain_context(new_ctx, &msg)),
        DashboardError::Validation(msg) => {
            DashboardError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
