//! Error Types

use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;

/// Relay error taxonomy.
///
/// Every failure that reaches a request handler is one of these kinds. The
/// handler maps it to a transport status with [`RelayError::status_code`] and
/// shows the caller only [`RelayError::user_message`].
#[derive(Error, Debug)]
pub enum RelayError {
    /// A required secret or setting is absent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream call failed after a response or with an unusable response
    #[error("{service} error: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    /// Upstream answered with a non-success HTTP status
    #[error("{service} returned HTTP {status}")]
    UpstreamStatus { service: &'static str, status: u16 },

    /// Upstream could not be contacted (connect failure or timeout)
    #[error("{service} unreachable: {message}")]
    Unreachable {
        service: &'static str,
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anything unanticipated
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn upstream(service: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    pub fn unreachable(service: &'static str, message: impl Into<String>) -> Self {
        Self::Unreachable {
            service,
            message: message.into(),
        }
    }

    /// HTTP status the error maps to at a handler boundary
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Upstream { .. }
            | RelayError::UpstreamStatus { .. }
            | RelayError::Unreachable { .. } => 502,
            RelayError::Config(_) | RelayError::Json(_) | RelayError::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Config(_) => "CONFIG_ERROR",
            RelayError::Upstream { .. } | RelayError::UpstreamStatus { .. } => "UPSTREAM_ERROR",
            RelayError::Unreachable { .. } => "UPSTREAM_UNREACHABLE",
            RelayError::Json(_) | RelayError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if error came from a remote service
    pub fn is_upstream(&self) -> bool {
        self.status_code() == 502
    }

    /// Convert to a public-safe message. Upstream text never appears here.
    pub fn user_message(&self) -> String {
        match self {
            RelayError::Config(msg) => format!("Service is not configured: {msg}"),
            RelayError::Upstream { service, .. } => {
                format!("{service} could not complete the request.")
            }
            RelayError::UpstreamStatus { service, status } => {
                format!("{service} error (HTTP {status}).")
            }
            RelayError::Unreachable { service, .. } => {
                format!("{service} is currently unreachable. Please try again later.")
            }
            RelayError::Json(_) | RelayError::Internal(_) => "An unexpected error occurred.".into(),
        }
    }
}
