//! Error Types for Portfolio Source

use relay_core::RelayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Service name shown in upstream errors
pub const BROKER_SERVICE: &str = "Tinkoff Invest";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("TINKOFF_API_TOKEN is not set")]
    MissingToken,

    #[error("API token contains characters not allowed in a header")]
    InvalidToken,

    #[error("Account {0} not found among the token's accounts")]
    AccountNotFound(String),

    #[error("Broker API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Broker API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SourceError> for RelayError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::MissingToken
            | SourceError::InvalidToken
            | SourceError::AccountNotFound(_) => RelayError::Config(err.to_string()),
            SourceError::Status { status, .. } => RelayError::UpstreamStatus {
                service: BROKER_SERVICE,
                status,
            },
            SourceError::Api(message) => RelayError::upstream(BROKER_SERVICE, message),
            SourceError::Network(e) if e.is_connect() || e.is_timeout() => {
                RelayError::unreachable(BROKER_SERVICE, e.to_string())
            }
            SourceError::Network(e) => RelayError::upstream(BROKER_SERVICE, e.to_string()),
            SourceError::Csv(e) => RelayError::Internal(e.to_string()),
            SourceError::Serialization(e) => RelayError::Json(e),
            SourceError::Internal(message) => RelayError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_mapping() {
        let err: RelayError = SourceError::MissingToken.into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.code(), "CONFIG_ERROR");

        let err: RelayError = SourceError::Status {
            status: 401,
            message: "Authentication token is missing or invalid".into(),
        }
        .into();
        assert_eq!(err.status_code(), 502);
        assert!(!err.user_message().contains("Authentication token"));

        let err: RelayError = SourceError::Internal("oops".into()).into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
