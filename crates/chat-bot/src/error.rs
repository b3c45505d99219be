//! Error Types for the Chat Bot

use relay_core::RelayError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

#[derive(Error, Debug)]
pub enum BotError {
    /// Data-source service could not be contacted
    #[error("Could not reach agent: {0}")]
    AgentUnreachable(String),

    /// Data-source service answered with an `{"error"}` body
    #[error("Agent error: {0}")]
    Agent(String),

    /// Data-source service answered without a report
    #[error("Agent returned no report")]
    NoReport,

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Telegram(err.to_string())
    }
}

impl From<portfolio_source::SourceError> for BotError {
    fn from(err: portfolio_source::SourceError) -> Self {
        BotError::Relay(err.into())
    }
}

impl BotError {
    /// Text safe to send back into the chat
    pub fn user_message(&self) -> String {
        match self {
            BotError::AgentUnreachable(_) => {
                "⚠️ Could not reach agent. Please try again later.".into()
            }
            // The data-source already returns a public-safe message here.
            BotError::Agent(message) => format!("⚠️ Agent error: {message}"),
            BotError::NoReport => "⚠️ Agent returned no report.".into(),
            BotError::Telegram(_) => "⚠️ Telegram request failed.".into(),
            BotError::Relay(err) => format!("⚠️ {}", err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = BotError::AgentUnreachable("tcp connect error: 127.0.0.1:1".into());
        assert!(err.user_message().contains("Could not reach agent"));
        assert!(!err.user_message().contains("127.0.0.1"));

        assert_eq!(
            BotError::Agent("Tinkoff Invest error (HTTP 401).".into()).user_message(),
            "⚠️ Agent error: Tinkoff Invest error (HTTP 401)."
        );
        assert!(BotError::NoReport.user_message().contains("no report"));
    }

    #[test]
    fn test_source_errors_keep_public_text() {
        let err = BotError::from(portfolio_source::SourceError::MissingToken);
        assert!(err.user_message().contains("TINKOFF_API_TOKEN"));

        let err = BotError::from(portfolio_source::SourceError::Api("trace-id 77".into()));
        assert!(!err.user_message().contains("trace-id"));
    }
}
