//! Portfolio Reporters
//!
//! Produce the rendered `/portfolio` report, either by asking the data-source
//! service over HTTP or by fetching from the brokerage in-process.

use std::time::Duration;

use async_trait::async_trait;
use portfolio_source::{PortfolioFetcher, render_report};
use relay_core::RelayError;
use serde::Deserialize;

use crate::error::{BotError, Result};

const REPORT_PATH: &str = "/api/v1/portfolio";

#[async_trait]
pub trait PortfolioReporter: Send + Sync {
    /// Telegram-HTML report text
    async fn report(&self) -> Result<String>;
}

/// Body returned by the data-source service, success or failure
#[derive(Debug, Deserialize)]
struct AgentReply {
    #[serde(default)]
    report: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the data-source service
pub struct HttpReporter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpReporter {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Internal(format!("HTTP client setup failed: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}{REPORT_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PortfolioReporter for HttpReporter {
    async fn report(&self) -> Result<String> {
        let response = self.client.get(&self.endpoint).send().await.map_err(|e| {
            tracing::warn!(endpoint = %self.endpoint, "Agent request failed: {}", e);
            BotError::AgentUnreachable(e.to_string())
        })?;

        let status = response.status();
        let reply: AgentReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), "Unreadable agent response: {}", e);
                return Err(BotError::Agent(format!("unexpected response (HTTP {})", status.as_u16())));
            }
        };

        if let Some(error) = reply.error {
            tracing::warn!(status = status.as_u16(), "Agent returned error: {}", error);
            return Err(BotError::Agent(error));
        }
        reply.report.ok_or(BotError::NoReport)
    }
}

/// Fetches and renders the report inside the bot process
pub struct InProcessReporter {
    fetcher: PortfolioFetcher,
}

impl InProcessReporter {
    pub fn new(fetcher: PortfolioFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl PortfolioReporter for InProcessReporter {
    async fn report(&self) -> Result<String> {
        let snapshot = self.fetcher.fetch().await.map_err(|e| {
            tracing::warn!("In-process portfolio fetch failed: {}", e);
            BotError::from(e)
        })?;
        Ok(render_report(&snapshot))
    }
}
