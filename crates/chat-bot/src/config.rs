//! Bot configuration

use std::net::{Ipv4Addr, SocketAddr};

use portfolio_source::SourceConfig;
use relay_core::{RelayError, Result};
use relay_runtime::OpenRouterConfig;

pub const DEFAULT_PORT: u16 = 10000;

/// Where `/portfolio` reports come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortfolioMode {
    /// `GET {base}/api/v1/portfolio` on the data-source service
    Http { base_url: String },
    /// Fetch from the brokerage inside this process
    InProcess,
}

#[derive(Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub openrouter: OpenRouterConfig,
    /// Public hostname used to build the webhook URL
    pub external_hostname: Option<String>,
    pub portfolio: PortfolioMode,
    /// Brokerage settings for [`PortfolioMode::InProcess`]
    pub source: SourceConfig,
    pub port: u16,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Fails when `TELEGRAM_TOKEN` or `OPENROUTER_API_KEY` is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram_token = non_empty("TELEGRAM_TOKEN")
            .ok_or_else(|| RelayError::Config("TELEGRAM_TOKEN is not set".into()))?;
        let openrouter = OpenRouterConfig::from_lookup(&lookup)?;

        let portfolio = match non_empty("AGENT_SOURCE_URL") {
            Some(url) => PortfolioMode::Http {
                base_url: url.trim_end_matches('/').to_string(),
            },
            None => PortfolioMode::InProcess,
        };

        let port = non_empty("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            telegram_token,
            openrouter,
            external_hostname: non_empty("RENDER_EXTERNAL_HOSTNAME"),
            portfolio,
            source: SourceConfig::from_lookup(&lookup),
            port,
        })
    }

    /// `https://<hostname>/<token>`, when a public hostname is configured
    pub fn webhook_url(&self) -> Option<String> {
        self.external_hostname
            .as_deref()
            .map(|host| format!("https://{}/{}", host.trim_end_matches('/'), self.telegram_token))
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
