//! Server configuration

use std::net::{Ipv4Addr, SocketAddr};

use portfolio_source::SourceConfig;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub source: SourceConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable `PORT` values fall back to the default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            source: SourceConfig::from_lookup(lookup),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.source.token.is_none());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_port_and_token() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("9100".into()),
            "TINKOFF_API_TOKEN" => Some("t.secret".into()),
            _ => None,
        });
        assert_eq!(config.port, 9100);
        assert_eq!(config.source.token.as_deref(), Some("t.secret"));

        let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".into()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
