//! Portfolio source configuration

use std::time::Duration;

use crate::broker::Account;
use crate::error::{Result, SourceError};

pub const DEFAULT_API_URL: &str = "https://invest-public-api.tinkoff.ru/rest";

/// Which account a fetch reads
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AccountSelection {
    /// First open regular brokerage account, in upstream order
    #[default]
    First,
    /// A specific account id (`TINKOFF_ACCOUNT_ID`), whatever its type
    ById(String),
}

impl AccountSelection {
    /// Pick the account; `None` when the token has no eligible account
    pub fn select<'a>(&self, accounts: &'a [Account]) -> Result<Option<&'a Account>> {
        if accounts.is_empty() {
            return Ok(None);
        }
        match self {
            AccountSelection::First => Ok(accounts.iter().find(|a| a.is_open_brokerage())),
            AccountSelection::ById(id) => accounts
                .iter()
                .find(|a| &a.id == id)
                .map(Some)
                .ok_or_else(|| SourceError::AccountNotFound(id.clone())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// Brokerage API token; checked at fetch time, not at start-up
    pub token: Option<String>,

    /// REST gateway base URL
    pub api_url: String,

    pub account: AccountSelection,

    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: DEFAULT_API_URL.into(),
            account: AccountSelection::First,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SourceConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Default::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            token: non_empty("TINKOFF_API_TOKEN"),
            api_url: non_empty("TINKOFF_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            account: non_empty("TINKOFF_ACCOUNT_ID").map_or(AccountSelection::First, |id| {
                AccountSelection::ById(id.trim().to_string())
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars = HashMap::from([
            ("TINKOFF_API_TOKEN", "t.abc"),
            ("TINKOFF_ACCOUNT_ID", " 2000 "),
            ("TINKOFF_API_URL", ""),
        ]);
        let config = SourceConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()));
        assert_eq!(config.token.as_deref(), Some("t.abc"));
        assert_eq!(config.account, AccountSelection::ById("2000".into()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_blank_token_is_absent() {
        let config = SourceConfig::from_lookup(|k| (k == "TINKOFF_API_TOKEN").then(|| "  ".into()));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_selection() {
        let accounts = vec![Account::new("a"), Account::new("b")];
        let first = AccountSelection::First.select(&accounts).unwrap();
        assert_eq!(first.map(|a| a.id.as_str()), Some("a"));

        let by_id = AccountSelection::ById("b".into()).select(&accounts).unwrap();
        assert_eq!(by_id.map(|a| a.id.as_str()), Some("b"));

        assert!(AccountSelection::ById("zzz".into()).select(&accounts).is_err());
        assert!(AccountSelection::ById("a".into()).select(&[]).unwrap().is_none());
    }

    #[test]
    fn test_first_skips_other_account_kinds() {
        let accounts = vec![
            Account::new("iis").with_type("ACCOUNT_TYPE_TINKOFF_IIS"),
            Account::new("box").with_type("ACCOUNT_TYPE_INVEST_BOX"),
            Account::new("closed").with_status("ACCOUNT_STATUS_CLOSED"),
            Account::new("broker"),
            Account::new("second-broker"),
        ];
        let first = AccountSelection::First.select(&accounts).unwrap();
        assert_eq!(first.map(|a| a.id.as_str()), Some("broker"));

        let by_id = AccountSelection::ById("iis".into()).select(&accounts).unwrap();
        assert_eq!(by_id.map(|a| a.id.as_str()), Some("iis"));

        let ineligible = &accounts[..3];
        assert!(AccountSelection::First.select(ineligible).unwrap().is_none());
    }
}
