//! Tinkoff Invest REST gateway payloads.
//!
//! Only the fields the relay reads are modelled; everything else is ignored.
//! Field names follow the gateway's camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::model::MoneyValue;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

/// Regular Tinkoff brokerage account (not IIS or invest-box)
pub const ACCOUNT_TYPE_TINKOFF: &str = "ACCOUNT_TYPE_TINKOFF";

pub const ACCOUNT_STATUS_OPEN: &str = "ACCOUNT_STATUS_OPEN";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,

    #[serde(default, rename = "type")]
    pub account_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            account_type: Some(ACCOUNT_TYPE_TINKOFF.into()),
            name: None,
            status: Some(ACCOUNT_STATUS_OPEN.into()),
        }
    }

    pub fn with_type(mut self, account_type: impl Into<String>) -> Self {
        self.account_type = Some(account_type.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Open regular brokerage account
    pub fn is_open_brokerage(&self) -> bool {
        self.account_type.as_deref() == Some(ACCOUNT_TYPE_TINKOFF)
            && self.status.as_deref() == Some(ACCOUNT_STATUS_OPEN)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPortfolioRequest<'a> {
    pub account_id: &'a str,
    pub currency: &'a str,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub total_amount_portfolio: Option<MoneyValue>,

    #[serde(default)]
    pub positions: Vec<PortfolioPosition>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPosition {
    pub figi: String,

    #[serde(default)]
    pub ticker: Option<String>,

    #[serde(default)]
    pub instrument_type: String,

    #[serde(default)]
    pub quantity: Option<MoneyValue>,

    #[serde(default)]
    pub current_price: Option<MoneyValue>,

    #[serde(default)]
    pub expected_yield: Option<MoneyValue>,
}

/// Error body returned by the gateway on non-2xx responses
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl ApiErrorBody {
    pub fn summary(&self) -> String {
        match (&self.message, &self.description) {
            (Some(m), Some(d)) => format!("{m} ({d})"),
            (Some(m), None) => m.clone(),
            (None, Some(d)) => d.clone(),
            (None, None) => format!("code {}", self.code.unwrap_or_default()),
        }
    }
}
