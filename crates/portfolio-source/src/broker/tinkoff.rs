//! Tinkoff Invest REST client
//!
//! Talks to the gRPC-gateway REST surface of the Tinkoff Invest API:
//! every method is `POST {base}/tinkoff.public.invest.api.contract.v1.<Service>/<Method>`
//! with a JSON body and a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};

use super::wire::{
    Account, ApiErrorBody, GetAccountsResponse, GetPortfolioRequest, PortfolioResponse,
};
use super::{BrokerClient, BrokerConnector};
use crate::error::{Result, SourceError};

const CONTRACT_PREFIX: &str = "tinkoff.public.invest.api.contract.v1";

/// Opens Tinkoff sessions against a configurable gateway
#[derive(Clone, Debug)]
pub struct TinkoffConnector {
    base_url: String,
    timeout: Duration,
}

impl TinkoffConnector {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl BrokerConnector for TinkoffConnector {
    fn connect(&self, token: &str) -> Result<Box<dyn BrokerClient>> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| SourceError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;

        Ok(Box::new(TinkoffClient {
            http,
            base_url: self.base_url.clone(),
        }))
    }

    fn name(&self) -> &str {
        "Tinkoff"
    }
}

/// One authenticated Tinkoff session
pub struct TinkoffClient {
    http: reqwest::Client,
    base_url: String,
}

impl TinkoffClient {
    fn method_url(&self, method: &str) -> String {
        format!("{}/{CONTRACT_PREFIX}.{method}", self.base_url)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.http.post(self.method_url(method)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ApiErrorBody>()
                .await
                .map(|b| b.summary())
                .unwrap_or_else(|_| status.to_string());
            tracing::warn!(method, status = status.as_u16(), %detail, "Tinkoff API call failed");
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: detail,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| SourceError::Api(format!("unexpected {method} payload: {e}")))
    }
}

#[async_trait]
impl BrokerClient for TinkoffClient {
    async fn accounts(&self) -> Result<Vec<Account>> {
        let response: GetAccountsResponse = self
            .call("UsersService/GetAccounts", &serde_json::json!({}))
            .await?;
        Ok(response.accounts)
    }

    async fn portfolio(&self, account_id: &str) -> Result<PortfolioResponse> {
        let request = GetPortfolioRequest {
            account_id,
            currency: "RUB",
        };
        self.call("OperationsService/GetPortfolio", &request).await
    }
}
