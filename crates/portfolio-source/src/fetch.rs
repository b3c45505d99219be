//! Portfolio fetch
//!
//! Token check, session, account selection, portfolio request, and the
//! mapping from gateway positions to [`Position`]s.

use std::sync::Arc;

use crate::broker::{BrokerConnector, PortfolioPosition, PortfolioResponse, TinkoffConnector};
use crate::config::SourceConfig;
use crate::error::{Result, SourceError};
use crate::model::{MoneyValue, PortfolioSnapshot, Position, money_to_decimal};

/// Fetches one portfolio snapshot per call. Holds no per-request state.
pub struct PortfolioFetcher {
    config: SourceConfig,
    connector: Arc<dyn BrokerConnector>,
}

impl PortfolioFetcher {
    pub fn new(config: SourceConfig, connector: Arc<dyn BrokerConnector>) -> Self {
        Self { config, connector }
    }

    /// Fetcher backed by the Tinkoff REST gateway named in `config`
    pub fn tinkoff(config: SourceConfig) -> Self {
        let connector = Arc::new(TinkoffConnector::new(config.api_url.clone(), config.timeout));
        Self::new(config, connector)
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub async fn fetch(&self) -> Result<PortfolioSnapshot> {
        let token = self
            .config
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(SourceError::MissingToken)?;

        let client = self.connector.connect(token)?;

        let accounts = client.accounts().await?;
        let Some(account) = self.config.account.select(&accounts)? else {
            tracing::info!(
                broker = self.connector.name(),
                accounts = accounts.len(),
                "Token has no open brokerage account"
            );
            return Ok(PortfolioSnapshot::empty());
        };
        tracing::debug!(account_id = %account.id, "Fetching portfolio");

        let portfolio = client.portfolio(&account.id).await?;
        let snapshot = snapshot_from(&account.id, portfolio)?;

        tracing::info!(
            account_id = %account.id,
            positions = snapshot.positions.len(),
            "Portfolio fetched"
        );
        Ok(snapshot)
    }
}

/// Gateway position to domain position; `None` for zero-quantity holdings
pub fn map_position(position: PortfolioPosition) -> Result<Option<Position>> {
    let quantity = position.quantity.as_ref().map_or(0, |q| q.units);
    if quantity == 0 {
        return Ok(None);
    }

    let price = money_to_decimal(position.current_price.as_ref());
    let expected_yield = money_to_decimal(position.expected_yield.as_ref());

    let mapped = Position::new(
        position.figi,
        position.instrument_type,
        quantity,
        price,
        expected_yield,
    )?;
    Ok(Some(match position.ticker.filter(|t| !t.is_empty()) {
        Some(ticker) => mapped.with_ticker(ticker),
        None => mapped,
    }))
}

pub fn snapshot_from(account_id: &str, portfolio: PortfolioResponse) -> Result<PortfolioSnapshot> {
    let mut positions = Vec::with_capacity(portfolio.positions.len());
    for position in portfolio.positions {
        if let Some(mapped) = map_position(position)? {
            positions.push(mapped);
        }
    }

    Ok(PortfolioSnapshot {
        account_id: Some(account_id.to_string()),
        total_value: portfolio
            .total_amount_portfolio
            .as_ref()
            .map(MoneyValue::to_decimal),
        positions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::{Account, MockBroker, MockFailure};
    use crate::config::AccountSelection;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn position(figi: &str, units: i64, price: MoneyValue, yield_: MoneyValue) -> PortfolioPosition {
        PortfolioPosition {
            figi: figi.into(),
            ticker: None,
            instrument_type: "share".into(),
            quantity: Some(MoneyValue::new(units, 0)),
            current_price: Some(price),
            expected_yield: Some(yield_),
        }
    }

    fn fetcher(broker: &MockBroker, token: Option<&str>) -> PortfolioFetcher {
        let config = SourceConfig {
            token: token.map(str::to_string),
            ..Default::default()
        };
        PortfolioFetcher::new(config, Arc::new(broker.clone()))
    }

    #[tokio::test]
    async fn test_missing_token_never_connects() {
        let broker = MockBroker::single_account("acc", None, Vec::new());

        let err = fetcher(&broker, None).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::MissingToken));

        let err = fetcher(&broker, Some("")).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::MissingToken));

        assert_eq!(broker.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_no_accounts_is_empty_snapshot() {
        let broker = MockBroker::new();
        let snapshot = fetcher(&broker, Some("t")).fetch().await.unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.total_value.is_none());
        assert_eq!(broker.connect_count(), 1);
    }

    #[tokio::test]
    async fn test_reference_position() {
        let broker = MockBroker::single_account(
            "acc",
            Some(MoneyValue::new(1505, 250_000_000).with_currency("rub")),
            vec![position(
                "BBG1",
                10,
                MoneyValue::new(100, 500_000_000),
                MoneyValue::new(50, 0),
            )],
        );

        let snapshot = fetcher(&broker, Some("t")).fetch().await.unwrap();
        assert_eq!(snapshot.account_id.as_deref(), Some("acc"));
        assert_eq!(snapshot.total_value, Some(dec!(1505.25)));

        let pos = &snapshot.positions[0];
        assert_eq!(pos.figi, "BBG1");
        assert_eq!(pos.quantity, 10);
        assert_eq!(pos.price, dec!(100.5));
        assert_eq!(pos.position_value, dec!(1005));
        assert_eq!(pos.expected_yield, dec!(50));
    }

    #[tokio::test]
    async fn test_zero_quantity_positions_are_dropped() {
        let broker = MockBroker::single_account(
            "acc",
            None,
            vec![
                position("KEEP1", 1, MoneyValue::new(10, 0), MoneyValue::default()),
                position("DROP", 0, MoneyValue::new(99, 0), MoneyValue::new(5, 0)),
                PortfolioPosition {
                    figi: "NOQTY".into(),
                    ..Default::default()
                },
                position("KEEP2", -2, MoneyValue::new(10, 0), MoneyValue::default()),
            ],
        );

        let snapshot = fetcher(&broker, Some("t")).fetch().await.unwrap();
        let figis: Vec<&str> = snapshot.positions.iter().map(|p| p.figi.as_str()).collect();
        assert_eq!(figis, vec!["KEEP1", "KEEP2"]);
    }

    #[tokio::test]
    async fn test_missing_price_gives_zero_yield() {
        let broker = MockBroker::single_account(
            "acc",
            None,
            vec![PortfolioPosition {
                figi: "BBG9".into(),
                quantity: Some(MoneyValue::new(4, 0)),
                expected_yield: Some(MoneyValue::new(12, 0)),
                ..Default::default()
            }],
        );

        let snapshot = fetcher(&broker, Some("t")).fetch().await.unwrap();
        let pos = &snapshot.positions[0];
        assert_eq!(pos.position_value, Decimal::ZERO);
        assert_eq!(pos.expected_yield_pct, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_only_ineligible_accounts_is_empty_snapshot() {
        let broker = MockBroker::new()
            .with_account(
                Account::new("iis").with_type("ACCOUNT_TYPE_TINKOFF_IIS"),
                PortfolioResponse {
                    positions: vec![position("BBG1", 1, MoneyValue::new(1, 0), MoneyValue::default())],
                    ..Default::default()
                },
            )
            .with_account(
                Account::new("closed").with_status("ACCOUNT_STATUS_CLOSED"),
                PortfolioResponse::default(),
            );

        let snapshot = fetcher(&broker, Some("t")).fetch().await.unwrap();
        assert!(snapshot.is_empty());
        assert!(snapshot.account_id.is_none());
    }

    #[tokio::test]
    async fn test_explicit_account_selection() {
        let broker = MockBroker::new()
            .with_account(Account::new("first"), PortfolioResponse::default())
            .with_account(
                Account::new("second"),
                PortfolioResponse {
                    positions: vec![position("BBG2", 3, MoneyValue::new(1, 0), MoneyValue::default())],
                    ..Default::default()
                },
            );

        let config = SourceConfig {
            token: Some("t".into()),
            account: AccountSelection::ById("second".into()),
            ..Default::default()
        };
        let snapshot = PortfolioFetcher::new(config, Arc::new(broker.clone()))
            .fetch()
            .await
            .unwrap();
        assert_eq!(snapshot.account_id.as_deref(), Some("second"));
        assert_eq!(snapshot.positions.len(), 1);

        let default_pick = fetcher(&broker, Some("t")).fetch().await.unwrap();
        assert_eq!(default_pick.account_id.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_overflowing_position_is_upstream_error() {
        let broker = MockBroker::single_account(
            "acc",
            None,
            vec![position(
                "BBGHUGE",
                1,
                MoneyValue::new(0, 1),
                MoneyValue::new(1_000_000_000_000_000_000, 0),
            )],
        );

        let err = fetcher(&broker, Some("t")).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Api(_)));
        let relay: relay_core::RelayError = err.into();
        assert_eq!(relay.status_code(), 502);
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let broker = MockBroker::new().with_failure(MockFailure::Unauthorized);
        let err = fetcher(&broker, Some("t")).fetch().await.unwrap_err();
        let relay: relay_core::RelayError = err.into();
        assert_eq!(relay.status_code(), 502);
    }

    #[tokio::test]
    async fn test_bad_payload_is_upstream_error() {
        let broker = MockBroker::new().with_failure(MockFailure::BadPayload);
        let err = fetcher(&broker, Some("t")).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Api(_)));

        let relay: relay_core::RelayError = err.into();
        assert_eq!(relay.status_code(), 502);
        assert_eq!(relay.code(), "UPSTREAM_ERROR");
        assert!(!relay.user_message().contains("unexpected payload"));
    }
}
