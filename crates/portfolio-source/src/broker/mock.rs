//! Mock Broker
//!
//! In-memory brokerage for tests and local demos. Counts session opens so
//! callers can assert that no connection was attempted.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::wire::{Account, PortfolioPosition, PortfolioResponse};
use super::{BrokerClient, BrokerConnector};
use crate::error::{Result, SourceError};
use crate::model::MoneyValue;

/// Failure the mock should simulate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockFailure {
    /// Token rejected with HTTP 401
    Unauthorized,
    /// Gateway answered with an unusable payload
    BadPayload,
}

#[derive(Default)]
struct MockState {
    accounts: Vec<Account>,
    portfolios: HashMap<String, PortfolioResponse>,
    failure: Option<MockFailure>,
    connects: AtomicUsize,
}

/// Mock brokerage with static accounts and portfolios
#[derive(Clone, Default)]
pub struct MockBroker {
    state: Arc<MockState>,
}

impl MockBroker {
    /// Broker with no accounts
    pub fn new() -> Self {
        Self::default()
    }

    /// Broker with one account holding `positions`
    pub fn single_account(
        account_id: &str,
        total: Option<MoneyValue>,
        positions: Vec<PortfolioPosition>,
    ) -> Self {
        Self::new().with_account(
            Account::new(account_id),
            PortfolioResponse {
                account_id: Some(account_id.to_string()),
                total_amount_portfolio: total,
                positions,
            },
        )
    }

    pub fn with_account(self, account: Account, portfolio: PortfolioResponse) -> Self {
        let mut state = Self::take_state(self);
        state.portfolios.insert(account.id.clone(), portfolio);
        state.accounts.push(account);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn with_failure(self, failure: MockFailure) -> Self {
        let mut state = Self::take_state(self);
        state.failure = Some(failure);
        Self {
            state: Arc::new(state),
        }
    }

    /// Number of sessions opened so far
    pub fn connect_count(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    fn take_state(self) -> MockState {
        match Arc::try_unwrap(self.state) {
            Ok(state) => state,
            Err(shared) => MockState {
                accounts: shared.accounts.clone(),
                portfolios: shared.portfolios.clone(),
                failure: shared.failure,
                connects: AtomicUsize::new(shared.connects.load(Ordering::SeqCst)),
            },
        }
    }

    fn check_failure(&self) -> Result<()> {
        match self.state.failure {
            Some(MockFailure::Unauthorized) => Err(SourceError::Status {
                status: 401,
                message: "Authentication token is missing or invalid".into(),
            }),
            Some(MockFailure::BadPayload) => Err(SourceError::Api("unexpected payload".into())),
            None => Ok(()),
        }
    }
}

impl BrokerConnector for MockBroker {
    fn connect(&self, _token: &str) -> Result<Box<dyn BrokerClient>> {
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.clone()))
    }

    fn name(&self) -> &str {
        "MockBroker"
    }
}

#[async_trait]
impl BrokerClient for MockBroker {
    async fn accounts(&self) -> Result<Vec<Account>> {
        self.check_failure()?;
        Ok(self.state.accounts.clone())
    }

    async fn portfolio(&self, account_id: &str) -> Result<PortfolioResponse> {
        self.check_failure()?;
        self.state
            .portfolios
            .get(account_id)
            .cloned()
            .ok_or_else(|| SourceError::Status {
                status: 404,
                message: format!("account {account_id} not found"),
            })
    }
}
