//! Brokerage Integration
//!
//! A `BrokerConnector` opens an authenticated `BrokerClient` for one token.
//! Sessions live for a single fetch and are dropped afterwards.

mod mock;
mod tinkoff;
pub mod wire;

pub use mock::{MockBroker, MockFailure};
pub use tinkoff::{TinkoffClient, TinkoffConnector};
pub use wire::{Account, PortfolioPosition, PortfolioResponse};

use async_trait::async_trait;

use crate::error::Result;

/// Authenticated brokerage session (Strategy pattern)
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Accounts visible to the token, in upstream order
    async fn accounts(&self) -> Result<Vec<Account>>;

    /// Current portfolio of one account
    async fn portfolio(&self, account_id: &str) -> Result<PortfolioResponse>;
}

/// Factory for brokerage sessions
pub trait BrokerConnector: Send + Sync {
    /// Open a session authenticated with `token`
    fn connect(&self, token: &str) -> Result<Box<dyn BrokerClient>>;

    /// Broker name
    fn name(&self) -> &str;
}
