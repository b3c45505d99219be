//! Application State

use std::sync::Arc;

use portfolio_source::PortfolioFetcher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only; every request opens its own brokerage session
    pub fetcher: Arc<PortfolioFetcher>,
}

impl AppState {
    pub fn new(fetcher: PortfolioFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}
