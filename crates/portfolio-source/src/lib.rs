//! # portfolio-source
//!
//! Brokerage portfolio snapshots for portfolio-relay.
//!
//! One fetch opens a session with the brokerage, picks an account, reads its
//! portfolio and maps the non-empty positions into a [`PortfolioSnapshot`].
//! The snapshot is then rendered for whoever asked:
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────────┐
//! │ BrokerClient │ -> │ PortfolioFetcher │ -> │ render_json  (HTTP)  │
//! │  (Tinkoff)   │    │  token, account  │    │ render_csv   (HTTP)  │
//! └──────────────┘    └──────────────────┘    │ render_report (chat) │
//!                                             └──────────────────────┘
//! ```
//!
//! Nothing is cached between fetches; every request reads fresh data.

pub mod broker;
pub mod config;
pub mod error;
pub mod fetch;
pub mod model;
pub mod render;

pub use config::{AccountSelection, SourceConfig};
pub use error::{Result, SourceError};
pub use fetch::PortfolioFetcher;
pub use model::{MoneyValue, PortfolioSnapshot, Position};
pub use render::{
    EMPTY_PORTFOLIO_MESSAGE, PortfolioReport, PositionRow, render_csv, render_json, render_report,
};
