//! Portfolio data-source service
//!
//! Axum routes over [`portfolio_source::PortfolioFetcher`]. Each request opens
//! a fresh brokerage session and renders the snapshot as JSON, CSV or a chat
//! report.

pub mod config;
pub mod handlers;
pub mod state;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use state::AppState;

use crate::handlers::{health_check, portfolio_csv, portfolio_json, portfolio_report, root};

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/portfolio", get(portfolio_json))
        .route("/portfolio/csv", get(portfolio_csv))
        .route("/api/v1/portfolio", get(portfolio_report))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
