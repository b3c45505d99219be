//! Portfolio data-source HTTP server

use portfolio_source::PortfolioFetcher;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use source_server::{AppState, ServerConfig, app_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();
    let config = ServerConfig::from_env();

    if config.source.token.is_some() {
        tracing::info!("✓ Brokerage token configured");
    } else {
        tracing::warn!("⚠ TINKOFF_API_TOKEN not set - portfolio routes will return 500");
    }
    tracing::info!("  Gateway: {}", config.source.api_url);

    let addr = config.bind_addr();
    let state = AppState::new(PortfolioFetcher::tinkoff(config.source));
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 source-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                  - Liveness");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /portfolio         - Portfolio snapshot (JSON)");
    tracing::info!("  GET  /portfolio/csv     - Portfolio snapshot (CSV)");
    tracing::info!("  GET  /api/v1/portfolio  - Rendered chat report");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
