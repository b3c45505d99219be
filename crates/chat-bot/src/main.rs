//! Telegram chat bot HTTP server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use portfolio_source::PortfolioFetcher;
use relay_core::{Assistant, AssistantConfig};
use relay_runtime::OpenRouterProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chat_bot::{
    AppState, BotConfig, ChatBot, HttpReporter, InProcessReporter, PortfolioMode,
    PortfolioReporter, TelegramTransport, app_router,
};

const AGENT_TIMEOUT: Duration = Duration::from_secs(30);

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
    let config = BotConfig::from_env().context("chat-bot configuration")?;

    // LLM assistant
    let assistant_config = AssistantConfig {
        generation: config.openrouter.generation_options(),
        ..Default::default()
    };
    let provider = OpenRouterProvider::from_config(config.openrouter.clone())?;
    tracing::info!("✓ OpenRouter model: {}", config.openrouter.model);
    let assistant = Assistant::new(Arc::new(provider), assistant_config);

    // Portfolio reports
    let reporter: Arc<dyn PortfolioReporter> = match &config.portfolio {
        PortfolioMode::Http { base_url } => {
            let reporter = HttpReporter::new(base_url, AGENT_TIMEOUT)?;
            tracing::info!("✓ Portfolio reports from {}", reporter.endpoint());
            Arc::new(reporter)
        }
        PortfolioMode::InProcess => {
            if config.source.token.is_none() {
                tracing::warn!("⚠ TINKOFF_API_TOKEN not set - /portfolio will report an error");
            }
            tracing::info!("✓ Portfolio reports fetched in-process");
            Arc::new(InProcessReporter::new(PortfolioFetcher::tinkoff(
                config.source.clone(),
            )))
        }
    };

    let webhook_url = config.webhook_url();
    if webhook_url.is_none() {
        tracing::warn!("⚠ RENDER_EXTERNAL_HOSTNAME not set - /setwebhook/ is disabled");
    }

    let transport = Arc::new(TelegramTransport::new(config.telegram_token.clone()));
    let bot = ChatBot::new(transport, assistant, reporter);
    let state = AppState::new(bot, &config.telegram_token, webhook_url);
    let app = app_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 chat-bot running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /             - Liveness");
    tracing::info!("  GET  /setwebhook/  - Register Telegram webhook");
    tracing::info!("  POST /<token>      - Telegram webhook receiver");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
