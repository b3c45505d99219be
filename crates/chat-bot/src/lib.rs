//! # chat-bot
//!
//! Telegram webhook service. Free text is relayed to the LLM assistant with a
//! fixed system instruction; `/portfolio` replies with the brokerage report,
//! fetched from the data-source service or in-process.
//!
//! ```text
//! Telegram ──POST /{token}──> receive_update ──> ChatBot
//!                                                 ├─ /start, /help  -> greeting
//!                                                 ├─ /portfolio     -> PortfolioReporter
//!                                                 └─ anything else  -> Assistant (OpenRouter)
//! ```

pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod reporter;
pub mod state;
pub mod transport;
pub mod update;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use bot::ChatBot;
pub use config::{BotConfig, PortfolioMode};
pub use error::{BotError, Result};
pub use reporter::{HttpReporter, InProcessReporter, PortfolioReporter};
pub use state::AppState;
pub use transport::{ChatTransport, ReplyTarget, TelegramTransport, TextFormat};

use crate::handlers::{receive_update, root, set_webhook};

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/setwebhook/", get(set_webhook))
        .route("/{secret}", post(receive_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
