//! HTTP Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::update::Update;

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub webhook_url: String,
    pub result: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WebhookError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

pub async fn root() -> &'static str {
    "Telegram bot is running"
}

/// Register `https://<hostname>/<token>` with Telegram
pub async fn set_webhook(
    State(state): State<AppState>,
) -> Result<Json<WebhookResponse>, (StatusCode, Json<WebhookError>)> {
    let Some(url) = state.webhook_url.as_deref() else {
        tracing::error!("RENDER_EXTERNAL_HOSTNAME is not set; cannot build webhook URL");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(WebhookError {
                error: "RENDER_EXTERNAL_HOSTNAME is not set".into(),
                webhook_url: None,
            }),
        ));
    };

    match state.bot.transport().set_webhook(url).await {
        Ok(()) => {
            tracing::info!("✓ Webhook registered");
            Ok(Json(WebhookResponse {
                webhook_url: url.to_string(),
                result: true,
            }))
        }
        Err(e) => {
            tracing::error!("Webhook registration failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookError {
                    error: e.to_string(),
                    webhook_url: Some(url.to_string()),
                }),
            ))
        }
    }
}

/// Telegram webhook receiver. Always 200 once the path secret matches so
/// Telegram does not redeliver the update.
pub async fn receive_update(
    State(state): State<AppState>,
    Path(secret): Path<String>,
    body: Bytes,
) -> StatusCode {
    if secret != *state.telegram_token {
        tracing::warn!("Webhook call with unknown path secret");
        return StatusCode::NOT_FOUND;
    }

    match serde_json::from_slice::<Update>(&body) {
        Ok(update) => state.bot.handle_update(update).await,
        Err(e) => tracing::warn!("Ignoring unparseable update: {}", e),
    }
    StatusCode::OK
}
