//! HTTP Handlers

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use portfolio_source::{
    PortfolioReport, PortfolioSnapshot, SourceError, render_csv, render_report,
};
use relay_core::RelayError;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of `GET /api/v1/portfolio`
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: SourceError) -> ApiError {
    let err = RelayError::from(err);
    if err.is_upstream() {
        tracing::warn!("Portfolio upstream error: {}", err);
    } else {
        tracing::error!("Portfolio error: {}", err);
    }

    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: err.code().into(),
        }),
    )
}

async fn snapshot(state: &AppState) -> Result<PortfolioSnapshot, ApiError> {
    state.fetcher.fetch().await.map_err(api_error)
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn root() -> &'static str {
    "Portfolio source is running"
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

pub async fn portfolio_json(
    State(state): State<AppState>,
) -> Result<Json<PortfolioReport>, ApiError> {
    let snapshot = snapshot(&state).await?;
    Ok(Json(PortfolioReport::from(&snapshot)))
}

pub async fn portfolio_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let snapshot = snapshot(&state).await?;
    let body = render_csv(&snapshot).map_err(api_error)?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body))
}

/// Pre-rendered chat report, consumed by the chat bot
pub async fn portfolio_report(
    State(state): State<AppState>,
) -> Result<Json<ReportResponse>, ApiError> {
    let snapshot = snapshot(&state).await?;
    Ok(Json(ReportResponse {
        report: render_report(&snapshot),
    }))
}
