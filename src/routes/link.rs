//! Provider link routes: token creation, exchange, and sync.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::identity::CurrentUser;
use crate::provider::plaid::LinkTokenResponse;
use crate::services::link::{self as link_service, ExchangeSummary, SyncSummary};
use crate::AppState;

/// Request body for the public-token exchange. Field names follow the
/// provider's Link callback payload.
#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    pub public_token: String,
}

/// Request body for a manual sync.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub access_token: String,
}

/// POST /api/link/token — create a link token for the Link flow.
pub async fn create_token(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<LinkTokenResponse>>, AppError> {
    let token = link_service::create_link_token(&state.provider, user.id).await?;
    Ok(ApiResponse::success(token))
}

/// POST /api/link/exchange — exchange a public token and import accounts.
pub async fn exchange(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<ExchangeRequest>,
) -> Result<Json<ApiResponse<ExchangeSummary>>, AppError> {
    if body.public_token.is_empty() {
        return Err(AppError::Validation("Missing public token".to_string()));
    }
    let summary = link_service::exchange_public_token(
        &state.db,
        &state.provider,
        user.id,
        &body.public_token,
    )
    .await?;
    Ok(ApiResponse::success(summary))
}

/// POST /api/link/sync — sync recent transactions for an access token.
pub async fn sync(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<SyncRequest>,
) -> Result<Json<ApiResponse<SyncSummary>>, AppError> {
    if body.access_token.is_empty() {
        return Err(AppError::Validation("Missing access token".to_string()));
    }
    let synced =
        link_service::sync_transactions(&state.db, &state.provider, user.id, &body.access_token)
            .await?;
    Ok(ApiResponse::success(SyncSummary {
        synced_transactions: synced,
    }))
}
