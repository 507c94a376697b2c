//! Account routes.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::identity::CurrentUser;
use crate::models::account::Account;
use crate::services::account as account_service;
use crate::AppState;

/// GET /api/accounts — list the user's linked accounts.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Account>>>, AppError> {
    let accounts = account_service::list(&state.db, user.id).await?;
    Ok(ApiResponse::success(accounts))
}
