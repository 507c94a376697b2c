//! Dashboard route: the aggregated summary for the overview page.

use axum::{extract::State, Json};

use crate::errors::{ApiResponse, AppError};
use crate::middleware::identity::CurrentUser;
use crate::services::aggregate::DashboardSummary;
use crate::services::dashboard;
use crate::AppState;

/// GET /api/dashboard — aggregated dashboard summary.
pub async fn summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let summary = dashboard::summary(&state.db, user.id).await?;
    Ok(ApiResponse::success(summary))
}
