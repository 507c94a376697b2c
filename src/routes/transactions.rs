//! Transaction routes: date-range listing and re-tagging.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::identity::CurrentUser;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::transaction::{Transaction, TransactionWithAccount, UpdateTransactionCategory};
use crate::services::transaction as transaction_service;
use crate::AppState;

/// Window shown when no explicit range is requested, in days.
const DEFAULT_RANGE_DAYS: i64 = 30;

/// Date-range query parameters. Both bounds are inclusive.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Resolve to concrete bounds, defaulting to the trailing window.
    fn resolve(&self) -> (NaiveDate, NaiveDate) {
        let end = self.end_date.unwrap_or_else(|| Utc::now().date_naive());
        let start = self
            .start_date
            .unwrap_or_else(|| end - Duration::days(DEFAULT_RANGE_DAYS));
        (start, end)
    }
}

/// GET /api/transactions — paged date-range list with account names.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(range): Query<DateRange>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ApiResponse<PagedResult<TransactionWithAccount>>>, AppError> {
    let (start_date, end_date) = range.resolve();
    if start_date > end_date {
        return Err(AppError::Validation(
            "start_date must not be after end_date".to_string(),
        ));
    }

    let result = transaction_service::list_range_paged(
        &state.db,
        user.id,
        start_date,
        end_date,
        &pagination,
    )
    .await?;
    Ok(ApiResponse::success(result))
}

/// PUT /api/transactions/:id/category — re-tag one transaction.
pub async fn update_category(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTransactionCategory>,
) -> Result<Json<ApiResponse<Transaction>>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let transaction =
        transaction_service::update_category(&state.db, user.id, id, &body.category).await?;
    Ok(ApiResponse::success(transaction))
}
