//! Budget routes: CRUD with computed current-month spent figures.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::identity::CurrentUser;
use crate::models::budget::{BudgetWithSpent, CreateBudget, UpdateBudget};
use crate::services::budget as budget_service;
use crate::AppState;

/// GET /api/budgets — budgets with current-month spent.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<BudgetWithSpent>>>, AppError> {
    let budgets = budget_service::list_with_spent(&state.db, user.id).await?;
    Ok(ApiResponse::success(budgets))
}

/// POST /api/budgets — create a budget.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateBudget>,
) -> Result<Json<ApiResponse<BudgetWithSpent>>, AppError> {
    let budget = budget_service::create(&state.db, user.id, &body).await?;
    Ok(ApiResponse::success(budget))
}

/// PUT /api/budgets/:id — update a budget.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBudget>,
) -> Result<Json<ApiResponse<BudgetWithSpent>>, AppError> {
    let budget = budget_service::update(&state.db, user.id, id, &body).await?;
    Ok(ApiResponse::success(budget))
}

/// DELETE /api/budgets/:id — delete a budget.
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    budget_service::delete(&state.db, user.id, id).await?;
    Ok(ApiResponse::success(()))
}
