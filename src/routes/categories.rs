//! User-defined category routes.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::identity::CurrentUser;
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::services::category as category_service;
use crate::AppState;

/// GET /api/categories — list the user's categories.
pub async fn list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<Category>>>, AppError> {
    let categories = category_service::list(&state.db, user.id).await?;
    Ok(ApiResponse::success(categories))
}

/// POST /api/categories — create a category.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateCategory>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = category_service::create(&state.db, user.id, &body).await?;
    Ok(ApiResponse::success(category))
}

/// PUT /api/categories/:id — update a category.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCategory>,
) -> Result<Json<ApiResponse<Category>>, AppError> {
    let category = category_service::update(&state.db, user.id, id, &body).await?;
    Ok(ApiResponse::success(category))
}

/// DELETE /api/categories/:id — delete a category.
pub async fn remove(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    category_service::delete(&state.db, user.id, id).await?;
    Ok(ApiResponse::success(()))
}
