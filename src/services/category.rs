//! User-defined category service.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::category::{Category, CreateCategory, UpdateCategory, DEFAULT_COLOR};

/// List a user's categories by name.
pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<Category>, AppError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT * FROM categories WHERE user_id = $1 ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

/// Create a category with the default color when none is given.
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: &CreateCategory,
) -> Result<Category, AppError> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (user_id, name, color, is_default)
        VALUES ($1, $2, $3, false)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&input.name)
    .bind(input.color.as_deref().unwrap_or(DEFAULT_COLOR))
    .fetch_one(pool)
    .await?;
    Ok(category)
}

/// Update a category the user owns. Absent fields keep their values.
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: &UpdateCategory,
) -> Result<Category, AppError> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = sqlx::query_as::<_, Category>(
        r#"
        UPDATE categories
        SET name = COALESCE($3, name),
            color = COALESCE($4, color),
            updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&input.name)
    .bind(&input.color)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))?;
    Ok(category)
}

/// Delete a category the user owns.
pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Category {id} not found")));
    }
    Ok(())
}
