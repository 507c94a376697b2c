//! Budget service: CRUD plus current-month spent computation.
//!
//! `spent` is derived on every read from the current calendar month's
//! transactions; it is never stored.

use chrono::{Datelike, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::budget::{Budget, BudgetWithSpent, CreateBudget, UpdateBudget};
use crate::models::transaction::Transaction;
use crate::services::{aggregate, transaction};

/// First day of the month `today` falls in.
pub fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).expect("day 1 is valid for every month")
}

/// The current calendar month's transactions, used for budget progress.
async fn current_month_transactions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Transaction>, AppError> {
    let today = Utc::now().date_naive();
    transaction::list_range(pool, user_id, month_start(today), today).await
}

/// List a user's budgets with `spent` computed for the current month.
pub async fn list_with_spent(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<BudgetWithSpent>, AppError> {
    let budgets = sqlx::query_as::<_, Budget>(
        "SELECT * FROM budgets WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let month_txns = current_month_transactions(pool, user_id).await?;
    Ok(budgets
        .into_iter()
        .map(|b| aggregate::with_spent(b, &month_txns))
        .collect())
}

/// Create a budget and return it with its (possibly nonzero) current-month
/// spent figure.
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: &CreateBudget,
) -> Result<BudgetWithSpent, AppError> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if input.amount <= rust_decimal::Decimal::ZERO {
        return Err(AppError::Validation(
            "Budget amount must be positive".to_string(),
        ));
    }

    let budget = sqlx::query_as::<_, Budget>(
        r#"
        INSERT INTO budgets (user_id, name, amount, category)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&input.name)
    .bind(input.amount)
    .bind(&input.category)
    .fetch_one(pool)
    .await?;

    let month_txns = current_month_transactions(pool, user_id).await?;
    Ok(aggregate::with_spent(budget, &month_txns))
}

/// Update a budget the user owns, returning it with a freshly computed
/// spent figure.
pub async fn update(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    input: &UpdateBudget,
) -> Result<BudgetWithSpent, AppError> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if input.amount <= rust_decimal::Decimal::ZERO {
        return Err(AppError::Validation(
            "Budget amount must be positive".to_string(),
        ));
    }

    let budget = sqlx::query_as::<_, Budget>(
        r#"
        UPDATE budgets
        SET name = $3, amount = $4, category = $5, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&input.name)
    .bind(input.amount)
    .bind(&input.category)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Budget {id} not found")))?;

    let month_txns = current_month_transactions(pool, user_id).await?;
    Ok(aggregate::with_spent(budget, &month_txns))
}

/// Delete a budget the user owns.
pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM budgets WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Budget {id} not found")));
    }
    Ok(())
}
