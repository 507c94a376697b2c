//! Dashboard snapshot assembly.
//!
//! Fetches one fresh snapshot of the user's accounts, transactions, and
//! budgets per request and hands it to the pure aggregation module. Nothing
//! is cached between calls.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::budget::Budget;
use crate::services::aggregate::{self, DashboardSummary};
use crate::services::{account, budget, transaction};

/// Trailing window shown on the dashboard, in days.
const DASHBOARD_WINDOW_DAYS: i64 = 30;

/// Build the dashboard summary for a user.
pub async fn summary(pool: &PgPool, user_id: Uuid) -> Result<DashboardSummary, AppError> {
    let today = Utc::now().date_naive();
    let window_start = today - Duration::days(DASHBOARD_WINDOW_DAYS);

    let accounts = account::list(pool, user_id).await?;
    let transactions = transaction::list_range(pool, user_id, window_start, today).await?;
    let budgets = sqlx::query_as::<_, Budget>(
        "SELECT * FROM budgets WHERE user_id = $1 ORDER BY created_at",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    let month_transactions =
        transaction::list_range(pool, user_id, budget::month_start(today), today).await?;

    Ok(aggregate::summarize(
        accounts,
        transactions,
        budgets,
        &month_transactions,
    ))
}
