//! Transaction service: range queries, provider-sync upserts, re-tagging.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::transaction::{NewTransaction, Transaction, TransactionWithAccount};

/// All of a user's transactions in an inclusive date range, newest first.
pub async fn list_range(
    pool: &PgPool,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<Transaction>, AppError> {
    let transactions = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT * FROM transactions
        WHERE user_id = $1 AND date >= $2 AND date <= $3
        ORDER BY date DESC
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;
    Ok(transactions)
}

/// Paged transaction list with account display names for the transactions
/// page.
pub async fn list_range_paged(
    pool: &PgPool,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    pagination: &Pagination,
) -> Result<PagedResult<TransactionWithAccount>, AppError> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM transactions WHERE user_id = $1 AND date >= $2 AND date <= $3",
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, TransactionWithAccount>(
        r#"
        SELECT t.id, t.transaction_id, t.amount, t.date, t.name,
               t.merchant_name, t.category, t.pending,
               COALESCE(a.name, 'Unknown Account') AS account_name
        FROM transactions t
        LEFT JOIN accounts a ON a.account_id = t.account_id
        WHERE t.user_id = $1 AND t.date >= $2 AND t.date <= $3
        ORDER BY t.date DESC, t.created_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Insert a transaction from a provider sync, refreshing mutable fields when
/// the provider-side transaction id is already known.
pub async fn upsert(pool: &PgPool, input: &NewTransaction) -> Result<Transaction, AppError> {
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (user_id, account_id, transaction_id, amount,
            date, name, merchant_name, category, category_id, pending,
            payment_channel, iso_currency_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (transaction_id) DO UPDATE SET
            amount = EXCLUDED.amount,
            date = EXCLUDED.date,
            name = EXCLUDED.name,
            merchant_name = EXCLUDED.merchant_name,
            pending = EXCLUDED.pending,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(input.user_id)
    .bind(&input.account_id)
    .bind(&input.transaction_id)
    .bind(input.amount)
    .bind(input.date)
    .bind(&input.name)
    .bind(&input.merchant_name)
    .bind(&input.category)
    .bind(&input.category_id)
    .bind(input.pending)
    .bind(&input.payment_channel)
    .bind(&input.iso_currency_code)
    .fetch_one(pool)
    .await?;
    Ok(transaction)
}

/// Re-tag a transaction the user owns.
pub async fn update_category(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    category: &str,
) -> Result<Transaction, AppError> {
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET category = $3, updated_at = now()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(category)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Transaction {id} not found")))?;
    Ok(transaction)
}
