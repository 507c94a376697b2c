//! Account service: listing and provider-sync upserts.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::{Account, NewAccount};

/// List all linked accounts for a user.
pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<Account>, AppError> {
    let accounts = sqlx::query_as::<_, Account>(
        "SELECT * FROM accounts WHERE user_id = $1 ORDER BY name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(accounts)
}

/// Insert an account from a provider sync, refreshing balances when the
/// provider-side account id is already known.
pub async fn upsert(pool: &PgPool, input: &NewAccount) -> Result<Account, AppError> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (user_id, item_id, account_id, name, official_name,
            account_type, subtype, mask, balance_available, balance_current,
            balance_limit, balance_iso_currency_code)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (account_id) DO UPDATE SET
            name = EXCLUDED.name,
            official_name = EXCLUDED.official_name,
            balance_available = EXCLUDED.balance_available,
            balance_current = EXCLUDED.balance_current,
            balance_limit = EXCLUDED.balance_limit,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(input.user_id)
    .bind(input.item_id)
    .bind(&input.account_id)
    .bind(&input.name)
    .bind(&input.official_name)
    .bind(&input.account_type)
    .bind(&input.subtype)
    .bind(&input.mask)
    .bind(input.balance_available)
    .bind(input.balance_current)
    .bind(input.balance_limit)
    .bind(&input.balance_iso_currency_code)
    .fetch_one(pool)
    .await?;
    Ok(account)
}
