//! Provider link orchestration: token exchange, account import, and
//! transaction sync.
//!
//! Patterned as a pipeline: exchange credentials, persist the link item,
//! validate and upsert each returned account, then run an initial
//! transaction sync over the trailing window.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::Account;
use crate::models::link_item::LinkItem;
use crate::provider::plaid::{LinkTokenResponse, PlaidClient};
use crate::services::{account, transaction};

/// Trailing window synced from the provider, in days.
const SYNC_WINDOW_DAYS: i64 = 30;

/// Result of a public-token exchange. The access token itself stays
/// server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeSummary {
    pub item_id: Uuid,
    pub accounts: Vec<Account>,
    pub synced_transactions: usize,
}

/// Result of a transaction sync run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub synced_transactions: usize,
}

/// Create a link token for the frontend Link flow.
pub async fn create_link_token(
    provider: &PlaidClient,
    user_id: Uuid,
) -> Result<LinkTokenResponse, AppError> {
    provider.create_link_token(user_id).await
}

/// Exchange a public token, persist the connection, and import its accounts
/// and recent transactions.
pub async fn exchange_public_token(
    pool: &PgPool,
    provider: &PlaidClient,
    user_id: Uuid,
    public_token: &str,
) -> Result<ExchangeSummary, AppError> {
    let exchange = provider.exchange_public_token(public_token).await?;

    let item = sqlx::query_as::<_, LinkItem>(
        r#"
        INSERT INTO link_items (user_id, item_id, access_token, status)
        VALUES ($1, $2, $3, 'active')
        ON CONFLICT (item_id) DO UPDATE SET
            access_token = EXCLUDED.access_token,
            status = 'active',
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&exchange.item_id)
    .bind(&exchange.access_token)
    .fetch_one(pool)
    .await?;

    let linked = provider.get_accounts(&exchange.access_token).await?;
    let mut accounts = Vec::with_capacity(linked.len());
    for raw in linked {
        let new_account = raw.into_new_account(user_id, item.id)?;
        accounts.push(account::upsert(pool, &new_account).await?);
    }

    let synced = sync_transactions(pool, provider, user_id, &exchange.access_token).await?;

    tracing::info!(
        user_id = %user_id,
        item_id = %item.id,
        accounts = accounts.len(),
        transactions = synced,
        "Linked new provider item"
    );

    Ok(ExchangeSummary {
        item_id: item.id,
        accounts,
        synced_transactions: synced,
    })
}

/// Sync the trailing window of transactions for an access token. Returns
/// the number of records written.
pub async fn sync_transactions(
    pool: &PgPool,
    provider: &PlaidClient,
    user_id: Uuid,
    access_token: &str,
) -> Result<usize, AppError> {
    let end_date = Utc::now().date_naive();
    let start_date = end_date - Duration::days(SYNC_WINDOW_DAYS);

    let raw = provider
        .get_transactions(access_token, start_date, end_date)
        .await?;

    let mut count = 0usize;
    for record in raw {
        let new_transaction = record.into_new_transaction(user_id)?;
        transaction::upsert(pool, &new_transaction).await?;
        count += 1;
    }

    tracing::info!(user_id = %user_id, count, "Synced provider transactions");
    Ok(count)
}
