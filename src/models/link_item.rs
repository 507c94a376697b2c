//! Provider link item: one connection to a financial institution.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored provider connection. Holds the access token, so this type is
/// never serialized into an API response.
#[derive(Debug, Clone, FromRow)]
pub struct LinkItem {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Provider-side item identifier.
    pub item_id: String,
    pub access_token: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
