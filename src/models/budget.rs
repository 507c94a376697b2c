//! Monthly budget model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A monthly spending budget, optionally scoped to a category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    /// Monthly limit.
    pub amount: Decimal,
    /// Substring matched case-insensitively against transaction categories.
    /// `None` means the budget covers all spending.
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A budget augmented with the amount spent in the current calendar month.
/// Computed fresh on every read, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetWithSpent {
    #[serde(flatten)]
    pub budget: Budget,
    pub spent: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBudget {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub amount: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBudget {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub amount: Decimal,
    #[validate(length(min = 1, max = 255))]
    pub category: Option<String>,
}
