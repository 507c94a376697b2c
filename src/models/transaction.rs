//! Transaction model.
//!
//! Sign convention is inherited from the aggregation provider and preserved
//! exactly: a positive amount is money leaving the account (an expense), a
//! negative amount is money coming in (income).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A transaction on a linked account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Provider-side id of the owning account.
    pub account_id: String,
    /// Provider-side transaction identifier.
    pub transaction_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub name: String,
    pub merchant_name: Option<String>,
    /// Comma-joined category path, e.g. "Food and Drink, Restaurants".
    /// The first segment is the canonical category.
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub pending: bool,
    pub payment_channel: Option<String>,
    pub iso_currency_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transaction list row carrying the owning account's display name.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithAccount {
    pub id: Uuid,
    pub transaction_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub name: String,
    pub merchant_name: Option<String>,
    pub category: Option<String>,
    pub pending: bool,
    pub account_name: String,
}

/// Insert model for a transaction arriving from the provider.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub account_id: String,
    pub transaction_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub name: String,
    pub merchant_name: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub pending: bool,
    pub payment_channel: Option<String>,
    pub iso_currency_code: String,
}

/// Request body for re-tagging a transaction.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct UpdateTransactionCategory {
    #[validate(length(min = 1, max = 255))]
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            account_id: "acc-1".to_string(),
            transaction_id: "txn-1".to_string(),
            amount: Decimal::new(50_00, 2),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            name: "Coffee".to_string(),
            merchant_name: Some("Blue Bottle".to_string()),
            category: Some("Food and Drink, Coffee Shop".to_string()),
            category_id: None,
            pending: false,
            payment_channel: Some("in store".to_string()),
            iso_currency_code: "USD".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn transaction_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["merchantName"], "Blue Bottle");
        assert_eq!(json["transactionId"], "txn-1");
        assert_eq!(json["date"], "2024-03-01");
    }

    #[test]
    fn amount_round_trips_as_decimal_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["amount"], serde_json::json!("50.00"));
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back.amount, Decimal::new(50_00, 2));
    }
}
