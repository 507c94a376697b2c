//! Linked financial account model.
//!
//! Balance fields are `NUMERIC(19,4)` in PostgreSQL and `Decimal` here;
//! they are never represented as floating point.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A financial account linked through the aggregation provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Link item this account came from.
    pub item_id: Uuid,
    /// Provider-side account identifier.
    pub account_id: String,
    pub name: String,
    pub official_name: Option<String>,
    /// depository, credit, loan, investment, ...
    #[serde(rename = "type")]
    pub account_type: String,
    /// checking, savings, credit card, ...
    pub subtype: Option<String>,
    /// Last digits of the account number, for display.
    pub mask: Option<String>,
    pub balance_available: Decimal,
    pub balance_current: Decimal,
    pub balance_limit: Option<Decimal>,
    pub balance_iso_currency_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert model for an account arriving from the provider.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_id: Uuid,
    pub item_id: Uuid,
    pub account_id: String,
    pub name: String,
    pub official_name: Option<String>,
    pub account_type: String,
    pub subtype: Option<String>,
    pub mask: Option<String>,
    pub balance_available: Decimal,
    pub balance_current: Decimal,
    pub balance_limit: Option<Decimal>,
    pub balance_iso_currency_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_serializes_camel_case() {
        let account = Account {
            id: Uuid::nil(),
            user_id: Uuid::nil(),
            item_id: Uuid::nil(),
            account_id: "acc-1".to_string(),
            name: "Checking".to_string(),
            official_name: Some("Plaid Gold Checking".to_string()),
            account_type: "depository".to_string(),
            subtype: Some("checking".to_string()),
            mask: Some("0000".to_string()),
            balance_available: Decimal::new(110_00, 2),
            balance_current: Decimal::new(120_00, 2),
            balance_limit: None,
            balance_iso_currency_code: "USD".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["balanceCurrent"], serde_json::json!("120.00"));
        assert_eq!(json["type"], "depository");
        assert!(json.get("balance_current").is_none());
    }
}
