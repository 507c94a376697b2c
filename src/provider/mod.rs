//! Account-aggregation provider boundary.
//!
//! Vendor payloads are deserialized into loosely-optional records and
//! validated into internal insert models here, before anything touches the
//! database or the aggregator. A record missing a required field fails with
//! `AppError::InvalidInput` instead of being coerced to zero, so data-quality
//! problems surface at this boundary rather than as plausible-looking wrong
//! totals downstream.

pub mod plaid;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::account::NewAccount;
use crate::models::transaction::NewTransaction;

/// Balance block of a provider account record.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalances {
    pub available: Option<Decimal>,
    pub current: Option<Decimal>,
    pub limit: Option<Decimal>,
    pub iso_currency_code: Option<String>,
}

/// Account record as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedAccount {
    pub account_id: String,
    pub name: String,
    pub official_name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: String,
    pub subtype: Option<String>,
    pub mask: Option<String>,
    pub balances: AccountBalances,
}

impl LinkedAccount {
    /// Validate this record into an insertable account.
    pub fn into_new_account(self, user_id: Uuid, item_id: Uuid) -> Result<NewAccount, AppError> {
        let balance_current = self.balances.current.ok_or_else(|| {
            AppError::InvalidInput(format!(
                "account {} is missing a current balance",
                self.account_id
            ))
        })?;
        let balance_available = self.balances.available.ok_or_else(|| {
            AppError::InvalidInput(format!(
                "account {} is missing an available balance",
                self.account_id
            ))
        })?;

        Ok(NewAccount {
            user_id,
            item_id,
            official_name: self.official_name.or_else(|| Some(self.name.clone())),
            account_id: self.account_id,
            name: self.name,
            account_type: self.account_type,
            subtype: self.subtype,
            mask: self.mask,
            balance_available,
            balance_current,
            balance_limit: self.balances.limit,
            balance_iso_currency_code: self
                .balances
                .iso_currency_code
                .unwrap_or_else(|| "USD".to_string()),
        })
    }
}

/// Transaction record as the provider returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderTransaction {
    pub transaction_id: String,
    pub account_id: String,
    /// Signed per the provider convention: positive = outflow.
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub merchant_name: Option<String>,
    /// Category path segments; joined into the stored comma-joined string.
    pub category: Option<Vec<String>>,
    pub category_id: Option<String>,
    pub pending: Option<bool>,
    pub payment_channel: Option<String>,
    pub iso_currency_code: Option<String>,
}

impl ProviderTransaction {
    /// Validate this record into an insertable transaction.
    pub fn into_new_transaction(self, user_id: Uuid) -> Result<NewTransaction, AppError> {
        let amount = self.amount.ok_or_else(|| {
            AppError::InvalidInput(format!(
                "transaction {} is missing an amount",
                self.transaction_id
            ))
        })?;
        let date = self.date.ok_or_else(|| {
            AppError::InvalidInput(format!(
                "transaction {} is missing a date",
                self.transaction_id
            ))
        })?;
        let name = self.name.ok_or_else(|| {
            AppError::InvalidInput(format!(
                "transaction {} is missing a name",
                self.transaction_id
            ))
        })?;

        Ok(NewTransaction {
            user_id,
            account_id: self.account_id,
            transaction_id: self.transaction_id,
            amount,
            date,
            name,
            merchant_name: self.merchant_name,
            category: self.category.filter(|c| !c.is_empty()).map(|c| c.join(", ")),
            category_id: self.category_id,
            pending: self.pending.unwrap_or(false),
            payment_channel: self.payment_channel,
            iso_currency_code: self.iso_currency_code.unwrap_or_else(|| "USD".to_string()),
        })
    }
}
