//! Dashboard aggregation: pure computations over one snapshot of accounts,
//! transactions, and budgets.
//!
//! Amount sign convention (inherited from the aggregation provider and
//! preserved exactly): positive = money leaving the account (expense),
//! negative = money entering (income).
//!
//! Every function here is a total, side-effect-free computation over its
//! arguments. Window filtering is the caller's responsibility; nothing in
//! this module re-filters or caches.

use std::collections::HashMap;

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::account::Account;
use crate::models::budget::{Budget, BudgetWithSpent};
use crate::models::transaction::Transaction;

/// Default number of transactions in the recent-transactions slice.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 10;

/// Income and expense totals over one transaction window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlow {
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Budget progress color contract for consuming UIs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressColor {
    Ok,
    Warning,
    Danger,
}

/// Everything the dashboard page needs, computed fresh on every call and
/// never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub accounts: Vec<Account>,
    pub total_balance: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
    pub recent_transactions: Vec<Transaction>,
    pub spending_by_category: HashMap<String, Decimal>,
    pub budgets: Vec<BudgetWithSpent>,
    pub monthly_data: [Decimal; 12],
}

/// Sum of current balances across accounts. Empty input yields zero.
pub fn total_balance(accounts: &[Account]) -> Decimal {
    accounts.iter().map(|a| a.balance_current).sum()
}

/// Income and expense totals for a pre-filtered transaction window.
///
/// Income sums `|amount|` over negative amounts, expenses sums positive
/// amounts. Zero amounts count toward neither.
pub fn cash_flow(transactions: &[Transaction]) -> CashFlow {
    let income = transactions
        .iter()
        .filter(|t| t.amount < Decimal::ZERO)
        .map(|t| t.amount.abs())
        .sum();
    let expenses = transactions
        .iter()
        .filter(|t| t.amount > Decimal::ZERO)
        .map(|t| t.amount)
        .sum();
    CashFlow { income, expenses }
}

/// The canonical category of a comma-joined category path: the first
/// segment, trimmed.
pub fn canonical_category(category: &str) -> &str {
    category.split(',').next().unwrap_or(category).trim()
}

/// Expense totals keyed by canonical category.
///
/// Only transactions with a positive amount and a category present are
/// counted; uncategorized spending is excluded here (labeling it "Other" is
/// a display concern). Iteration order of the result is undefined.
pub fn spending_by_category(transactions: &[Transaction]) -> HashMap<String, Decimal> {
    let mut groups: HashMap<String, Decimal> = HashMap::new();
    for t in transactions {
        if t.amount <= Decimal::ZERO {
            continue;
        }
        let Some(category) = t.category.as_deref() else {
            continue;
        };
        let key = canonical_category(category).to_string();
        *groups.entry(key).or_insert(Decimal::ZERO) += t.amount;
    }
    groups
}

/// Expense totals bucketed by calendar month, index 0 = January.
///
/// Buckets by month number alone: transactions from different years land in
/// the same bucket. Known limitation of the series, kept intentionally; use
/// [`monthly_expense_series_for_year`] for a single-year view.
pub fn monthly_expense_series(transactions: &[Transaction]) -> [Decimal; 12] {
    let mut months = [Decimal::ZERO; 12];
    for t in transactions {
        if t.amount > Decimal::ZERO {
            months[t.date.month0() as usize] += t.amount;
        }
    }
    months
}

/// Year-aware variant of [`monthly_expense_series`]: only transactions
/// dated in `year` contribute.
pub fn monthly_expense_series_for_year(transactions: &[Transaction], year: i32) -> [Decimal; 12] {
    let mut months = [Decimal::ZERO; 12];
    for t in transactions {
        if t.amount > Decimal::ZERO && t.date.year() == year {
            months[t.date.month0() as usize] += t.amount;
        }
    }
    months
}

/// Amount spent against a budget within the supplied (current-month)
/// transaction set.
///
/// A budget without a category filter counts every expense; one with a
/// filter counts expenses whose category contains the filter,
/// case-insensitively.
pub fn budget_spent(budget: &Budget, transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.amount > Decimal::ZERO)
        .filter(|t| match budget.category.as_deref() {
            None => true,
            Some(filter) => t
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&filter.to_lowercase())),
        })
        .map(|t| t.amount)
        .sum()
}

/// Attach the computed `spent` figure to a budget.
pub fn with_spent(budget: Budget, transactions: &[Transaction]) -> BudgetWithSpent {
    let spent = budget_spent(&budget, transactions);
    BudgetWithSpent { budget, spent }
}

/// Spent-to-limit percentage for display: rounded, clamped to 100, and 0
/// whenever the limit is not positive.
pub fn progress_percent(spent: Decimal, amount: Decimal) -> u32 {
    if amount <= Decimal::ZERO {
        return 0;
    }
    let percent = (spent / amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0);
    percent.min(100)
}

/// Map a progress percentage onto the UI color contract.
pub fn progress_color(percent: u32) -> ProgressColor {
    if percent >= 90 {
        ProgressColor::Danger
    } else if percent >= 70 {
        ProgressColor::Warning
    } else {
        ProgressColor::Ok
    }
}

/// The first `limit` transactions after a stable date-descending sort.
/// Ties keep their original relative order.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Compose the full dashboard summary from one snapshot.
///
/// `transactions` is the dashboard window (last 30 days); `month_transactions`
/// is the current calendar month's subset used for budget progress.
pub fn summarize(
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    month_transactions: &[Transaction],
) -> DashboardSummary {
    let total_balance = total_balance(&accounts);
    let CashFlow { income, expenses } = cash_flow(&transactions);
    let spending = spending_by_category(&transactions);
    let monthly_data = monthly_expense_series(&transactions);
    let recent = recent_transactions(&transactions, RECENT_TRANSACTIONS_LIMIT);
    let budgets = budgets
        .into_iter()
        .map(|b| with_spent(b, month_transactions))
        .collect();

    DashboardSummary {
        accounts,
        total_balance,
        income,
        expenses,
        recent_transactions: recent,
        spending_by_category: spending,
        budgets,
        monthly_data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn account(balance_current: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            item_id: Uuid::nil(),
            account_id: "acc-1".to_string(),
            name: "Checking".to_string(),
            official_name: None,
            account_type: "depository".to_string(),
            subtype: Some("checking".to_string()),
            mask: None,
            balance_available: Decimal::ZERO,
            balance_current: balance_current.parse().unwrap(),
            balance_limit: None,
            balance_iso_currency_code: "USD".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn txn(amount: &str, category: Option<&str>, date: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            account_id: "acc-1".to_string(),
            transaction_id: Uuid::new_v4().to_string(),
            amount: amount.parse().unwrap(),
            date: date.parse::<NaiveDate>().unwrap(),
            name: "test".to_string(),
            merchant_name: None,
            category: category.map(|c| c.to_string()),
            category_id: None,
            pending: false,
            payment_channel: None,
            iso_currency_code: "USD".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn budget(amount: &str, category: Option<&str>) -> Budget {
        Budget {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: "test budget".to_string(),
            amount: amount.parse().unwrap(),
            category: category.map(|c| c.to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_inputs_yield_documented_zeros() {
        assert_eq!(total_balance(&[]), Decimal::ZERO);

        let flow = cash_flow(&[]);
        assert_eq!(flow.income, Decimal::ZERO);
        assert_eq!(flow.expenses, Decimal::ZERO);

        assert!(spending_by_category(&[]).is_empty());
        assert_eq!(monthly_expense_series(&[]), [Decimal::ZERO; 12]);
        assert!(recent_transactions(&[], 10).is_empty());
    }

    #[test]
    fn total_balance_handles_negative_balances() {
        let accounts = vec![account("1000.00"), account("-250.50")];
        assert_eq!(total_balance(&accounts), "749.50".parse().unwrap());
    }

    #[test]
    fn cash_flow_splits_by_sign() {
        let txns = vec![
            txn("50", Some("Food, Restaurants"), "2024-03-01"),
            txn("-2000", None, "2024-03-01"),
        ];
        let flow = cash_flow(&txns);
        assert_eq!(flow.income, Decimal::from(2000));
        assert_eq!(flow.expenses, Decimal::from(50));
    }

    #[test]
    fn cash_flow_excludes_zero_amounts() {
        let txns = vec![txn("0", None, "2024-03-01"), txn("10", None, "2024-03-02")];
        let flow = cash_flow(&txns);
        assert_eq!(flow.income, Decimal::ZERO);
        assert_eq!(flow.expenses, Decimal::from(10));
    }

    #[test]
    fn cash_flow_is_order_invariant() {
        let mut txns = vec![
            txn("12.34", None, "2024-01-05"),
            txn("-400", None, "2024-02-06"),
            txn("7.66", None, "2024-03-07"),
            txn("-0.01", None, "2024-04-08"),
        ];
        let forward = cash_flow(&txns);
        txns.reverse();
        let reversed = cash_flow(&txns);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn spending_by_category_buckets_by_first_segment() {
        let txns = vec![
            txn("50", Some("Food, Restaurants"), "2024-03-01"),
            txn("-2000", None, "2024-03-01"),
        ];
        let groups = spending_by_category(&txns);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Food"], Decimal::from(50));
    }

    #[test]
    fn spending_by_category_accumulates_and_trims() {
        let txns = vec![
            txn("10", Some("Food and Drink, Restaurants"), "2024-03-01"),
            txn("15", Some("Food and Drink , Groceries"), "2024-03-02"),
            txn("20", Some("Travel"), "2024-03-03"),
        ];
        let groups = spending_by_category(&txns);
        assert_eq!(groups["Food and Drink"], Decimal::from(25));
        assert_eq!(groups["Travel"], Decimal::from(20));
    }

    #[test]
    fn spending_by_category_skips_income_and_uncategorized() {
        let txns = vec![
            txn("-50", Some("Payroll"), "2024-03-01"),
            txn("30", None, "2024-03-02"),
            txn("0", Some("Food"), "2024-03-03"),
        ];
        assert!(spending_by_category(&txns).is_empty());
    }

    #[test]
    fn category_totals_sum_to_categorized_expenses() {
        let txns = vec![
            txn("10", Some("Food"), "2024-03-01"),
            txn("20", Some("Travel"), "2024-03-02"),
            txn("30", None, "2024-03-03"),
            txn("-99", Some("Payroll"), "2024-03-04"),
        ];
        let categorized_total: Decimal = spending_by_category(&txns).values().copied().sum();
        let uncategorized: Decimal = txns
            .iter()
            .filter(|t| t.amount > Decimal::ZERO && t.category.is_none())
            .map(|t| t.amount)
            .sum();
        assert_eq!(
            categorized_total + uncategorized,
            cash_flow(&txns).expenses
        );
    }

    #[test]
    fn monthly_series_has_twelve_buckets_and_matches_expenses() {
        let txns = vec![
            txn("100", None, "2024-01-15"),
            txn("200", None, "2024-06-30"),
            txn("-500", None, "2024-06-01"),
            txn("50", None, "2024-12-31"),
        ];
        let series = monthly_expense_series(&txns);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0], Decimal::from(100));
        assert_eq!(series[5], Decimal::from(200));
        assert_eq!(series[11], Decimal::from(50));

        let series_total: Decimal = series.iter().copied().sum();
        assert_eq!(series_total, cash_flow(&txns).expenses);
    }

    #[test]
    fn monthly_series_collapses_years() {
        // Same calendar month in different years lands in one bucket.
        let txns = vec![
            txn("100", None, "2023-03-10"),
            txn("150", None, "2024-03-20"),
        ];
        let series = monthly_expense_series(&txns);
        assert_eq!(series[2], Decimal::from(250));
    }

    #[test]
    fn monthly_series_for_year_separates_years() {
        let txns = vec![
            txn("100", None, "2023-03-10"),
            txn("150", None, "2024-03-20"),
        ];
        assert_eq!(
            monthly_expense_series_for_year(&txns, 2023)[2],
            Decimal::from(100)
        );
        assert_eq!(
            monthly_expense_series_for_year(&txns, 2024)[2],
            Decimal::from(150)
        );
    }

    #[test]
    fn budget_without_category_counts_all_expenses() {
        let b = budget("500", None);
        let txns = vec![
            txn("50", Some("Food"), "2024-03-01"),
            txn("30", None, "2024-03-02"),
            txn("-100", Some("Payroll"), "2024-03-03"),
        ];
        assert_eq!(budget_spent(&b, &txns), Decimal::from(80));
    }

    #[test]
    fn budget_category_matches_substring_case_insensitively() {
        let b = budget("200", Some("Food"));
        let txns = vec![
            txn("50", Some("Food and Drink"), "2024-03-01"),
            txn("25", Some("fast FOOD"), "2024-03-02"),
            txn("40", Some("Travel"), "2024-03-03"),
            txn("10", None, "2024-03-04"),
        ];
        assert_eq!(budget_spent(&b, &txns), Decimal::from(75));
    }

    #[test]
    fn budget_progress_scenario() {
        let b = budget("200", Some("Food"));
        let txns = vec![txn("50", Some("Food and Drink"), "2024-03-01")];
        let with = with_spent(b, &txns);
        assert_eq!(with.spent, Decimal::from(50));

        let percent = progress_percent(with.spent, with.budget.amount);
        assert_eq!(percent, 25);
        assert_eq!(progress_color(percent), ProgressColor::Ok);
    }

    #[test]
    fn progress_percent_clamps_and_rounds() {
        let amount = Decimal::from(100);
        assert_eq!(progress_percent(Decimal::from(250), amount), 100);
        assert_eq!(progress_percent("69.4".parse().unwrap(), amount), 69);
        assert_eq!(progress_percent("69.5".parse().unwrap(), amount), 70);
        assert_eq!(progress_percent(Decimal::ZERO, amount), 0);
    }

    #[test]
    fn progress_percent_zero_limit_is_zero() {
        assert_eq!(progress_percent(Decimal::from(50), Decimal::ZERO), 0);
        assert_eq!(progress_percent(Decimal::from(50), Decimal::from(-10)), 0);
    }

    #[test]
    fn progress_color_thresholds() {
        assert_eq!(progress_color(0), ProgressColor::Ok);
        assert_eq!(progress_color(69), ProgressColor::Ok);
        assert_eq!(progress_color(70), ProgressColor::Warning);
        assert_eq!(progress_color(89), ProgressColor::Warning);
        assert_eq!(progress_color(90), ProgressColor::Danger);
        assert_eq!(progress_color(100), ProgressColor::Danger);
    }

    #[test]
    fn recent_transactions_sorts_descending_and_truncates() {
        let txns = vec![
            txn("1", None, "2024-03-01"),
            txn("2", None, "2024-03-05"),
            txn("3", None, "2024-03-03"),
        ];
        let recent = recent_transactions(&txns, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].amount, Decimal::from(2));
        assert_eq!(recent[1].amount, Decimal::from(3));
    }

    #[test]
    fn recent_transactions_keeps_tie_order_stable() {
        let txns = vec![
            txn("1", None, "2024-03-05"),
            txn("2", None, "2024-03-05"),
            txn("3", None, "2024-03-05"),
        ];
        let recent = recent_transactions(&txns, 10);
        let amounts: Vec<Decimal> = recent.iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![Decimal::from(1), Decimal::from(2), Decimal::from(3)]
        );
    }

    #[test]
    fn summarize_composes_all_metrics() {
        let accounts = vec![account("1000.00"), account("-250.50")];
        let txns = vec![
            txn("50", Some("Food, Restaurants"), "2024-03-01"),
            txn("-2000", None, "2024-03-01"),
        ];
        let month_txns = txns.clone();
        let budgets = vec![budget("200", Some("Food"))];

        let summary = summarize(accounts, txns, budgets, &month_txns);

        assert_eq!(summary.total_balance, "749.50".parse().unwrap());
        assert_eq!(summary.income, Decimal::from(2000));
        assert_eq!(summary.expenses, Decimal::from(50));
        assert_eq!(summary.spending_by_category["Food"], Decimal::from(50));
        assert_eq!(summary.monthly_data[2], Decimal::from(50));
        assert_eq!(summary.recent_transactions.len(), 2);
        assert_eq!(summary.budgets[0].spent, Decimal::from(50));
    }

    #[test]
    fn summary_serializes_load_bearing_field_names() {
        let summary = summarize(vec![], vec![], vec![], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        for field in [
            "accounts",
            "totalBalance",
            "income",
            "expenses",
            "recentTransactions",
            "spendingByCategory",
            "budgets",
            "monthlyData",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["monthlyData"].as_array().unwrap().len(), 12);
    }
}
