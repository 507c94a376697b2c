//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires a `DATABASE_URL` environment variable (reads .env). Prints the
//! demo user id to pass in the `X-User-Id` header.

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Fixed id for the demo user so reseeding stays idempotent.
const DEMO_USER_ID: Uuid = Uuid::from_u128(0x4117_6639_0000_0000_0000_0000_0000_0001);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    budgetrack::db::MIGRATOR.run(&pool).await?;

    println!("=== BudgeTrack Seed Script ===");

    let item_id = seed_link_item(&pool).await?;
    seed_accounts(&pool, item_id).await?;
    seed_transactions(&pool).await?;
    seed_budgets(&pool).await?;
    seed_categories(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Demo user id (X-User-Id header): {DEMO_USER_ID}");

    Ok(())
}

async fn seed_link_item(pool: &PgPool) -> anyhow::Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO link_items (user_id, item_id, access_token, status)
        VALUES ($1, 'demo-item', 'access-sandbox-demo', 'active')
        ON CONFLICT (item_id) DO UPDATE SET updated_at = now()
        RETURNING id
        "#,
    )
    .bind(DEMO_USER_ID)
    .fetch_one(pool)
    .await?;
    println!("[done] Link item ready");
    Ok(id)
}

async fn seed_accounts(pool: &PgPool, item_id: Uuid) -> anyhow::Result<()> {
    let accounts = vec![
        ("demo-checking", "Everyday Checking", "depository", "checking", "0000", "2430.25", "2450.25", None),
        ("demo-savings", "Rainy Day Savings", "depository", "savings", "1111", "8200.00", "8200.00", None),
        ("demo-credit", "Travel Rewards Card", "credit", "credit card", "2222", "1350.00", "-642.80", Some("5000.00")),
    ];

    for (account_id, name, kind, subtype, mask, available, current, limit) in accounts {
        sqlx::query(
            r#"
            INSERT INTO accounts (user_id, item_id, account_id, name, official_name,
                account_type, subtype, mask, balance_available, balance_current, balance_limit)
            VALUES ($1, $2, $3, $4, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (account_id) DO NOTHING
            "#,
        )
        .bind(DEMO_USER_ID)
        .bind(item_id)
        .bind(account_id)
        .bind(name)
        .bind(kind)
        .bind(subtype)
        .bind(mask)
        .bind(available.parse::<Decimal>()?)
        .bind(current.parse::<Decimal>()?)
        .bind(limit.map(|l| l.parse::<Decimal>()).transpose()?)
        .execute(pool)
        .await?;
    }

    println!("[done] Created 3 sample accounts");
    Ok(())
}

async fn seed_transactions(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE user_id = $1")
        .bind(DEMO_USER_ID)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] Transactions already exist ({count})");
        return Ok(());
    }

    let today = Utc::now().date_naive();

    // (days ago, amount, name, merchant, category path)
    let recent: Vec<(i64, &str, &str, Option<&str>, Option<&str>)> = vec![
        (1, "12.40", "Blue Bottle Coffee", Some("Blue Bottle"), Some("Food and Drink, Coffee Shop")),
        (2, "84.19", "Whole Foods Market", Some("Whole Foods"), Some("Food and Drink, Groceries")),
        (3, "-2450.00", "ACME Corp Payroll", None, Some("Transfer, Payroll")),
        (4, "45.00", "Shell Gas", Some("Shell"), Some("Travel, Gas Stations")),
        (6, "15.99", "Netflix", Some("Netflix"), Some("Service, Subscription")),
        (8, "132.57", "Trader Joe's", Some("Trader Joe's"), Some("Food and Drink, Groceries")),
        (9, "28.75", "Lyft Ride", Some("Lyft"), Some("Travel, Ride Share")),
        (12, "310.00", "Electric Bill", None, Some("Service, Utilities")),
        (14, "62.30", "Olive Garden", Some("Olive Garden"), Some("Food and Drink, Restaurants")),
        (17, "99.99", "Gym Membership", None, Some("Recreation, Gyms and Fitness Centers")),
        (19, "23.18", "Corner Deli", None, None),
        (21, "-120.00", "Venmo From Sam", None, Some("Transfer, Deposit")),
        (24, "540.00", "Flight to Denver", Some("United"), Some("Travel, Airlines")),
        (27, "76.42", "Safeway", Some("Safeway"), Some("Food and Drink, Groceries")),
    ];

    for (i, (days_ago, amount, name, merchant, category)) in recent.iter().enumerate() {
        insert_transaction(
            pool,
            &format!("demo-txn-{i}"),
            today - Duration::days(*days_ago),
            amount,
            name,
            *merchant,
            *category,
        )
        .await?;
    }

    // A few older months so the monthly chart has shape.
    let historical: Vec<(NaiveDate, &str, &str, Option<&str>)> = vec![
        (today - Duration::days(45), "410.12", "Costco Run", Some("Food and Drink, Groceries")),
        (today - Duration::days(75), "220.00", "Car Insurance", Some("Service, Insurance")),
        (today - Duration::days(105), "89.90", "REI", Some("Shops, Sporting Goods")),
    ];

    for (i, (date, amount, name, category)) in historical.iter().enumerate() {
        insert_transaction(
            pool,
            &format!("demo-txn-old-{i}"),
            *date,
            amount,
            name,
            None,
            *category,
        )
        .await?;
    }

    println!("[done] Created sample transactions");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn insert_transaction(
    pool: &PgPool,
    transaction_id: &str,
    date: NaiveDate,
    amount: &str,
    name: &str,
    merchant: Option<&str>,
    category: Option<&str>,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions (user_id, account_id, transaction_id, amount,
            date, name, merchant_name, category, pending, payment_channel)
        VALUES ($1, 'demo-checking', $2, $3, $4, $5, $6, $7, false, 'other')
        ON CONFLICT (transaction_id) DO NOTHING
        "#,
    )
    .bind(DEMO_USER_ID)
    .bind(transaction_id)
    .bind(amount.parse::<Decimal>()?)
    .bind(date)
    .bind(name)
    .bind(merchant)
    .bind(category)
    .execute(pool)
    .await?;
    Ok(())
}

async fn seed_budgets(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM budgets WHERE user_id = $1")
        .bind(DEMO_USER_ID)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] Budgets already exist ({count})");
        return Ok(());
    }

    let budgets = vec![
        ("Groceries", "400.00", Some("Groceries")),
        ("Eating Out", "200.00", Some("Food and Drink")),
        ("Travel", "600.00", Some("Travel")),
        ("Everything Else", "1500.00", None),
    ];

    for (name, amount, category) in budgets {
        sqlx::query("INSERT INTO budgets (user_id, name, amount, category) VALUES ($1, $2, $3, $4)")
            .bind(DEMO_USER_ID)
            .bind(name)
            .bind(amount.parse::<Decimal>()?)
            .bind(category)
            .execute(pool)
            .await?;
    }

    println!("[done] Created 4 sample budgets");
    Ok(())
}

async fn seed_categories(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE user_id = $1")
        .bind(DEMO_USER_ID)
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] Categories already exist ({count})");
        return Ok(());
    }

    let categories = vec![
        ("Groceries", "#22C55E", true),
        ("Dining", "#F97316", true),
        ("Travel", "#3B82F6", true),
        ("Utilities", "#A855F7", false),
    ];

    for (name, color, is_default) in categories {
        sqlx::query(
            "INSERT INTO categories (user_id, name, color, is_default) VALUES ($1, $2, $3, $4)",
        )
        .bind(DEMO_USER_ID)
        .bind(name)
        .bind(color)
        .bind(is_default)
        .execute(pool)
        .await?;
    }

    println!("[done] Created 4 sample categories");
    Ok(())
}
