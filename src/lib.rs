pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod provider;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::provider::plaid::PlaidClient;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
    pub provider: PlaidClient,
}
