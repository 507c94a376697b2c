//! Route definitions for the BudgeTrack API.

pub mod accounts;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod link;
pub mod transactions;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/dashboard", get(dashboard::summary))
        .route("/accounts", get(accounts::list))
        .route("/transactions", get(transactions::list))
        .route(
            "/transactions/{id}/category",
            put(transactions::update_category),
        )
        .route("/budgets", get(budgets::list).post(budgets::create))
        .route(
            "/budgets/{id}",
            put(budgets::update).delete(budgets::remove),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::remove),
        )
        .route("/link/token", post(link::create_token))
        .route("/link/exchange", post(link::exchange))
        .route("/link/sync", post(link::sync));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
