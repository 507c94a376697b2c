use std::net::SocketAddr;

use budgetrack::config::AppConfig;
use budgetrack::provider::plaid::PlaidClient;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env().expect("Failed to load configuration");

    let pool =
        budgetrack::db::create_pool(&config.database_url, config.database_max_connections).await?;
    budgetrack::db::MIGRATOR.run(&pool).await?;

    let provider = PlaidClient::new(&config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(host = %addr, "Starting BudgeTrack API server");

    let state = budgetrack::AppState {
        db: pool,
        config,
        provider,
    };
    let app = budgetrack::routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
