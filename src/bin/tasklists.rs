//! Tasklists HTTP server.
//!
//! Serves the JSON API on `APP_HOST:APP_PORT`. When `DATABASE_URL` is set
//! the `PostgreSQL` store is used and its schema applied on start-up;
//! otherwise lists and tasks live in memory for the lifetime of the
//! process.

use axum::Router;
use mockable::DefaultClock;
use std::sync::Arc;
use tasklists::config::{AppConfig, ConfigError};
use tasklists::http::{AppState, create_router};
use tasklists::telemetry::{TelemetryError, init_tracing};
use tasklists::todo::adapters::memory::InMemoryTodoStore;
use tasklists::todo::adapters::postgres::{PostgresTodoStore, build_pool};
use tasklists::todo::ports::TodoRepositoryError;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("database pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database: {0}")]
    Repository(#[from] TodoRepositoryError),
    #[error("blocking task: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    let clock = Arc::new(DefaultClock);
    let app = match config.database_url.clone() {
        Some(url) => {
            let pool_size = config.database_pool_size;
            let pool = tokio::task::spawn_blocking(move || build_pool(&url, pool_size)).await??;
            let store = PostgresTodoStore::new(pool);
            store.migrate().await?;
            tracing::info!(pool_size, "using PostgreSQL store");
            create_router(AppState::new(
                Arc::new(store),
                clock,
                config.tasks_per_page,
            ))
        }
        None => {
            tracing::info!("DATABASE_URL unset, using in-memory store");
            create_router(AppState::new(
                Arc::new(InMemoryTodoStore::new()),
                clock,
                config.tasks_per_page,
            ))
        }
    };

    serve(app, &config.bind_address()).await
}

async fn serve(app: Router, address: &str) -> Result<(), StartupError> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!(%address, "tasklists listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("tasklists stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
