//! Rifa Server — raffle ticket-sales web service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use rifa_core::config::AppConfig;
use rifa_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("RIFA_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Rifa server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = rifa_database::connection::create_pool(&config.database).await?;

    rifa_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Initialize repositories ──────────────────────────
    let raffle_repo = Arc::new(rifa_database::repositories::raffle::RaffleRepository::new(
        db_pool.clone(),
    ));
    let ticket_repo = Arc::new(rifa_database::repositories::ticket::TicketRepository::new(
        db_pool.clone(),
    ));

    // ── Step 3: Initialize services ──────────────────────────────
    let raffle_service = Arc::new(rifa_service::raffle::service::RaffleService::new(
        Arc::clone(&raffle_repo),
        Arc::clone(&ticket_repo),
    ));
    let ticket_service = Arc::new(rifa_service::ticket::service::TicketService::new(
        Arc::clone(&ticket_repo),
        Arc::clone(&raffle_repo),
    ));
    let metrics_service = Arc::new(rifa_service::metrics::service::MetricsService::new(
        Arc::clone(&raffle_repo),
        Arc::clone(&ticket_repo),
    ));

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = rifa_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        raffle_repo,
        ticket_repo,
        raffle_service,
        ticket_service,
        metrics_service,
    };

    let app = rifa_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Rifa server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    tracing::info!("Rifa server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
