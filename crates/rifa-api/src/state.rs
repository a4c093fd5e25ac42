//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use rifa_core::config::AppConfig;
use rifa_database::repositories::raffle::RaffleRepository;
use rifa_database::repositories::ticket::TicketRepository;
use rifa_service::metrics::service::MetricsService;
use rifa_service::raffle::service::RaffleService;
use rifa_service::ticket::service::TicketService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// Raffle repository
    pub raffle_repo: Arc<RaffleRepository>,
    /// Ticket repository
    pub ticket_repo: Arc<TicketRepository>,

    /// Raffle service
    pub raffle_service: Arc<RaffleService>,
    /// Ticket service
    pub ticket_service: Arc<TicketService>,
    /// Metrics service
    pub metrics_service: Arc<MetricsService>,
}
