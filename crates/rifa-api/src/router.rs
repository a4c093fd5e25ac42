//! Route definitions for the Rifa HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(raffle_routes())
        .merge(ticket_routes())
        .merge(metrics_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Raffle CRUD and availability
fn raffle_routes() -> Router<AppState> {
    Router::new()
        .route("/raffles", get(handlers::raffle::list_raffles))
        .route("/raffles", post(handlers::raffle::create_raffle))
        .route("/raffles/{id}", get(handlers::raffle::get_raffle))
        .route("/raffles/{id}", put(handlers::raffle::update_raffle))
        .route(
            "/raffles/{id}/availability",
            get(handlers::raffle::get_availability),
        )
        .route(
            "/raffles/{id}/tickets",
            get(handlers::ticket::list_raffle_tickets),
        )
        .route(
            "/raffles/{id}/tickets/pending-count",
            get(handlers::ticket::pending_ticket_count),
        )
}

/// Reservation and ticket lifecycle
fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(handlers::ticket::create_ticket))
        .route("/tickets/{id}", get(handlers::ticket::get_ticket))
        .route(
            "/tickets/{id}/status",
            put(handlers::ticket::update_ticket_status),
        )
}

/// Admin dashboard metrics
fn metrics_routes() -> Router<AppState> {
    Router::new().route(
        "/metrics/dashboard",
        get(handlers::metrics::dashboard_metrics),
    )
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
