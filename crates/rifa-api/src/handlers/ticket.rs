//! Ticket handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use rifa_entity::ticket::model::TicketWithNumbers;
use rifa_service::ticket::service::{ReserveRequest, TicketDetail};

use crate::dto::request::{CreateTicketRequest, UpdateTicketStatusRequest};
use crate::error::ApiError;
use crate::dto::response::{ApiResponse, CountResponse, ReserveResponse};
use crate::state::AppState;

/// POST /api/tickets — the reservation transaction.
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<Json<ApiResponse<ReserveResponse>>, ApiError> {
    let ticket = state
        .ticket_service
        .reserve(ReserveRequest {
            raffle_id: req.raffle_id,
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            cedula: req.cedula,
            numbers: req.numbers,
            total_amount: req.total_amount,
        })
        .await?;

    Ok(Json(ApiResponse::ok(ReserveResponse {
        ticket_id: ticket.id,
    })))
}

/// GET /api/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TicketDetail>>, ApiError> {
    let ticket = state.ticket_service.get(id).await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// PUT /api/tickets/{id}/status
pub async fn update_ticket_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTicketStatusRequest>,
) -> Result<Json<ApiResponse<rifa_entity::ticket::Ticket>>, ApiError> {
    let ticket = state.ticket_service.update_status(id, req.status).await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// GET /api/raffles/{id}/tickets
pub async fn list_raffle_tickets(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TicketWithNumbers>>>, ApiError> {
    let tickets = state.ticket_service.list_by_raffle(id).await?;
    Ok(Json(ApiResponse::ok(tickets)))
}

/// GET /api/raffles/{id}/tickets/pending-count
pub async fn pending_ticket_count(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.ticket_service.pending_count(id).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}
