//! Raffle handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use rifa_entity::raffle::model::{CreateRaffle, Raffle, UpdateRaffle};
use rifa_service::raffle::service::RaffleDetail;

use crate::dto::request::{CreateRaffleRequest, UpdateRaffleRequest};
use crate::error::ApiError;
use crate::dto::response::{ApiResponse, AvailabilityResponse};
use crate::state::AppState;

/// GET /api/raffles
pub async fn list_raffles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<RaffleDetail>>>, ApiError> {
    let raffles = state.raffle_service.list().await?;
    Ok(Json(ApiResponse::ok(raffles)))
}

/// POST /api/raffles
pub async fn create_raffle(
    State(state): State<AppState>,
    Json(req): Json<CreateRaffleRequest>,
) -> Result<Json<ApiResponse<Raffle>>, ApiError> {
    let raffle = state
        .raffle_service
        .create(CreateRaffle {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
            price: req.price,
            currency: req.currency,
            end_date: req.end_date,
        })
        .await?;

    Ok(Json(ApiResponse::ok(raffle)))
}

/// GET /api/raffles/{id}
pub async fn get_raffle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RaffleDetail>>, ApiError> {
    let raffle = state.raffle_service.get(id).await?;
    Ok(Json(ApiResponse::ok(raffle)))
}

/// PUT /api/raffles/{id}
pub async fn update_raffle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRaffleRequest>,
) -> Result<Json<ApiResponse<Raffle>>, ApiError> {
    let raffle = state
        .raffle_service
        .update(
            id,
            UpdateRaffle {
                title: req.title,
                description: req.description,
                image_url: req.image_url,
                price: req.price,
                currency: req.currency,
                end_date: req.end_date,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(raffle)))
}

/// GET /api/raffles/{id}/availability
pub async fn get_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError> {
    let taken = state.raffle_service.availability(id).await?;

    let mut taken_numbers: Vec<String> = taken.into_iter().collect();
    taken_numbers.sort();

    Ok(Json(ApiResponse::ok(AvailabilityResponse { taken_numbers })))
}
