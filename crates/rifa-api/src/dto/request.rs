//! Request DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rifa_entity::ticket::status::TicketStatus;

/// Body for POST /api/raffles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRaffleRequest {
    /// Display title.
    pub title: String,
    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional promotional image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Price per number.
    pub price: f64,
    /// Currency code; defaults to `"BCV"` when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// When the draw closes.
    pub end_date: DateTime<Utc>,
}

/// Body for PUT /api/raffles/{id}. The number space cannot be edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRaffleRequest {
    /// Display title.
    pub title: String,
    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional promotional image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Price per number.
    pub price: f64,
    /// Currency code; defaults to `"BCV"` when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// When the draw closes.
    pub end_date: DateTime<Utc>,
}

/// Body for POST /api/tickets — a reservation submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    /// The raffle being entered.
    pub raffle_id: Uuid,
    /// Purchaser full name.
    pub full_name: String,
    /// Purchaser email.
    pub email: String,
    /// Purchaser phone.
    #[serde(default)]
    pub phone: String,
    /// Purchaser national ID.
    #[serde(default)]
    pub cedula: String,
    /// The chosen three-digit numbers.
    pub numbers: Vec<String>,
    /// Total amount owed, computed by the caller.
    pub total_amount: f64,
}

/// Body for PUT /api/tickets/{id}/status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTicketStatusRequest {
    /// Target status. Deserialization rejects anything outside
    /// pending/paid/rejected.
    pub status: TicketStatus,
}
