//! Ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TicketStatus;

/// One purchaser's reservation record.
///
/// A ticket owns its claimed numbers exclusively; `ticket_numbers` rows
/// are created with the ticket and cascade-deleted with it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: Uuid,
    /// The raffle this ticket belongs to.
    pub raffle_id: Uuid,
    /// Purchaser full name.
    pub full_name: String,
    /// Purchaser email.
    pub email: String,
    /// Purchaser phone.
    pub phone: String,
    /// Purchaser national ID.
    pub cedula: String,
    /// Total amount owed, as computed by the caller
    /// (count of numbers x raffle price; not re-derived server-side).
    pub total_amount: f64,
    /// Payment lifecycle status.
    pub status: TicketStatus,
    /// When the reservation was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new ticket. Tickets are always born `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    /// The raffle being entered.
    pub raffle_id: Uuid,
    /// Purchaser full name.
    pub full_name: String,
    /// Purchaser email.
    pub email: String,
    /// Purchaser phone.
    pub phone: String,
    /// Purchaser national ID.
    pub cedula: String,
    /// Total amount owed.
    pub total_amount: f64,
}

/// A ticket together with its claimed numbers, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketWithNumbers {
    /// The ticket record.
    #[serde(flatten)]
    pub ticket: Ticket,
    /// The three-digit numbers claimed by this ticket.
    pub numbers: Vec<String>,
}
