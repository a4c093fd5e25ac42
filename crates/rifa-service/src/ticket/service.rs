//! Ticket operations — the reservation transaction, status transitions,
//! and lookups.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use rifa_core::error::AppError;
use rifa_core::result::AppResult;
use rifa_database::repositories::raffle::RaffleRepository;
use rifa_database::repositories::ticket::TicketRepository;
use rifa_entity::number::is_valid_number;
use rifa_entity::ticket::model::{CreateTicket, Ticket, TicketWithNumbers};
use rifa_entity::ticket::status::TicketStatus;

/// A customer's reservation submission.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReserveRequest {
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
    /// The chosen three-digit numbers, distinct.
    pub numbers: Vec<String>,
    /// Total amount owed, computed by the caller.
    pub total_amount: f64,
}

/// A ticket with its numbers and the owning raffle's title, as served to
/// the confirmation page.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TicketDetail {
    /// The ticket and its numbers.
    #[serde(flatten)]
    pub ticket: TicketWithNumbers,
    /// Title of the raffle the ticket belongs to.
    pub raffle_title: String,
}

/// Handles reservations and ticket lifecycle operations.
#[derive(Debug, Clone)]
pub struct TicketService {
    /// Ticket repository.
    ticket_repo: Arc<TicketRepository>,
    /// Raffle repository.
    raffle_repo: Arc<RaffleRepository>,
}

impl TicketService {
    /// Creates a new ticket service.
    pub fn new(ticket_repo: Arc<TicketRepository>, raffle_repo: Arc<RaffleRepository>) -> Self {
        Self {
            ticket_repo,
            raffle_repo,
        }
    }

    /// The reservation transaction.
    ///
    /// Validates the request, checks the chosen numbers against the
    /// raffle's taken set, and commits the ticket plus its number claims
    /// as one atomic unit. A conflict carries the exact contested numbers
    /// so the customer can re-pick only those.
    pub async fn reserve(&self, req: ReserveRequest) -> AppResult<Ticket> {
        validate_reserve_request(&req)?;

        self.raffle_repo
            .find_by_id(req.raffle_id)
            .await?
            .ok_or_else(|| AppError::not_found("Raffle not found"))?;

        // Pre-check outside the commit path: cheap, and rejects stale
        // selections without taking the raffle lock.
        let taken = self.ticket_repo.taken_numbers(req.raffle_id).await?;
        let conflicts = conflicting(&req.numbers, &taken);
        if !conflicts.is_empty() {
            warn!(
                raffle_id = %req.raffle_id,
                conflicts = conflicts.len(),
                "Reservation rejected: numbers already taken"
            );
            return Err(AppError::conflict("Some numbers are no longer available")
                .with_details(serde_json::json!({ "conflicting_numbers": conflicts })));
        }

        // The repository re-checks under the per-raffle lock, so a race
        // that slips past the pre-check still resolves to a conflict.
        let data = CreateTicket {
            raffle_id: req.raffle_id,
            full_name: req.full_name,
            email: req.email,
            phone: req.phone,
            cedula: req.cedula,
            total_amount: req.total_amount,
        };

        self.ticket_repo.reserve(&data, &req.numbers).await
    }

    /// Overwrites a ticket's status.
    ///
    /// The transition table currently permits every move, including
    /// un-rejecting; rejection frees the ticket's numbers only through
    /// the availability derivation.
    pub async fn update_status(&self, ticket_id: Uuid, status: TicketStatus) -> AppResult<Ticket> {
        let current = self
            .ticket_repo
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        if !current.status.can_transition_to(status) {
            return Err(AppError::validation(format!(
                "Cannot move ticket from {} to {status}",
                current.status
            )));
        }

        let ticket = self
            .ticket_repo
            .update_status(ticket_id, status)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        info!(ticket_id = %ticket.id, from = %current.status, to = %status, "Ticket status updated");

        Ok(ticket)
    }

    /// Fetches a ticket with its numbers and raffle title.
    pub async fn get(&self, ticket_id: Uuid) -> AppResult<TicketDetail> {
        let ticket = self
            .ticket_repo
            .find_by_id(ticket_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        let numbers = self.ticket_repo.numbers_for_ticket(ticket_id).await?;

        let raffle_title = self
            .raffle_repo
            .find_by_id(ticket.raffle_id)
            .await?
            .map(|r| r.title)
            .unwrap_or_else(|| "Rifa".to_string());

        Ok(TicketDetail {
            ticket: TicketWithNumbers { ticket, numbers },
            raffle_title,
        })
    }

    /// Lists a raffle's tickets with their numbers, newest first.
    pub async fn list_by_raffle(&self, raffle_id: Uuid) -> AppResult<Vec<TicketWithNumbers>> {
        self.ticket_repo.find_by_raffle(raffle_id).await
    }

    /// Counts a raffle's pending tickets.
    pub async fn pending_count(&self, raffle_id: Uuid) -> AppResult<i64> {
        self.ticket_repo
            .count_for_raffle(raffle_id, TicketStatus::Pending)
            .await
    }
}

/// Structural validation of a reservation request.
fn validate_reserve_request(req: &ReserveRequest) -> AppResult<()> {
    if req.full_name.trim().is_empty() {
        return Err(AppError::validation("Full name is required"));
    }
    if req.email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if req.numbers.is_empty() {
        return Err(AppError::validation("At least one number must be selected"));
    }
    if let Some(bad) = req.numbers.iter().find(|n| !is_valid_number(n)) {
        return Err(AppError::validation(format!(
            "'{bad}' is not a valid three-digit number"
        )));
    }
    let distinct: HashSet<&String> = req.numbers.iter().collect();
    if distinct.len() != req.numbers.len() {
        return Err(AppError::validation("Numbers must be distinct"));
    }
    Ok(())
}

/// The subset of `requested` already present in `taken`, preserving the
/// order the customer picked them in.
fn conflicting(requested: &[String], taken: &HashSet<String>) -> Vec<String> {
    requested
        .iter()
        .filter(|n| taken.contains(*n))
        .cloned()
        .collect()
}
