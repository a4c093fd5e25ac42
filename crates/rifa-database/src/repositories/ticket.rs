//! Ticket repository implementation.
//!
//! Holds the two queries the whole system leans on: the taken-set
//! derivation and the serialized reservation commit.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use rifa_core::error::{AppError, ErrorKind};
use rifa_core::result::AppResult;
use rifa_entity::ticket::model::{CreateTicket, Ticket, TicketWithNumbers};
use rifa_entity::ticket::status::TicketStatus;

/// Repository for ticket CRUD, availability derivation, and the
/// reservation commit.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))
    }

    /// The numbers claimed by one ticket, in ascending order.
    pub async fn numbers_for_ticket(&self, ticket_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT number FROM ticket_numbers WHERE ticket_id = $1 ORDER BY number",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load ticket numbers", e))
    }

    /// List a raffle's tickets with their numbers, newest first.
    pub async fn find_by_raffle(&self, raffle_id: Uuid) -> AppResult<Vec<TicketWithNumbers>> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT * FROM tickets WHERE raffle_id = $1 ORDER BY created_at DESC",
        )
        .bind(raffle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tickets", e))?;

        let rows: Vec<(Uuid, String)> = sqlx::query_as(
            "SELECT tn.ticket_id, tn.number FROM ticket_numbers tn \
             JOIN tickets t ON t.id = tn.ticket_id \
             WHERE t.raffle_id = $1 ORDER BY tn.number",
        )
        .bind(raffle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load ticket numbers", e))?;

        let mut by_ticket: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (ticket_id, number) in rows {
            by_ticket.entry(ticket_id).or_default().push(number);
        }

        Ok(tickets
            .into_iter()
            .map(|ticket| {
                let numbers = by_ticket.remove(&ticket.id).unwrap_or_default();
                TicketWithNumbers { ticket, numbers }
            })
            .collect())
    }

    /// The availability derivation: every number claimed by a non-rejected
    /// ticket of the raffle.
    ///
    /// Read failures propagate; returning an empty set on error would
    /// present occupied numbers as free to the reservation path.
    pub async fn taken_numbers(&self, raffle_id: Uuid) -> AppResult<HashSet<String>> {
        let numbers: Vec<String> = sqlx::query_scalar(
            "SELECT tn.number FROM ticket_numbers tn \
             JOIN tickets t ON t.id = tn.ticket_id \
             WHERE t.raffle_id = $1 AND t.status <> 'rejected'",
        )
        .bind(raffle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to derive taken numbers", e)
        })?;

        Ok(numbers.into_iter().collect())
    }

    /// Commit a reservation: one transaction that re-checks availability
    /// under a per-raffle advisory lock, inserts the ticket in `pending`
    /// status, and inserts its number claims.
    ///
    /// Two concurrent reservations for the same raffle serialize on the
    /// lock; the loser sees the winner's rows in the re-check and gets a
    /// `Conflict` carrying the contested numbers. Any insert failure rolls
    /// the whole transaction back, so no ticket without numbers can
    /// persist.
    pub async fn reserve(&self, data: &CreateTicket, numbers: &[String]) -> AppResult<Ticket> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Transaction-scoped lock keyed on the raffle id; released on
        // commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(data.raffle_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to acquire raffle lock", e)
            })?;

        let taken: Vec<String> = sqlx::query_scalar(
            "SELECT tn.number FROM ticket_numbers tn \
             JOIN tickets t ON t.id = tn.ticket_id \
             WHERE t.raffle_id = $1 AND t.status <> 'rejected'",
        )
        .bind(data.raffle_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to re-check taken numbers", e)
        })?;

        let taken: HashSet<String> = taken.into_iter().collect();
        let conflicts: Vec<&String> = numbers.iter().filter(|n| taken.contains(*n)).collect();
        if !conflicts.is_empty() {
            return Err(AppError::conflict("Some numbers are no longer available")
                .with_details(serde_json::json!({ "conflicting_numbers": conflicts })));
        }

        let ticket = sqlx::query_as::<_, Ticket>(
            "INSERT INTO tickets (raffle_id, full_name, email, phone, cedula, total_amount, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'pending') RETURNING *",
        )
        .bind(data.raffle_id)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.cedula)
        .bind(data.total_amount)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create ticket", e))?;

        sqlx::query(
            "INSERT INTO ticket_numbers (ticket_id, number) SELECT $1, UNNEST($2::text[])",
        )
        .bind(ticket.id)
        .bind(numbers)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create ticket numbers", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit reservation", e)
        })?;

        info!(
            ticket_id = %ticket.id,
            raffle_id = %data.raffle_id,
            numbers = numbers.len(),
            "Reservation committed"
        );

        Ok(ticket)
    }

    /// Overwrite a ticket's status. Returns `None` when the ticket does
    /// not exist. Number rows are untouched regardless of status.
    pub async fn update_status(
        &self,
        ticket_id: Uuid,
        status: TicketStatus,
    ) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(ticket_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update ticket status", e)
        })
    }

    /// Count a raffle's tickets in the given status.
    pub async fn count_for_raffle(
        &self,
        raffle_id: Uuid,
        status: TicketStatus,
    ) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE raffle_id = $1 AND status = $2")
            .bind(raffle_id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tickets", e))
    }

    /// Global count of tickets in the given status.
    pub async fn count_by_status(&self, status: TicketStatus) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tickets", e))
    }

    /// Count and summed amount of `paid` tickets created at or after
    /// `since`.
    pub async fn paid_totals_since(&self, since: DateTime<Utc>) -> AppResult<(i64, f64)> {
        sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(total_amount), 0)::float8 \
             FROM tickets WHERE status = 'paid' AND created_at >= $1",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to aggregate sales", e))
    }
}
