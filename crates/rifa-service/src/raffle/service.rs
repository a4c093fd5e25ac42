//! Raffle management — creation, edits, listings, and the availability
//! query.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use rifa_core::error::AppError;
use rifa_core::result::AppResult;
use rifa_database::repositories::raffle::RaffleRepository;
use rifa_database::repositories::ticket::TicketRepository;
use rifa_entity::raffle::model::{CreateRaffle, Raffle, UpdateRaffle};

/// A raffle together with its derived taken-number set, as served to the
/// selection grid.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RaffleDetail {
    /// The raffle record.
    #[serde(flatten)]
    pub raffle: Raffle,
    /// Numbers currently unavailable for new selection, ascending.
    pub taken_numbers: Vec<String>,
}

/// Handles raffle CRUD and the availability derivation.
#[derive(Debug, Clone)]
pub struct RaffleService {
    /// Raffle repository.
    raffle_repo: Arc<RaffleRepository>,
    /// Ticket repository (availability is derived from tickets).
    ticket_repo: Arc<TicketRepository>,
}

impl RaffleService {
    /// Creates a new raffle service.
    pub fn new(raffle_repo: Arc<RaffleRepository>, ticket_repo: Arc<TicketRepository>) -> Self {
        Self {
            raffle_repo,
            ticket_repo,
        }
    }

    /// Creates a raffle. Title, a positive price, and an end date are
    /// required; the number space is fixed at 1000 slots by the
    /// repository.
    pub async fn create(&self, data: CreateRaffle) -> AppResult<Raffle> {
        validate_raffle_fields(&data.title, data.price)?;

        let raffle = self.raffle_repo.create(&data).await?;

        info!(raffle_id = %raffle.id, title = %raffle.title, "Raffle created");

        Ok(raffle)
    }

    /// Updates a raffle's editable fields. `total_numbers` cannot change.
    pub async fn update(&self, id: Uuid, data: UpdateRaffle) -> AppResult<Raffle> {
        validate_raffle_fields(&data.title, data.price)?;

        let raffle = self
            .raffle_repo
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Raffle not found"))?;

        info!(raffle_id = %raffle.id, "Raffle updated");

        Ok(raffle)
    }

    /// Fetches one raffle with its taken-number set.
    pub async fn get(&self, id: Uuid) -> AppResult<RaffleDetail> {
        let raffle = self
            .raffle_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Raffle not found"))?;

        let taken_numbers = sorted(self.ticket_repo.taken_numbers(id).await?);

        Ok(RaffleDetail {
            raffle,
            taken_numbers,
        })
    }

    /// Lists all raffles, newest first, each with its taken-number set.
    pub async fn list(&self) -> AppResult<Vec<RaffleDetail>> {
        let raffles = self.raffle_repo.find_all().await?;

        let mut details = Vec::with_capacity(raffles.len());
        for raffle in raffles {
            let taken_numbers = sorted(self.ticket_repo.taken_numbers(raffle.id).await?);
            details.push(RaffleDetail {
                raffle,
                taken_numbers,
            });
        }

        Ok(details)
    }

    /// The availability query: numbers currently unavailable for new
    /// selection in this raffle. Fails with `NotFound` for an unknown
    /// raffle and propagates read failures instead of masking them as an
    /// empty set.
    pub async fn availability(&self, raffle_id: Uuid) -> AppResult<HashSet<String>> {
        self.raffle_repo
            .find_by_id(raffle_id)
            .await?
            .ok_or_else(|| AppError::not_found("Raffle not found"))?;

        self.ticket_repo.taken_numbers(raffle_id).await
    }
}

fn validate_raffle_fields(title: &str, price: f64) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::validation("Price must be a positive number"));
    }
    Ok(())
}

fn sorted(numbers: HashSet<String>) -> Vec<String> {
    let mut numbers: Vec<String> = numbers.into_iter().collect();
    numbers.sort();
    numbers
}
