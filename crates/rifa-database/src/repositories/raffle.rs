//! Raffle repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use rifa_core::error::{AppError, ErrorKind};
use rifa_core::result::AppResult;
use rifa_entity::raffle::model::{CreateRaffle, Raffle, UpdateRaffle, DEFAULT_CURRENCY, TOTAL_NUMBERS};

/// Repository for raffle CRUD and reporting queries.
#[derive(Debug, Clone)]
pub struct RaffleRepository {
    pool: PgPool,
}

impl RaffleRepository {
    /// Create a new raffle repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a raffle by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Raffle>> {
        sqlx::query_as::<_, Raffle>("SELECT * FROM raffles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find raffle", e))
    }

    /// List all raffles, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Raffle>> {
        sqlx::query_as::<_, Raffle>("SELECT * FROM raffles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list raffles", e))
    }

    /// Create a new raffle. The number space is always 1000 slots.
    pub async fn create(&self, data: &CreateRaffle) -> AppResult<Raffle> {
        sqlx::query_as::<_, Raffle>(
            "INSERT INTO raffles (title, description, image_url, price, currency, end_date, total_numbers) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(data.price)
        .bind(data.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
        .bind(data.end_date)
        .bind(TOTAL_NUMBERS)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create raffle", e))
    }

    /// Update an existing raffle's editable fields.
    ///
    /// `total_numbers` is never part of the update; it is constant for the
    /// lifetime of the raffle. Returns `None` when the raffle does not exist.
    pub async fn update(&self, id: Uuid, data: &UpdateRaffle) -> AppResult<Option<Raffle>> {
        sqlx::query_as::<_, Raffle>(
            "UPDATE raffles SET title = $2, description = $3, image_url = $4, price = $5, \
             currency = $6, end_date = $7 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.image_url)
        .bind(data.price)
        .bind(data.currency.as_deref().unwrap_or(DEFAULT_CURRENCY))
        .bind(data.end_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update raffle", e))
    }

    /// Count raffles whose draw has not yet closed.
    pub async fn count_active(&self, now: DateTime<Utc>) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM raffles WHERE end_date > $1")
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count active raffles", e)
            })
    }
}
