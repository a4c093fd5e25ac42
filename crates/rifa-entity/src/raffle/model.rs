//! Raffle entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The fixed size of every raffle's number space (`"000"` through `"999"`).
pub const TOTAL_NUMBERS: i32 = 1000;

/// Currency code assigned when a raffle is created without one.
pub const DEFAULT_CURRENCY: &str = "BCV";

/// A prize drawing with a fixed space of 1000 numbered entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Raffle {
    /// Unique raffle identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional promotional image URL.
    pub image_url: Option<String>,
    /// Price per number.
    pub price: f64,
    /// Currency code (e.g. `"BCV"`, `"USD"`).
    pub currency: String,
    /// When the draw closes.
    pub end_date: DateTime<Utc>,
    /// Size of the number space. Fixed at creation, never updated.
    pub total_numbers: i32,
    /// When the raffle was created.
    pub created_at: DateTime<Utc>,
}

impl Raffle {
    /// Whether the draw is still open at the given instant.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_date > now
    }
}

/// Data required to create a new raffle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRaffle {
    /// Display title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional promotional image URL.
    pub image_url: Option<String>,
    /// Price per number.
    pub price: f64,
    /// Currency code. Defaults to [`DEFAULT_CURRENCY`] when absent.
    pub currency: Option<String>,
    /// When the draw closes.
    pub end_date: DateTime<Utc>,
}

/// Admin-editable raffle fields. `total_numbers` is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRaffle {
    /// Display title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Optional promotional image URL.
    pub image_url: Option<String>,
    /// Price per number.
    pub price: f64,
    /// Currency code. Defaults to [`DEFAULT_CURRENCY`] when absent.
    pub currency: Option<String>,
    /// When the draw closes.
    pub end_date: DateTime<Utc>,
}
