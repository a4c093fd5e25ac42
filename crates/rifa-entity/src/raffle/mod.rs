//! Raffle entity.

pub mod model;

pub use model::{CreateRaffle, Raffle, UpdateRaffle};
