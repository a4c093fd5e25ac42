//! Raffle management and availability.

pub mod service;

pub use service::{RaffleDetail, RaffleService};
