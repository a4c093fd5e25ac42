//! HTTP request handlers.

pub mod health;
pub mod metrics;
pub mod raffle;
pub mod ticket;
