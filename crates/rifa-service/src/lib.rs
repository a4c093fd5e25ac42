//! # rifa-service
//!
//! Business logic for the Rifa raffle service. Services orchestrate the
//! repositories and own validation, the reservation conflict check, the
//! status-transition policy, and dashboard aggregation.

pub mod metrics;
pub mod raffle;
pub mod ticket;
