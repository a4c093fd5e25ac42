//! # rifa-entity
//!
//! Domain entity models for the Rifa raffle service: raffles, tickets,
//! ticket statuses, and the pure number domain (formatting and
//! availability classification of the 1000-slot number space).

pub mod number;
pub mod raffle;
pub mod ticket;
