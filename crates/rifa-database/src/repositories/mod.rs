//! Repository implementations.

pub mod raffle;
pub mod ticket;
