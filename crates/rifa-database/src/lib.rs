//! # rifa-database
//!
//! PostgreSQL access for the Rifa service: connection pool construction,
//! embedded migrations, and the raffle/ticket repositories.

pub mod connection;
pub mod migration;
pub mod repositories;
