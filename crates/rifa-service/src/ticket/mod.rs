//! Reservation transaction and ticket lifecycle.

pub mod service;

pub use service::{ReserveRequest, TicketDetail, TicketService};
