//! Ticket entity.

pub mod model;
pub mod status;

pub use model::{CreateTicket, Ticket, TicketWithNumbers};
pub use status::TicketStatus;
