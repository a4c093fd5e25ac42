//! Ticket status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment lifecycle status of a ticket.
///
/// `Pending` and `Paid` tickets reserve their numbers; `Rejected` tickets
/// release them (the availability derivation skips rejected tickets, the
/// numbers rows themselves are never touched).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Reservation submitted, payment not yet reviewed.
    Pending,
    /// Payment approved by an admin.
    Paid,
    /// Payment rejected; the ticket's numbers become available again.
    Rejected,
}

/// Transitions an admin may apply. Currently every non-identity pair is
/// allowed — an intentional mirror of the product behavior, kept as a
/// table so a stricter policy is a one-line-per-pair change.
const ALLOWED_TRANSITIONS: &[(TicketStatus, TicketStatus)] = &[
    (TicketStatus::Pending, TicketStatus::Paid),
    (TicketStatus::Pending, TicketStatus::Rejected),
    (TicketStatus::Paid, TicketStatus::Pending),
    (TicketStatus::Paid, TicketStatus::Rejected),
    (TicketStatus::Rejected, TicketStatus::Pending),
    (TicketStatus::Rejected, TicketStatus::Paid),
];

impl TicketStatus {
    /// Whether an admin may move a ticket from `self` to `to`.
    pub fn can_transition_to(self, to: TicketStatus) -> bool {
        self == to || ALLOWED_TRANSITIONS.contains(&(self, to))
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
