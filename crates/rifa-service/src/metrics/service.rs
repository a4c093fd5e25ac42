//! Read-side aggregation over raffles and tickets for the admin
//! dashboard. Recomputed on every request; nothing is cached.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime, Utc};
use chrono::offset::LocalResult;

use rifa_core::result::AppResult;
use rifa_database::repositories::raffle::RaffleRepository;
use rifa_database::repositories::ticket::TicketRepository;
use rifa_entity::ticket::status::TicketStatus;

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DashboardMetrics {
    /// Raffles whose draw has not yet closed.
    pub active_raffles: i64,
    /// Tickets awaiting payment review, across all raffles.
    pub pending_tickets: i64,
    /// Paid tickets created since local midnight.
    pub todays_sales_count: i64,
    /// Summed amount of those tickets.
    pub todays_sales_amount: f64,
}

/// Derives dashboard counters from the ticket and raffle stores.
#[derive(Debug, Clone)]
pub struct MetricsService {
    /// Raffle repository.
    raffle_repo: Arc<RaffleRepository>,
    /// Ticket repository.
    ticket_repo: Arc<TicketRepository>,
}

impl MetricsService {
    /// Creates a new metrics service.
    pub fn new(raffle_repo: Arc<RaffleRepository>, ticket_repo: Arc<TicketRepository>) -> Self {
        Self {
            raffle_repo,
            ticket_repo,
        }
    }

    /// Computes the dashboard counters. The "today" window starts at
    /// midnight in the server's local timezone.
    pub async fn dashboard(&self) -> AppResult<DashboardMetrics> {
        let active_raffles = self.raffle_repo.count_active(Utc::now()).await?;
        let pending_tickets = self
            .ticket_repo
            .count_by_status(TicketStatus::Pending)
            .await?;

        let since = local_day_start(Local::now());
        let (todays_sales_count, todays_sales_amount) =
            self.ticket_repo.paid_totals_since(since).await?;

        Ok(DashboardMetrics {
            active_raffles,
            pending_tickets,
            todays_sales_count,
            todays_sales_amount,
        })
    }
}

/// Midnight of `now`'s local calendar day, as a UTC instant.
///
/// A DST gap can make local midnight nonexistent; in that case the
/// current instant is used, which only narrows the window.
fn local_day_start(now: DateTime<Local>) -> DateTime<Utc> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match midnight.and_local_timezone(Local) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t.with_timezone(&Utc),
        LocalResult::None => now.with_timezone(&Utc),
    }
}
