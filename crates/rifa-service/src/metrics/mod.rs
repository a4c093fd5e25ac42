//! Dashboard metrics aggregation.

pub mod service;

pub use service::{DashboardMetrics, MetricsService};
