//! Admin dashboard metrics handler.

use axum::Json;
use axum::extract::State;

use rifa_service::metrics::service::DashboardMetrics;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/metrics/dashboard
pub async fn dashboard_metrics(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardMetrics>>, ApiError> {
    let metrics = state.metrics_service.dashboard().await?;
    Ok(Json(ApiResponse::ok(metrics)))
}
