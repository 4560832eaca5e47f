//! Telemetry and status resources.

use axum::{extract::State, http::HeaderMap, Json};

use super::{authorization, ApiError};
use crate::app_state::AppState;
use crate::telemetry::{GatewayStatus, MetricsSnapshot};

/// Bearer-protected device snapshot.
pub async fn current_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MetricsSnapshot>, ApiError> {
    if let Err(e) = state.accounts().gate().resolve(authorization(&headers)) {
        state.metrics().gate_rejections.inc(&[("resource", "metrics")]);
        return Err(e.into());
    }
    Ok(Json(state.snapshot().clone()))
}

/// Unauthenticated.
pub async fn gateway_status(State(state): State<AppState>) -> Json<GatewayStatus> {
    Json(state.status().clone())
}
