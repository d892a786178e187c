//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: PING through the key-value store adapter
/// 2. **Click Queue**: Checks if channel is open and reports free capacity
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Store reachable" },
///     "clickQueue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let queue_check = check_click_queue(&state);

    let all_healthy = store_check.is_ok() && queue_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            click_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks store connectivity via PING.
async fn check_store(state: &AppState) -> CheckStatus {
    if state.store.health_check().await {
        CheckStatus::ok("Store reachable")
    } else {
        CheckStatus::error("Store unreachable")
    }
}

/// Checks if the click counting queue is operational.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.click_sender.capacity()))
    }
}
