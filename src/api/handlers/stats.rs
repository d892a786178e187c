//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::LinkStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns metadata and the click count of a short link.
///
/// Reading statistics does not count as a click.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or has expired.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let record = state.link_service.get_link(&code).await?;
    let short_url = state.link_service.short_url(&record.short_code);

    Ok(Json(LinkStatsResponse::from_record(record, short_url)))
}
