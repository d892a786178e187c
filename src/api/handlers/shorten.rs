//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/a",
///   "alias": "my-link",   // optional, 3-20 of [A-Za-z0-9_-]
///   "expiresIn": 3600     // optional, seconds
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "shortUrl": "https://s.example.com/my-link" }
/// ```
///
/// # Errors
///
/// - `400` malformed body, invalid URL, alias format or expiry
/// - `409` alias already in use
/// - `500` code generation exhausted or store failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let record = state
        .link_service
        .create(
            &payload.long_url,
            payload.alias.as_deref(),
            payload.expires_in,
        )
        .await?;

    let short_url = state.link_service.short_url(&record.short_code);

    Ok((StatusCode::CREATED, Json(ShortenResponse { short_url })))
}
