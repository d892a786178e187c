//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Read the link record from the store
/// 2. Queue a click increment for the background worker (not awaited)
/// 3. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist or has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state.link_service.resolve(&code).await?;

    let location = location_header(&long_url)?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value.
///
/// The stored URL is sent as is when it is already a valid URI reference.
/// Otherwise (spaces, non-ASCII, characters that must be escaped) the
/// percent-encoded serialisation from the `url` crate is sent instead.
fn location_header(long_url: &str) -> Result<HeaderValue, AppError> {
    if is_uri_safe(long_url)
        && let Ok(value) = HeaderValue::from_str(long_url)
    {
        return Ok(value);
    }

    Url::parse(long_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                format!("Stored URL cannot be used as a redirect target: {}", long_url),
                Value::Null,
            )
        })
}

/// Printable ASCII without the characters a URI never carries unescaped.
fn is_uri_safe(url: &str) -> bool {
    url.bytes()
        .all(|b| b.is_ascii_graphic() && !b"\"<>\\^`{|}".contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_header_plain_url() {
        let value = location_header("https://example.com/a?b=c").unwrap();
        assert_eq!(value, "https://example.com/a?b=c");
    }

    #[test]
    fn test_location_header_encodes_non_ascii() {
        let value = location_header("https://example.com/straße").unwrap();
        assert_eq!(value, "https://example.com/stra%C3%9Fe");
    }

    #[test]
    fn test_location_header_encodes_space() {
        let value = location_header("https://example.com/a b?q=c d").unwrap();
        assert_eq!(value, "https://example.com/a%20b?q=c%20d");
    }
}
