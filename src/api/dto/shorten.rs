//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
///
/// Field names follow the public JSON contract (`longUrl`, `alias`, `expiresIn`).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be absolute HTTP/HTTPS).
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub long_url: String,

    /// Optional caller-chosen short code. Format is checked by the link service.
    #[validate(length(max = 64, message = "Alias is too long"))]
    pub alias: Option<String>,

    /// Optional lifetime in seconds. After it elapses the link stops resolving.
    pub expires_in: Option<u64>,
}

/// Response for a created link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_url: String,
}
