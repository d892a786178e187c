//! Target URL validation.
//!
//! Only absolute `http`/`https` URLs with a host are accepted. The URL is
//! checked, not rewritten: callers store the string exactly as submitted.

use url::Url;

/// Longest accepted target URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL is longer than {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is a well-formed absolute HTTP(S) URL.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// See [`UrlValidationError`] for the individual rules.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/a").is_ok());
/// assert!(validate_long_url("not-a-url").is_err());
/// assert!(validate_long_url("ftp://example.com").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}
