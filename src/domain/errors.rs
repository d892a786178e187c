//! Domain error taxonomy for link creation and resolution.

use crate::domain::repositories::StoreError;

/// Failure of a link operation, tagged with its kind.
///
/// Each variant carries the classification the HTTP boundary needs; the
/// translation to status codes happens in [`crate::error::AppError`].
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Malformed URL, alias or expiry. The client fixes the input and retries.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested alias already names a link.
    #[error("Alias '{0}' is already in use")]
    AliasTaken(String),

    /// No live link exists for the short code.
    #[error("Short link not found or expired")]
    NotFound,

    /// Every generated candidate collided. The whole request may be retried.
    #[error("Could not generate a unique short code after {0} attempts")]
    GenerationExhausted(usize),

    /// The key-value store failed or timed out.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl LinkError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
