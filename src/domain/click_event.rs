//! Click event model for asynchronous click counting.

use crate::domain::entities::LinkRecord;

/// A resolved redirect whose click still has to be counted.
///
/// Sent from the redirect path to the background worker over a bounded
/// channel, so the store increment never sits on the response path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub short_code: String,
}

impl ClickEvent {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }

    /// Store key of the clicked link.
    pub fn key(&self) -> String {
        LinkRecord::store_key(&self.short_code)
    }
}
