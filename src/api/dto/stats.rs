//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkRecord;

/// Metadata and click count of one short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatsResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkStatsResponse {
    pub fn from_record(record: LinkRecord, short_url: String) -> Self {
        Self {
            short_code: record.short_code,
            short_url,
            long_url: record.long_url,
            created_at: record.created_at,
            click_count: record.click_count,
            expires_at: record.expires_at,
        }
    }
}
