//! Fallback for unmatched routes.

use serde_json::Value;

use crate::error::AppError;

/// Answers every unknown path with `404 {"code": "not_found", "message": ...}`.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Endpoint not found", Value::Null)
}
