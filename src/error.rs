//! HTTP boundary error translation.
//!
//! Every handler returns [`AppError`]. Domain failures are converted through
//! `From<LinkError>`, which is the single place where error kinds become status
//! codes. 5xx responses carry a generic message; the detail goes to the log.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::domain::errors::LinkError;

/// Message returned for any failure whose detail must stay server-side.
const INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// JSON error body: `{"code": ..., "message": ..., "details": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Unexpected failure. `message` is logged, never sent to the client.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing body, hiding internal detail.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            AppError::Validation { message, details } => ErrorBody {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorBody {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Conflict { message, details } => ErrorBody {
                code: "conflict",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Internal { .. } => ErrorBody {
                code: "internal_error",
                message: INTERNAL_MESSAGE.to_string(),
                details: Value::Null,
            },
        }
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        let message = e.to_string();
        match e {
            LinkError::InvalidInput(_) => AppError::bad_request(message, Value::Null),
            LinkError::AliasTaken(alias) => {
                AppError::conflict(message, json!({ "alias": alias }))
            }
            LinkError::NotFound => AppError::not_found(message, Value::Null),
            LinkError::GenerationExhausted(attempts) => {
                AppError::internal(message, json!({ "attempts": attempts }))
            }
            LinkError::StoreUnavailable(_) => AppError::internal(message, Value::Null),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(e.field_errors()).unwrap_or(Value::Null),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text(), Value::Null)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Internal { message, details } = &self {
            error!("🔥 [{}] {} {}", status.as_u16(), message, details);
        }

        (status, Json(self.to_error_body())).into_response()
    }
}
