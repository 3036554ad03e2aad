//! Error types for the admin web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::{DatabaseError, ValidationError};
use thiserror::Error;

/// Errors that can occur in the admin web interface.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database error.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Rejected input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AdminError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AdminError::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AdminError::Database(DatabaseError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            AdminError::Database(DatabaseError::Validation(_)) | AdminError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AdminError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AdminError::Database(DatabaseError::NotFound { .. }))
    }

    /// Whether the caller can fix this by changing the input.
    pub fn is_validation(&self) -> bool {
        self.status() == StatusCode::UNPROCESSABLE_ENTITY
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Request rejected");
        }

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
