use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// A single rejected input field, addressed by its dotted path (`contact.phone`).
/// `code` names the failed rule (`required`, `length`, `regex`, `range`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationErrors {
    pub message: String,
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    #[cfg(test)]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Booking not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(v) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": v.message, "errors": v.errors }),
            ),
            AppError::NotFound(id) => {
                tracing::debug!(booking_id = %id, "booking not found");
                (
                    StatusCode::NOT_FOUND,
                    serde_json::json!({ "message": self.to_string() }),
                )
            }
            AppError::Persistence(e) => {
                tracing::error!(error = %e, "persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "message": "Database operation failed", "error": format!("{e:#}") }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
