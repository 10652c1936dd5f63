use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::leaderboard::SubmitError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client.
    #[error("{0}")]
    InvalidInput(String),
    /// Unexpected failure outside of the caller's control.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SubmitError> for ServiceError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::BlankName => ServiceError::InvalidInput("Name is required".into()),
            SubmitError::NegativeScore(_) => ServiceError::InvalidInput("Invalid score".into()),
        }
    }
}

/// Fields whose messages are reported first, in this order, when several fail.
const FIELD_PRIORITY: [&str; 2] = ["name", "score"];

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        let fields = err.field_errors();
        let mut remaining: Vec<_> = fields
            .iter()
            .filter(|(field, _)| !FIELD_PRIORITY.iter().any(|name| *field == name))
            .collect();
        remaining.sort_by(|(a, _), (b, _)| a.cmp(b));

        let message = FIELD_PRIORITY
            .iter()
            .filter_map(|field| fields.get(*field).copied())
            .chain(remaining.into_iter().map(|(_, errors)| *errors))
            .flat_map(|errors| errors.iter())
            .find_map(|error| error.message.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| format!("validation failed: {err}"));
        AppError::BadRequest(message)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Internal(message) => AppError::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
