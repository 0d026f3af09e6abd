//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tutor_core::TutorError;

use crate::dto::ErrorResponse;

/// Message returned for any failed generation. Details stay in the logs.
pub const GENERIC_ERROR: &str = "Sorry, I couldn't process your request.";

/// Message returned when the model does not answer in time.
pub const TIMEOUT_ERROR: &str = "The tutor took too long to respond. Please try again.";

/// Per-request failures with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// The remote call failed; carries the detail for logging.
    Upstream(String),
    /// The remote call exceeded the bound, in milliseconds.
    Timeout(u64),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<TutorError> for AppError {
    fn from(e: TutorError) -> Self {
        match e {
            TutorError::Timeout(ms) => AppError::Timeout(ms),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            AppError::Upstream(_) => GENERIC_ERROR,
            AppError::Timeout(_) => TIMEOUT_ERROR,
        };
        (self.status(), Json(ErrorResponse::new(message))).into_response()
    }
}
