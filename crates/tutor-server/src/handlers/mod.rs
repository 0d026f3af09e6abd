//! HTTP route handlers for the tutor server.

pub mod ask;

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::dto::ErrorResponse;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}
