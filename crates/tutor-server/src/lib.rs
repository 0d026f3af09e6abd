//! HTTP surface of the tutor: `POST /ask`, `GET /health`, CORS and request tracing.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{ConfigError, CorsPolicy, ServerConfig};
pub use state::TutorState;

/// Builds the router. `/ask` is traced; `/health` is not.
pub fn build_app(state: Arc<TutorState>, cors: CorsLayer) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/ask", post(handlers::ask::ask))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .with_state(state)
}
