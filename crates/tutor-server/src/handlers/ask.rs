use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::dto::{AskRequest, AskResponse};
use crate::error::AppError;
use crate::services::tutor;
use crate::state::TutorState;

/// POST /ask - Answer a question in the tutor persona.
pub async fn ask(
    State(state): State<Arc<TutorState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    info!("Received question: {:?}", req.question);

    let response = tutor::answer(&state, &req.question).await?;
    Ok(Json(AskResponse { response }))
}
