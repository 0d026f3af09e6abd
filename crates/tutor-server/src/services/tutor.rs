//! Turns a question into the tutor's answer.

use tokio::time::timeout;
use tracing::{error, info};
use tutor_core::TutorError;

use crate::error::AppError;
use crate::state::TutorState;

/// Composes the prompt, calls the generator within the configured bound and
/// normalizes the result.
///
/// Every failure is logged with the question before it is returned.
pub async fn answer(state: &TutorState, question: &str) -> Result<String, AppError> {
    let prompt = state.persona.compose(state.strategy, question);
    let timeout_ms = state.timeout.as_millis() as u64;

    let result = timeout(state.timeout, state.generator.generate(&prompt))
        .await
        .unwrap_or(Err(TutorError::Timeout(timeout_ms)));

    match result {
        Ok(raw) => {
            let text = raw.normalize();
            info!("Response generated for question {:?} ({} chars)", question, text.len());
            Ok(text)
        }
        Err(e) => {
            error!("Error processing request for question {:?}: {}", question, e);
            Err(e.into())
        }
    }
}
