use std::sync::Arc;
use std::time::Duration;

use tutor_core::{PersonaTemplate, PromptStrategy};
use tutor_llm::TextGenerator;

/// Read-only state shared by every request.
pub struct TutorState {
    pub generator: Arc<dyn TextGenerator>,
    pub persona: PersonaTemplate,
    pub strategy: PromptStrategy,
    pub timeout: Duration,
}

impl TutorState {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        persona: PersonaTemplate,
        strategy: PromptStrategy,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            persona,
            strategy,
            timeout,
        }
    }
}
