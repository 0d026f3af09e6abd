//! LLM client abstraction for the tutor service.
//!
//! [`TextGenerator`] is the seam the HTTP layer depends on.
//! [`HuggingFaceClient`] implements it against Hugging Face inference:
//!
//! - [`Prompt::Messages`] goes to the OpenAI-compatible router through
//!   `async-openai` ([`ChatClient`])
//! - [`Prompt::Template`] goes to the text-generation endpoint ([`TextGenerationClient`])

mod chat;
mod client;
mod probe;
mod text;

pub use chat::ChatClient;
pub use client::{HuggingFaceClient, HuggingFaceConfig};
pub use probe::verify_token;
pub use text::TextGenerationClient;

use async_trait::async_trait;
use tutor_core::{Prompt, RawCompletion, TutorError};

/// Default OpenAI-compatible chat-completions base.
pub const DEFAULT_ROUTER_URL: &str = "https://router.huggingface.co/v1";

/// Default text-generation inference base.
pub const DEFAULT_INFERENCE_URL: &str = "https://api-inference.huggingface.co";

/// Default Hub base used by the startup probe.
pub const DEFAULT_HUB_URL: &str = "https://huggingface.co";

/// Something that turns a prompt into generated text.
///
/// Implementations are shared across concurrent requests, so they must be
/// usable through `&self`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<RawCompletion, TutorError>;
}
