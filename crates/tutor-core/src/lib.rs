//! Core domain types and error definitions for the tutor service.
//!
//! This crate holds everything that does not perform I/O:
//!
//! - [`TutorError`] — Error type for generation and startup failures
//! - [`ChatMessage`] and [`MessageRole`] — Chat message types
//! - [`ModelConfig`] — Hosted model selection and generation parameters
//! - [`PersonaTemplate`], [`PromptStrategy`] and [`Prompt`] — Prompt composition
//! - [`RawCompletion`] — The result shapes a generator may return, and their
//!   normalization into a single string
//!
//! # Example
//!
//! ```rust
//! use tutor_core::{PersonaTemplate, Prompt, PromptStrategy, RawCompletion};
//!
//! let persona = PersonaTemplate::default();
//! let prompt = persona.compose(PromptStrategy::Messages, "What is a closure?");
//! assert!(matches!(prompt, Prompt::Messages(ref m) if m.len() == 2));
//!
//! let raw = RawCompletion::Text("A closure captures its environment.".into());
//! assert_eq!(raw.normalize(), "A closure captures its environment.");
//! ```

mod completion;
mod persona;
mod prompt;

pub use completion::{GeneratedMessage, RawCompletion};
pub use persona::{PersonaTemplate, DEFAULT_PERSONA, DEFAULT_TEMPLATE, QUESTION_PLACEHOLDER};
pub use prompt::{Prompt, PromptStrategy};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while talking to the remote generation endpoint or while
/// assembling the process configuration.
#[derive(Error, Debug)]
pub enum TutorError {
    /// LLM API request failed.
    #[error("LLM request failed: {0}")]
    Llm(String),

    /// The endpoint answered with a body that could not be decoded.
    #[error("Failed to parse LLM response: {0}")]
    Parse(String),

    /// The outbound call did not finish within the configured bound.
    #[error("LLM request timed out after {0} ms")]
    Timeout(u64),

    /// No API token was supplied.
    #[error("Hugging Face API token is missing")]
    MissingToken,

    /// The endpoint rejected the API token.
    #[error("Hugging Face rejected the API token: {0}")]
    Unauthorized(String),

    /// The endpoint could not be reached.
    #[error("Hugging Face endpoint unreachable: {0}")]
    Unreachable(String),

    /// Invalid static configuration (persona template, URLs).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for TutorError {
    fn from(err: serde_json::Error) -> Self {
        TutorError::Parse(err.to_string())
    }
}

/// Role of a message in a chat prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Instructions that shape the model's behavior.
    System,
    /// Message from the user.
    User,
    /// Message from the assistant/LLM.
    Assistant,
}

/// A single message in a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }
}

/// The hosted model to call and how to sample from it.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Hugging Face repository id (e.g., "meta-llama/Llama-3.2-3B-Instruct").
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_new_tokens: u32,
    /// Sample instead of greedy decoding.
    pub do_sample: bool,
    /// Penalty applied to repeated tokens by the text-generation endpoint.
    pub repetition_penalty: f32,
}

/// Default model served by the tutor.
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.2-3B-Instruct";

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_new_tokens: 1024,
            do_sample: false,
            repetition_penalty: 1.03,
        }
    }
}
