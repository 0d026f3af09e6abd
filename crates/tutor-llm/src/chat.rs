//! Chat-completions client for message-pair prompts.

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use tracing::debug;
use tutor_core::{
    ChatMessage, GeneratedMessage, MessageRole, ModelConfig, RawCompletion, TutorError,
};

fn llm_error(e: OpenAIError) -> TutorError {
    TutorError::Llm(e.to_string())
}

fn to_request_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, TutorError> {
    let message: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(msg.content.as_str())
            .build()
            .map_err(llm_error)?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(msg.content.as_str())
            .build()
            .map_err(llm_error)?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(msg.content.as_str())
            .build()
            .map_err(llm_error)?
            .into(),
    };
    Ok(message)
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct ChatClient {
    client: Client<OpenAIConfig>,
    model: ModelConfig,
}

impl ChatClient {
    /// Creates a client for `api_base` that reuses `http` for every call.
    pub fn new(http: reqwest::Client, api_base: &str, token: &str, model: ModelConfig) -> Self {
        let config = OpenAIConfig::new().with_api_base(api_base).with_api_key(token);
        Self {
            client: Client::with_config(config).with_http_client(http),
            model,
        }
    }

    /// Sends the messages and returns one [`GeneratedMessage`] per choice.
    #[allow(deprecated)]
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<RawCompletion, TutorError> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()?;

        let temperature: f32 = match self.model.do_sample {
            true => 1.0,
            false => 0.0,
        };

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model.model)
            .messages(messages)
            .max_tokens(self.model.max_new_tokens)
            .temperature(temperature)
            .build()
            .map_err(llm_error)?;

        debug!("chat completion request: model={}", self.model.model);

        let response = self.client.chat().create(request).await.map_err(llm_error)?;

        let messages = response
            .choices
            .into_iter()
            .map(|choice| GeneratedMessage::new(choice.message.content.unwrap_or_default()))
            .collect();

        Ok(RawCompletion::Messages(messages))
    }
}
