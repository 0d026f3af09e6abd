//! Hugging Face client that routes a prompt to the matching inference API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use tutor_core::{ModelConfig, Prompt, RawCompletion, TutorError};

use crate::chat::ChatClient;
use crate::probe::verify_token;
use crate::text::TextGenerationClient;
use crate::{TextGenerator, DEFAULT_HUB_URL, DEFAULT_INFERENCE_URL, DEFAULT_ROUTER_URL};

/// Connection settings for [`HuggingFaceClient::connect`].
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub token: String,
    pub model: ModelConfig,
    /// OpenAI-compatible base for message-pair prompts.
    pub router_url: String,
    /// Text-generation base for template prompts.
    pub inference_url: String,
    /// Hub base for the startup probe.
    pub hub_url: String,
    /// Per-request bound applied by the HTTP client.
    pub request_timeout: Duration,
    /// Verify the token against the Hub before returning from `connect`.
    pub startup_probe: bool,
}

impl HuggingFaceConfig {
    pub fn new(token: impl Into<String>, model: ModelConfig) -> Self {
        Self {
            token: token.into(),
            model,
            router_url: DEFAULT_ROUTER_URL.to_string(),
            inference_url: DEFAULT_INFERENCE_URL.to_string(),
            hub_url: DEFAULT_HUB_URL.to_string(),
            request_timeout: Duration::from_secs(60),
            startup_probe: true,
        }
    }
}

/// Long-lived client for both Hugging Face inference APIs.
///
/// Built once at startup; both inner clients share one connection pool.
pub struct HuggingFaceClient {
    chat: ChatClient,
    text: TextGenerationClient,
    model: String,
}

impl HuggingFaceClient {
    /// Builds the client, failing fast on a missing token or, when the probe is
    /// enabled, on an unreachable endpoint or rejected token.
    pub async fn connect(config: HuggingFaceConfig) -> Result<Self, TutorError> {
        if config.token.trim().is_empty() {
            return Err(TutorError::MissingToken);
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TutorError::Config(format!("failed to build HTTP client: {}", e)))?;

        if config.startup_probe {
            verify_token(&http, &config.hub_url, &config.token).await?;
        }

        info!(
            "HuggingFaceClient: model={}, token_len={}",
            config.model.model,
            config.token.len()
        );

        let chat = ChatClient::new(
            http.clone(),
            &config.router_url,
            &config.token,
            config.model.clone(),
        );
        let text = TextGenerationClient::new(
            http,
            &config.inference_url,
            &config.token,
            config.model.clone(),
        );

        Ok(Self {
            chat,
            text,
            model: config.model.model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(&self, prompt: &Prompt) -> Result<RawCompletion, TutorError> {
        match prompt {
            Prompt::Messages(messages) => self.chat.chat(messages).await,
            Prompt::Template(text) => self.text.generate_text(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tutor_core::{PersonaTemplate, PromptStrategy};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer, token: &str) -> HuggingFaceConfig {
        HuggingFaceConfig {
            router_url: format!("{}/v1", server.uri()),
            inference_url: server.uri(),
            hub_url: server.uri(),
            ..HuggingFaceConfig::new(token, ModelConfig::default())
        }
    }

    async fn mount_whoami(server: &MockServer, status: u16) {
        Mock::given(method("GET"))
            .and(path("/api/whoami-v2"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "name": "tester" })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_token() {
        let server = MockServer::start().await;
        let result = HuggingFaceClient::connect(test_config(&server, "  ")).await;
        assert!(matches!(result, Err(TutorError::MissingToken)));
    }

    #[tokio::test]
    async fn test_connect_fails_when_probe_rejected() {
        let server = MockServer::start().await;
        mount_whoami(&server, 401).await;
        let result = HuggingFaceClient::connect(test_config(&server, "hf_bad")).await;
        assert!(matches!(result, Err(TutorError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_connect_fails_when_unreachable() {
        let config = HuggingFaceConfig {
            hub_url: "http://127.0.0.1:1".into(),
            ..HuggingFaceConfig::new("hf_token", ModelConfig::default())
        };
        let result = HuggingFaceClient::connect(config).await;
        assert!(matches!(result, Err(TutorError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_connect_without_probe_skips_network() {
        let config = HuggingFaceConfig {
            hub_url: "http://127.0.0.1:1".into(),
            startup_probe: false,
            ..HuggingFaceConfig::new("hf_token", ModelConfig::default())
        };
        let client = HuggingFaceClient::connect(config).await.unwrap();
        assert_eq!(client.model(), tutor_core::DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_template_prompt_routes_to_text_generation() {
        let server = MockServer::start().await;
        mount_whoami(&server, 200).await;
        Mock::given(method("POST"))
            .and(path("/models/meta-llama/Llama-3.2-3B-Instruct"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "generated_text": "Stay hard." }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HuggingFaceClient::connect(test_config(&server, "hf_token")).await.unwrap();
        let prompt =
            PersonaTemplate::default().compose(PromptStrategy::Template, "What is recursion?");
        let raw = client.generate(&prompt).await.unwrap();
        assert_eq!(raw.normalize(), "Stay hard.");
    }
}
