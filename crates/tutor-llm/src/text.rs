//! Text-generation client for single-string prompts.

use reqwest::Client;
use serde::Serialize;
use tracing::debug;
use tutor_core::{ModelConfig, RawCompletion, TutorError};

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    do_sample: bool,
    repetition_penalty: f32,
    return_full_text: bool,
}

#[derive(Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

/// Client for the Hugging Face text-generation task endpoint.
pub struct TextGenerationClient {
    client: Client,
    url: String,
    token: String,
    model: ModelConfig,
}

impl TextGenerationClient {
    /// Creates a client posting to `{api_base}/models/{model}`.
    pub fn new(client: Client, api_base: &str, token: &str, model: ModelConfig) -> Self {
        let url = format!("{}/models/{}", api_base.trim_end_matches('/'), model.model);
        Self {
            client,
            url,
            token: token.to_string(),
            model,
        }
    }

    /// Sends the prompt and decodes whatever shape the endpoint returns.
    pub async fn generate_text(&self, inputs: &str) -> Result<RawCompletion, TutorError> {
        let request = TextGenerationRequest {
            inputs,
            parameters: Parameters {
                max_new_tokens: self.model.max_new_tokens,
                do_sample: self.model.do_sample,
                repetition_penalty: self.model.repetition_penalty,
                return_full_text: false,
            },
        };

        debug!("text generation request: url={}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| TutorError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::Llm(format!(
                "Hugging Face API error {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TutorError::Llm(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }
}
