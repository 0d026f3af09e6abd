//! Startup check that the Hub is reachable and accepts the token.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::info;
use tutor_core::TutorError;

#[derive(Deserialize)]
struct WhoAmI {
    name: Option<String>,
}

/// Calls `GET {hub_url}/api/whoami-v2` and returns the account name, if any.
pub async fn verify_token(
    client: &Client,
    hub_url: &str,
    token: &str,
) -> Result<Option<String>, TutorError> {
    let url = format!("{}/api/whoami-v2", hub_url.trim_end_matches('/'));

    let response = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| TutorError::Unreachable(e.to_string()))?;

    let status = response.status();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        let body = response.text().await.unwrap_or_default();
        return Err(TutorError::Unauthorized(format!("{}: {}", status, body)));
    }
    if !status.is_success() {
        return Err(TutorError::Unreachable(format!("{} returned {}", url, status)));
    }

    let name = response.json::<WhoAmI>().await.ok().and_then(|w| w.name);
    info!("Hugging Face token verified (account: {})", name.as_deref().unwrap_or("unknown"));
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_verify_token_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/whoami-v2"))
            .and(header("authorization", "Bearer hf_good"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "goggins" })))
            .mount(&server)
            .await;

        let name = verify_token(&Client::new(), &server.uri(), "hf_good").await.unwrap();
        assert_eq!(name.as_deref(), Some("goggins"));
    }

    #[tokio::test]
    async fn test_verify_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/whoami-v2"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
            .mount(&server)
            .await;

        let err = verify_token(&Client::new(), &server.uri(), "hf_bad").await.unwrap_err();
        assert!(matches!(err, TutorError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_verify_token_unreachable() {
        let err = verify_token(&Client::new(), "http://127.0.0.1:1", "hf_any").await.unwrap_err();
        assert!(matches!(err, TutorError::Unreachable(_)));
    }
}
