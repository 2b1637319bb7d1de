//! Gemini `generateContent` REST client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use verifact_core::Config;

use crate::provider::{LlmError, LlmProvider, ProviderResponse};

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GeminiClient {
    /// Create a client using the configured key, base URL and LLM timeout.
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.llm_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<ProviderResponse, LlmError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}]
        });

        info!(model, prompt_chars = prompt.len(), "requesting verdict from Gemini");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: Value = resp.json().await?;
        Ok(ProviderResponse::from_json(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verifact_fetch::stub::{Route, StubServer};

    const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn client_for(server: &StubServer) -> GeminiClient {
        let mut config = Config::new("test-key-123").unwrap();
        config.llm_base_url = format!("{}/", server.base_url());
        GeminiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn posts_prompt_and_classifies_candidates() {
        let server = StubServer::start(vec![Route::json(
            MODEL_PATH,
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"verdict\":\"SUPPORTED\"}"}],"role":"model"},"finishReason":"STOP"}]}"#,
        )])
        .await
        .unwrap();

        let resp = client_for(&server)
            .generate("gemini-2.5-flash", "Is the sky blue?")
            .await
            .unwrap();

        assert!(matches!(resp, ProviderResponse::Candidates(_)));
        let request = &server.requests()[0];
        assert!(request.starts_with(&format!("POST {MODEL_PATH}")));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key-123"));
        assert!(request.contains("Is the sky blue?"));
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let server = StubServer::start(vec![
            Route::json(
                MODEL_PATH,
                r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
            )
            .with_status(400),
        ])
        .await
        .unwrap();

        let err = client_for(&server)
            .generate("gemini-2.5-flash", "prompt")
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid. Please pass a valid API key.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_verbatim() {
        let server = StubServer::start(vec![
            Route::html(MODEL_PATH, "upstream unavailable").with_status(503),
        ])
        .await
        .unwrap();

        let err = client_for(&server)
            .generate("gemini-2.5-flash", "prompt")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "provider returned 503: upstream unavailable");
    }
}
