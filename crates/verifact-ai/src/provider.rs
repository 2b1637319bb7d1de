//! The LLM completion seam and the response shapes providers hand back.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error("model response contained no text")]
    EmptyResponse,
}

/// A black-box text-completion service.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, model: &str, prompt: &str) -> Result<ProviderResponse, LlmError>;
}

/// Every response shape a provider is known to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderResponse {
    /// The provider already flattened the reply to plain text.
    Text(String),
    /// A `generateContent`-style body with candidates, content and parts.
    Candidates(GenerateContentResponse),
    /// Any other JSON body, kept whole.
    Other(Value),
}

impl ProviderResponse {
    /// Classify a decoded JSON body.
    pub fn from_json(value: Value) -> Self {
        if value.get("candidates").is_some_and(Value::is_array) {
            if let Ok(parsed) = serde_json::from_value::<GenerateContentResponse>(value.clone()) {
                return Self::Candidates(parsed);
            }
        }
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return Self::Text(text.to_string());
        }
        Self::Other(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidates_body_is_classified() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "hi"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        });
        let ProviderResponse::Candidates(resp) = ProviderResponse::from_json(body) else {
            panic!("expected candidates");
        };
        assert_eq!(resp.candidates.len(), 1);
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
        let content = resp.candidates[0].content.as_ref().unwrap();
        assert_eq!(content.parts[0].text.as_deref(), Some("hi"));
    }

    #[test]
    fn text_body_is_classified() {
        let resp = ProviderResponse::from_json(json!({"text": "plain reply"}));
        assert_eq!(resp, ProviderResponse::Text("plain reply".into()));
    }

    #[test]
    fn unknown_body_is_kept_whole() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert_eq!(
            ProviderResponse::from_json(body.clone()),
            ProviderResponse::Other(body)
        );
    }

    #[test]
    fn malformed_candidates_fall_through() {
        let body = json!({"candidates": [{"content": "not an object"}]});
        assert!(matches!(
            ProviderResponse::from_json(body),
            ProviderResponse::Other(_)
        ));
    }
}
