//! Verdict engine: one bounded LLM call per claim, never fatal to the caller.

use std::time::Duration;

use tracing::{info, warn};
use verifact_core::{Claim, Config, RawVerdict, Snippet};

use crate::extract::{ExtractStrategy, Extraction, extract_text};
use crate::parse::parse_reply;
use crate::prompt::build_prompt;
use crate::provider::{LlmError, LlmProvider};

/// Judges claims against evidence with an [`LlmProvider`].
pub struct VerdictEngine<P> {
    provider: P,
    model: String,
    timeout: Duration,
}

impl<P: LlmProvider> VerdictEngine<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            timeout: config.llm_timeout,
        }
    }

    /// Ask the model for a verdict on `claim` given `evidence`.
    ///
    /// Makes exactly one provider call. Failures, timeouts and empty replies
    /// come back as [`RawVerdict::ProviderError`]; replies that are not JSON
    /// come back as [`RawVerdict::Unparsed`].
    pub async fn verify(&self, claim: &Claim, evidence: &[Snippet]) -> RawVerdict {
        let prompt = build_prompt(claim, evidence);

        let call = self.provider.generate(&self.model, &prompt);
        let response = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return provider_error(e),
            Err(_) => return provider_error(LlmError::Timeout(self.timeout)),
        };

        match extract_text(&response) {
            // The stringified envelope is not a model reply; surface it as-is.
            Extraction::Found {
                strategy: ExtractStrategy::Stringified,
                text,
            } => {
                warn!("no model text in response, returning raw envelope");
                RawVerdict::Unparsed {
                    raw_response: text.trim().to_string(),
                }
            }
            Extraction::Found { strategy, text } => {
                let verdict = parse_reply(&text);
                info!(
                    ?strategy,
                    parsed = matches!(verdict, RawVerdict::Structured(_)),
                    "model reply received"
                );
                verdict
            }
            Extraction::Exhausted => provider_error(LlmError::EmptyResponse),
        }
    }
}

fn provider_error(e: LlmError) -> RawVerdict {
    warn!(error = %e, "verdict request failed");
    RawVerdict::ProviderError {
        error: format!("API request failed: {e}"),
    }
}
