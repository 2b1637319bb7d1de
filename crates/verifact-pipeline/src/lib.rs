//! Claim-check pipeline: claim → evidence → verdict → normalised result.
//!
//! [`FactChecker::check_fact`] is the single entry point for presentation
//! layers. It never fails for predictable problems (bad network, unusable
//! model reply, no evidence); those all become a valid [`CheckResult`].

use thiserror::Error;
use tracing::info;
use verifact_ai::{GeminiClient, LlmError, LlmProvider, VerdictEngine};
use verifact_core::normalize::NO_EVIDENCE_SUMMARY;
use verifact_core::{CheckResult, Claim, Config, ConfigError, EvidenceSet, RawVerdict, normalize};
use verifact_fetch::{EvidenceFetcher, FetchError, SearchError, SearchProvider, SearxSearch};

/// Summary returned when the statement is blank.
pub const NO_CLAIM_SUMMARY: &str = "No claim provided.";

/// Errors raised while wiring the pipeline together. Checking a claim never
/// produces one.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("building search client: {0}")]
    Search(#[from] SearchError),
    #[error("building page fetcher: {0}")]
    Fetch(#[from] FetchError),
    #[error("building LLM client: {0}")]
    Llm(#[from] LlmError),
}

/// Everything one check produced, including the pre-normalisation verdict.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub claim: Claim,
    pub evidence: EvidenceSet,
    /// `None` when the engine was not consulted (blank claim or no evidence).
    pub raw: Option<RawVerdict>,
    pub result: CheckResult,
}

/// The production pipeline: SearXNG search and the Gemini API.
pub type WebFactChecker = FactChecker<SearxSearch, GeminiClient>;

/// Fetcher, verdict engine and normaliser wired together.
pub struct FactChecker<S, P> {
    fetcher: EvidenceFetcher<S>,
    engine: VerdictEngine<P>,
    max_results: usize,
    char_limit: usize,
}

impl WebFactChecker {
    /// Build the production pipeline from `config`.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        config.validate()?;
        let search = SearxSearch::new(&config.search_url, &config.user_agent, config.fetch_timeout)?;
        let provider = GeminiClient::new(config)?;
        Self::new(search, provider, config)
    }
}

impl<S: SearchProvider, P: LlmProvider> FactChecker<S, P> {
    pub fn new(search: S, provider: P, config: &Config) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            fetcher: EvidenceFetcher::new(search, config)?,
            engine: VerdictEngine::new(provider, config),
            max_results: config.max_results,
            char_limit: config.char_limit,
        })
    }

    /// Check `statement` and return the normalised result.
    pub async fn check_fact(&self, statement: &str) -> CheckResult {
        self.inspect(statement).await.result
    }

    /// Check `statement`, keeping the evidence and raw verdict alongside the
    /// result.
    pub async fn inspect(&self, statement: &str) -> Inspection {
        let claim = Claim::new(statement);
        if claim.is_empty() {
            return Inspection {
                claim,
                evidence: Vec::new(),
                raw: None,
                result: CheckResult::unclear(NO_CLAIM_SUMMARY),
            };
        }

        info!(claim = %claim, "checking claim");
        let evidence = self
            .fetcher
            .fetch(&claim, self.max_results, self.char_limit)
            .await;

        if evidence.is_empty() {
            info!("no evidence found, skipping verdict engine");
            return Inspection {
                claim,
                evidence,
                raw: None,
                result: CheckResult::unclear(NO_EVIDENCE_SUMMARY),
            };
        }

        let raw = self.engine.verify(&claim, &evidence).await;
        let result = normalize(&claim, &evidence, &raw);
        info!(
            verdict = result.verdict.as_str(),
            confidence = result.confidence,
            evidence = result.evidence.len(),
            "claim checked"
        );

        Inspection {
            claim,
            evidence,
            raw: Some(raw),
            result,
        }
    }
}
