//! Maps the verdict engine's raw output into the caller-facing [`CheckResult`].
//!
//! Normalisation is a pure function of its inputs: the same evidence and raw
//! verdict always produce the same result.

use tracing::debug;

use crate::evidence::{Claim, Snippet};
use crate::verdict::{CheckResult, EvidenceItem, RawVerdict, Verdict};

/// Summary used when no page yielded any text.
pub const NO_EVIDENCE_SUMMARY: &str = "No evidence found.";

/// Summary used when the model's unparseable reply was empty.
pub const EMPTY_RESPONSE_SUMMARY: &str = "Model returned an empty response.";

/// Source label attached to every evidence entry.
pub const WEB_SOURCE: &str = "Web";

/// Normalise a raw verdict against the evidence it was judged on.
///
/// - No evidence: `Unclear` with [`NO_EVIDENCE_SUMMARY`], whatever `raw` holds.
/// - Provider error: `Unclear`, the error message as summary, no evidence.
/// - Unparsed reply: `Unclear`, the raw reply as summary, evidence echoed.
/// - Structured: mapped verdict, confidence / 100, explanation as summary,
///   every snippet echoed in order. The model's cited `sources` are not used
///   to filter the evidence list.
pub fn normalize(claim: &Claim, evidence: &[Snippet], raw: &RawVerdict) -> CheckResult {
    if evidence.is_empty() {
        debug!(claim = %claim, "no evidence, skipping verdict mapping");
        return CheckResult::unclear(NO_EVIDENCE_SUMMARY);
    }

    match raw {
        RawVerdict::ProviderError { error } => CheckResult::unclear(error.clone()),
        RawVerdict::Unparsed { raw_response } => {
            let summary = if raw_response.is_empty() {
                EMPTY_RESPONSE_SUMMARY.to_string()
            } else {
                raw_response.clone()
            };
            CheckResult {
                verdict: Verdict::Unclear,
                confidence: 0.0,
                summary,
                evidence: evidence_items(evidence),
            }
        }
        RawVerdict::Structured(judgement) => {
            let verdict = Verdict::from(&judgement.model_verdict());
            debug!(
                claim = %claim,
                verdict = verdict.as_str(),
                cited = judgement.sources.len(),
                "normalised structured verdict"
            );
            CheckResult {
                verdict,
                confidence: scale_confidence(judgement.confidence),
                summary: judgement.explanation.clone(),
                evidence: evidence_items(evidence),
            }
        }
    }
}

/// Convert a 0-100 score to the 0.0-1.0 scale. Non-finite scores become 0.0.
pub fn scale_confidence(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    (score / 100.0).clamp(0.0, 1.0)
}

fn evidence_items(evidence: &[Snippet]) -> Vec<EvidenceItem> {
    evidence
        .iter()
        .map(|s| EvidenceItem {
            source: WEB_SOURCE.to_string(),
            snippet: s.text.clone(),
            url: s.url.clone(),
        })
        .collect()
}
