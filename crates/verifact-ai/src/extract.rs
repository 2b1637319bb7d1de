//! Reply text extraction.
//!
//! Strategies run in a fixed priority order; the first one producing
//! non-blank text wins. Running out of strategies is its own outcome.

use crate::provider::{GenerateContentResponse, ProviderResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// The response's own text: flattened text, a top-level `text` field, or
    /// all parts of a sole candidate joined together.
    DirectText,
    /// The first textual part of the first candidate.
    CandidateParts,
    /// The whole response rendered as a string. This is the provider
    /// envelope rather than model text, so [`VerdictEngine`](crate::VerdictEngine)
    /// returns it as `RawVerdict::Unparsed` without JSON parsing.
    Stringified,
}

/// Strategies in the order they are tried.
pub const STRATEGIES: [ExtractStrategy; 3] = [
    ExtractStrategy::DirectText,
    ExtractStrategy::CandidateParts,
    ExtractStrategy::Stringified,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found {
        strategy: ExtractStrategy,
        text: String,
    },
    Exhausted,
}

pub fn extract_text(response: &ProviderResponse) -> Extraction {
    STRATEGIES
        .iter()
        .find_map(|&strategy| {
            apply(strategy, response)
                .filter(|text| !text.trim().is_empty())
                .map(|text| Extraction::Found { strategy, text })
        })
        .unwrap_or(Extraction::Exhausted)
}

fn apply(strategy: ExtractStrategy, response: &ProviderResponse) -> Option<String> {
    match (strategy, response) {
        (ExtractStrategy::DirectText, ProviderResponse::Text(text)) => Some(text.clone()),
        (ExtractStrategy::DirectText, ProviderResponse::Candidates(resp)) => sole_candidate_text(resp),
        (ExtractStrategy::DirectText, ProviderResponse::Other(value)) => {
            value.get("text").and_then(|t| t.as_str()).map(str::to_string)
        }
        (ExtractStrategy::CandidateParts, ProviderResponse::Candidates(resp)) => {
            first_part_text(resp)
        }
        (ExtractStrategy::CandidateParts, _) => None,
        (ExtractStrategy::Stringified, ProviderResponse::Text(text)) => Some(text.clone()),
        (ExtractStrategy::Stringified, ProviderResponse::Candidates(resp)) => {
            serde_json::to_string(resp).ok()
        }
        (ExtractStrategy::Stringified, ProviderResponse::Other(value)) => {
            (!value.is_null()).then(|| value.to_string())
        }
    }
}

/// All text parts of the only candidate, concatenated.
fn sole_candidate_text(resp: &GenerateContentResponse) -> Option<String> {
    let [candidate] = resp.candidates.as_slice() else {
        return None;
    };
    let parts = &candidate.content.as_ref()?.parts;
    let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
    Some(text)
}

fn first_part_text(resp: &GenerateContentResponse) -> Option<String> {
    resp.candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .iter()
        .find_map(|p| p.text.clone())
}
