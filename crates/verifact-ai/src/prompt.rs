//! Judgement prompt construction.

use verifact_core::{Claim, Snippet};

// ── Prompt template ──

const ROLE: &str = "You are a fact-checking assistant.";

const TASK: &str = "\
Task:
1. Decide if the claim is SUPPORTED, REFUTED, or NOT ENOUGH INFO based only on the evidence.
2. Give a short explanation (3-5 sentences).
3. Provide a confidence score (integer 0-100).
4. List the URLs of the evidence sources you relied on.

Respond ONLY in JSON with keys: \"verdict\", \"explanation\", \"confidence\", \"sources\".
Example:
{\"verdict\":\"SUPPORTED\",\"explanation\":\"...\",\"confidence\":85,\"sources\":[\"https://...\",\"https://...\"]}";

/// Build the single prompt sent to the model for `claim`.
///
/// Evidence is listed as `N) text` followed by a `Source: url` line, numbered
/// from 1 in evidence order.
pub fn build_prompt(claim: &Claim, evidence: &[Snippet]) -> String {
    let context = evidence
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}) {}\nSource: {}", i + 1, s.text, s.url))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{ROLE}\nClaim: \"{claim}\"\nEvidence:\n{context}\n\n{TASK}\n")
}
