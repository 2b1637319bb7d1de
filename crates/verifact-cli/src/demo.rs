//! Offline demo results for when no backend can be built.
//!
//! Keyword heuristics only; nothing here looks at real evidence.

use verifact_core::{CheckResult, EvidenceItem, Verdict};

pub const DEMO_PREFIX: &str = "[DEMO]";

const ABSOLUTE_WORDS: &[&str] = &["always", "never"];
const MODAL_WORDS: &[&str] = &["maybe", "might", "could"];

/// Produce a clearly marked placeholder result for `statement`.
pub fn demo_result(statement: &str) -> CheckResult {
    let lower = statement.to_lowercase();

    let (verdict, confidence, summary) = if ABSOLUTE_WORDS.iter().any(|w| lower.contains(w))
        || lower.chars().any(|c| c.is_ascii_digit())
    {
        (
            Verdict::False,
            0.78,
            "Absolute wording or figures detected, flagged as likely false.",
        )
    } else if MODAL_WORDS.iter().any(|w| lower.contains(w)) {
        (
            Verdict::Unclear,
            0.45,
            "Hedged wording detected, the claim is uncertain.",
        )
    } else {
        (Verdict::True, 0.62, "The statement seems plausible.")
    };

    CheckResult {
        verdict,
        confidence,
        summary: format!("{DEMO_PREFIX} {summary}"),
        evidence: vec![EvidenceItem {
            source: "Example News".into(),
            snippet: "A report states...".into(),
            url: "https://example.com/article".into(),
        }],
    }
}
