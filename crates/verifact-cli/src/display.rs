//! Terminal rendering for check results.
//!
//! Results are rendered to a `String` first so the layout can be tested
//! without capturing stdout.

use std::fmt::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use verifact_core::{CheckResult, Claim, RawVerdict, Verdict};

const LABEL_WIDTH: usize = 12;

fn marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::True => "✅",
        Verdict::False => "❌",
        Verdict::Unclear => "❓",
    }
}

// ── Result card ──

/// Render the vertical card shown after a check.
pub fn render_card(claim: &Claim, result: &CheckResult, checked_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Fact-check result ===");
    let _ = writeln!(out, "  {:<LABEL_WIDTH$} \"{}\"", "Claim", claim);
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$} {} {}",
        "Verdict",
        marker(result.verdict),
        result.verdict.as_str()
    );
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$} {:.0}%",
        "Confidence",
        result.confidence * 100.0
    );
    let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", "Summary", result.summary);

    if !result.evidence.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Evidence & Sources ({}):", result.evidence.len());
        for (i, item) in result.evidence.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {}. {} — {} [{}]",
                i + 1,
                item.source,
                item.snippet,
                item.url
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$} {}",
        "Checked at",
        checked_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    out
}

// ── Raw verdict ──

/// Render the engine's verdict before normalisation.
pub fn render_raw(raw: Option<&RawVerdict>) -> String {
    match raw {
        None => "Model not consulted.\n".to_string(),
        Some(RawVerdict::ProviderError { error }) => format!("Error: {error}\n"),
        Some(RawVerdict::Unparsed { raw_response }) => {
            format!("Model returned (couldn't parse JSON):\n\n{raw_response}\n")
        }
        Some(RawVerdict::Structured(j)) => {
            let mut out = String::from("Model verdict:\n");
            let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", "Verdict", j.verdict);
            let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", "Confidence", j.confidence);
            let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", "Explanation", j.explanation);
            if j.sources.is_empty() {
                let _ = writeln!(out, "  {:<LABEL_WIDTH$} (none)", "Sources");
            } else {
                let _ = writeln!(out, "  {:<LABEL_WIDTH$} {}", "Sources", j.sources.join(", "));
            }
            out
        }
    }
}
