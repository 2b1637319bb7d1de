//! Verdict types: the engine's raw judgement and the caller-facing result.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ── Upstream vocabulary ──

/// A verdict label in the model's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelVerdict {
    Supported,
    Refuted,
    NotEnoughInfo,
    /// Anything the model produced outside the three requested labels.
    Unrecognized(String),
}

impl ModelVerdict {
    /// Match a label exactly as the prompt spells it.
    pub fn parse(label: &str) -> Self {
        match label {
            "SUPPORTED" => Self::Supported,
            "REFUTED" => Self::Refuted,
            "NOT ENOUGH INFO" => Self::NotEnoughInfo,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

/// The structured judgement parsed out of a model reply.
///
/// Every field is optional on the wire; absent or mistyped fields fall back to
/// their defaults rather than rejecting the whole object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Judgement {
    #[serde(deserialize_with = "lenient_string")]
    pub verdict: String,
    #[serde(deserialize_with = "lenient_string")]
    pub explanation: String,
    /// Model confidence on a 0-100 scale, clamped on the way in.
    #[serde(deserialize_with = "confidence_score")]
    pub confidence: f64,
    /// URLs the model claims to have relied on.
    #[serde(deserialize_with = "url_list")]
    pub sources: Vec<String>,
}

impl Judgement {
    pub fn model_verdict(&self) -> ModelVerdict {
        ModelVerdict::parse(&self.verdict)
    }
}

/// The verdict engine's output before normalisation.
///
/// Serialises to the same three shapes the engine's callers inspect:
/// the judgement object, `{"error": ..}` or `{"raw_response": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawVerdict {
    Structured(Judgement),
    ProviderError { error: String },
    Unparsed { raw_response: String },
}

// ── Caller-facing schema ──

/// Tri-state public verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Unclear,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unclear => "Unclear",
        }
    }
}

impl From<&ModelVerdict> for Verdict {
    fn from(v: &ModelVerdict) -> Self {
        match v {
            ModelVerdict::Supported => Self::True,
            ModelVerdict::Refuted => Self::False,
            ModelVerdict::NotEnoughInfo | ModelVerdict::Unrecognized(_) => Self::Unclear,
        }
    }
}

/// One entry of the evidence list shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source: String,
    pub snippet: String,
    pub url: String,
}

/// Final result of a claim check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub verdict: Verdict,
    /// 0.0 to 1.0.
    pub confidence: f64,
    pub summary: String,
    pub evidence: Vec<EvidenceItem>,
}

impl CheckResult {
    /// An `Unclear` result with zero confidence and no evidence.
    pub fn unclear(summary: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Unclear,
            confidence: 0.0,
            summary: summary.into(),
            evidence: Vec::new(),
        }
    }
}

// ── Lenient field decoding ──

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn confidence_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 })
}

fn url_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}
