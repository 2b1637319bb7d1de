//! Verdict layer: asks an LLM to judge a claim against gathered evidence and
//! parses whatever comes back into a [`RawVerdict`](verifact_core::RawVerdict).

pub mod engine;
pub mod extract;
pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod provider;

pub use engine::VerdictEngine;
pub use extract::{ExtractStrategy, Extraction, extract_text};
pub use gemini::GeminiClient;
pub use parse::parse_reply;
pub use prompt::build_prompt;
pub use provider::{LlmError, LlmProvider, ProviderResponse};
