//! Core types, verdict normalisation, and process-wide configuration.

pub mod config;
pub mod evidence;
pub mod normalize;
pub mod verdict;

pub use config::{Config, ConfigError};
pub use evidence::{Claim, EvidenceSet, Snippet};
pub use normalize::normalize;
pub use verdict::{CheckResult, EvidenceItem, Judgement, ModelVerdict, RawVerdict, Verdict};
