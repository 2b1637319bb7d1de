//! Claims and the web evidence gathered for them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A free-text assertion to be fact-checked.
///
/// Only surrounding whitespace is removed; the text is otherwise kept verbatim
/// so the prompt quotes exactly what the user asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracted paragraph text from one fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub url: String,
    pub text: String,
}

impl Snippet {
    /// Build a snippet, truncating `text` to `char_limit` characters.
    ///
    /// Returns `None` when nothing is left after truncation, so an empty
    /// snippet can never enter an [`EvidenceSet`].
    pub fn new(url: impl Into<String>, text: &str, char_limit: usize) -> Option<Self> {
        let text: String = text.chars().take(char_limit).collect();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            url: url.into(),
            text,
        })
    }
}

/// Snippets in fetch completion order. May be empty.
pub type EvidenceSet = Vec<Snippet>;
