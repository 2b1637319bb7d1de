//! Process-wide configuration, built once at startup and shared read-only.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:8888";
pub const DEFAULT_DOMAINS: &[&str] = &["snopes.com", "politifact.com", "bbc.com", "reuters.com"];
pub const DEFAULT_MAX_RESULTS: usize = 6;
pub const DEFAULT_CHAR_LIMIT: usize = 1000;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(7);
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(45);
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no API key found; set GEMINI_API_KEY in the environment or a .env file")]
    MissingApiKey,

    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Settings for the evidence fetcher and the verdict engine.
///
/// Construct with [`Config::new`], adjust fields as needed, then call
/// [`Config::validate`] before handing it to any component.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub llm_base_url: String,
    /// Base URL of the SearXNG instance used as the search provider.
    pub search_url: String,
    /// Trusted sites the search query is restricted to.
    pub allowed_domains: Vec<String>,
    pub max_results: usize,
    /// Maximum snippet length in characters.
    pub char_limit: usize,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
    pub user_agent: String,
}

impl Config {
    /// Create a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            allowed_domains: DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect(),
            max_results: DEFAULT_MAX_RESULTS,
            char_limit: DEFAULT_CHAR_LIMIT,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field, failing on the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "model",
                reason: "must not be blank",
            });
        }
        if self.allowed_domains.iter().all(|d| d.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "allowed_domains",
                reason: "at least one domain is required",
            });
        }
        if self.max_results == 0 {
            return Err(ConfigError::Invalid {
                field: "max_results",
                reason: "must be at least 1",
            });
        }
        if self.char_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "char_limit",
                reason: "must be at least 1",
            });
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "fetch_timeout",
                reason: "must be non-zero",
            });
        }
        if self.llm_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "llm_timeout",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("llm_base_url", &self.llm_base_url)
            .field("search_url", &self.search_url)
            .field("allowed_domains", &self.allowed_domains)
            .field("max_results", &self.max_results)
            .field("char_limit", &self.char_limit)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("llm_timeout", &self.llm_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
