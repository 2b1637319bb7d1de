//! Search providers: turn a query into a ranked list of candidate URLs.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("search provider returned {status}: {body}")]
    Server { status: u16, body: String },
}

/// A black-box ranked-URL provider.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return at most `limit` result URLs for `query`, best first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError>;
}

/// Append a `site:a OR site:b ...` restriction for `domains` to `claim`.
///
/// Blank domains are skipped. With no usable domains the claim is returned
/// unchanged.
pub fn site_query(claim: &str, domains: &[String]) -> String {
    let clause = domains
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| format!("site:{d}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    if clause.is_empty() {
        claim.to_string()
    } else {
        format!("{claim} {clause}")
    }
}

/// Search client for a SearXNG instance's JSON API.
pub struct SearxSearch {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct SearxResponse {
    #[serde(default)]
    results: Vec<SearxHit>,
}

#[derive(Deserialize)]
struct SearxHit {
    url: String,
}

impl SearxSearch {
    /// Create a client for the instance at `base_url` (e.g. `http://localhost:8888`).
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for SearxSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
        let url = format!("{}/search", self.base_url);

        info!(url = %url, limit, "querying search provider");
        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SearchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearxResponse = resp.json().await?;
        let urls: Vec<String> = parsed
            .results
            .into_iter()
            .map(|hit| hit.url)
            .take(limit)
            .collect();
        info!(count = urls.len(), "search returned candidates");
        Ok(urls)
    }
}
