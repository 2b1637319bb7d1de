//! Evidence fetcher: search, fetch each candidate page, extract snippets.
//!
//! Every candidate URL is an independent failure domain. A timeout, refused
//! connection, error status, or unreadable body drops that URL with a warning
//! and never affects its siblings.

use futures::{StreamExt, future, stream};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};
use verifact_core::{Claim, Config, EvidenceSet, Snippet};

use crate::extract::paragraph_text;
use crate::search::{SearchProvider, site_query};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Status { status: u16 },
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Gathers web evidence for a claim from a search provider's results.
pub struct EvidenceFetcher<S> {
    search: S,
    client: reqwest::Client,
    allowed_domains: Vec<String>,
}

impl<S: SearchProvider> EvidenceFetcher<S> {
    /// Build a fetcher whose page requests use the configured user agent and
    /// per-request timeout.
    pub fn new(search: S, config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self {
            search,
            client,
            allowed_domains: config.allowed_domains.clone(),
        })
    }

    /// Collect up to `max_results` snippets of at most `char_limit` characters.
    ///
    /// Pages are fetched concurrently (at most `max_results` in flight) and
    /// the returned set is in completion order. An empty set means no page
    /// yielded any paragraph text; it is not an error.
    pub async fn fetch(&self, claim: &Claim, max_results: usize, char_limit: usize) -> EvidenceSet {
        let query = site_query(claim.as_str(), &self.allowed_domains);
        let candidates = match self.search.search(&query, max_results).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!(error = %e, "search failed, continuing without candidates");
                Vec::new()
            }
        };
        info!(candidates = candidates.len(), "fetching evidence pages");

        let snippets: EvidenceSet = stream::iter(candidates.into_iter().take(max_results))
            .map(|url| async move {
                let outcome = self.fetch_snippet(&url, char_limit).await;
                (url, outcome)
            })
            .buffer_unordered(max_results.max(1))
            .filter_map(|(url, outcome)| {
                future::ready(match outcome {
                    Ok(Some(snippet)) => Some(snippet),
                    Ok(None) => {
                        debug!(url = %url, "page had no paragraph text");
                        None
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "skipping evidence source");
                        None
                    }
                })
            })
            .collect()
            .await;

        info!(snippets = snippets.len(), "evidence collected");
        snippets
    }

    async fn fetch_snippet(&self, url: &str, char_limit: usize) -> Result<Option<Snippet>, FetchError> {
        let html = self.fetch_page(url).await?;
        Ok(Snippet::new(url, &paragraph_text(&html), char_limit))
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let resp = self.client.get(parsed).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchError;
    use crate::stub::{Route, StubServer};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Returns a fixed URL list and records every query it receives.
    struct FixedResults {
        urls: Vec<String>,
        queries: Mutex<Vec<(String, usize)>>,
    }

    impl FixedResults {
        fn new(urls: Vec<String>) -> Self {
            Self {
                urls,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchProvider for FixedResults {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, SearchError> {
            self.queries.lock().unwrap().push((query.to_string(), limit));
            Ok(self.urls.clone())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchProvider for FailingSearch {
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<String>, SearchError> {
            Err(SearchError::Server {
                status: 503,
                body: "unavailable".into(),
            })
        }
    }

    fn config(timeout: Duration) -> Config {
        let mut config = Config::new("test-key").unwrap();
        config.fetch_timeout = timeout;
        config
    }

    fn page(text: &str) -> String {
        format!("<html><body><h1>Headline</h1><p>{text}</p></body></html>")
    }

    fn sorted_urls(snippets: &EvidenceSet) -> Vec<String> {
        let mut urls: Vec<String> = snippets.iter().map(|s| s.url.clone()).collect();
        urls.sort();
        urls
    }

    #[tokio::test]
    async fn stalled_page_is_skipped_without_blocking_siblings() {
        let server = StubServer::start(vec![
            Route::html("/one", page("First report.")),
            Route::html("/slow", page("Never arrives.")).with_delay(Duration::from_secs(5)),
            Route::html("/three", page("Third report.")),
        ])
        .await
        .unwrap();
        let urls = vec![server.url("/one"), server.url("/slow"), server.url("/three")];
        let fetcher = EvidenceFetcher::new(
            FixedResults::new(urls),
            &config(Duration::from_millis(300)),
        )
        .unwrap();

        let snippets = fetcher.fetch(&Claim::new("claim"), 3, 1000).await;

        assert_eq!(snippets.len(), 2);
        let mut expected = vec![server.url("/one"), server.url("/three")];
        expected.sort();
        assert_eq!(sorted_urls(&snippets), expected);
        let texts: Vec<&str> = snippets.iter().map(|s| s.text.as_str()).collect();
        assert!(texts.contains(&"First report."));
        assert!(texts.contains(&"Third report."));
    }

    #[tokio::test]
    async fn error_status_and_bad_urls_are_skipped() {
        let server = StubServer::start(vec![
            Route::html("/ok", page("Good page.")),
            Route::html("/gone", page("Removed.")).with_status(404),
            Route::html("/broken", "oops").with_status(500),
        ])
        .await
        .unwrap();
        let urls = vec![
            server.url("/gone"),
            "not a url".to_string(),
            "ftp://files.example.com/a".to_string(),
            server.url("/broken"),
            server.url("/ok"),
        ];
        let fetcher =
            EvidenceFetcher::new(FixedResults::new(urls), &config(Duration::from_secs(5))).unwrap();

        let snippets = fetcher.fetch(&Claim::new("claim"), 5, 1000).await;

        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].url, server.url("/ok"));
        assert_eq!(snippets[0].text, "Good page.");
    }

    #[tokio::test]
    async fn pages_without_paragraphs_are_dropped() {
        let server = StubServer::start(vec![
            Route::html("/empty", "<html><body><div>no paragraphs</div></body></html>"),
            Route::html("/full", page("Has text.")),
        ])
        .await
        .unwrap();
        let urls = vec![server.url("/empty"), server.url("/full")];
        let fetcher =
            EvidenceFetcher::new(FixedResults::new(urls), &config(Duration::from_secs(5))).unwrap();

        let snippets = fetcher.fetch(&Claim::new("claim"), 5, 1000).await;

        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].url, server.url("/full"));
    }

    #[tokio::test]
    async fn snippets_are_truncated_to_char_limit() {
        let server = StubServer::start(vec![Route::html("/long", page("abcdefghijklmnop"))])
            .await
            .unwrap();
        let fetcher = EvidenceFetcher::new(
            FixedResults::new(vec![server.url("/long")]),
            &config(Duration::from_secs(5)),
        )
        .unwrap();

        let snippets = fetcher.fetch(&Claim::new("claim"), 5, 4).await;

        assert_eq!(snippets[0].text, "abcd");
    }

    #[tokio::test]
    async fn only_max_results_candidates_are_fetched() {
        let server = StubServer::start(vec![
            Route::html("/a", page("A.")),
            Route::html("/b", page("B.")),
            Route::html("/c", page("C.")),
        ])
        .await
        .unwrap();
        let urls = vec![server.url("/a"), server.url("/b"), server.url("/c")];
        let fetcher =
            EvidenceFetcher::new(FixedResults::new(urls), &config(Duration::from_secs(5))).unwrap();

        let snippets = fetcher.fetch(&Claim::new("claim"), 2, 1000).await;

        assert_eq!(snippets.len(), 2);
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn query_carries_site_restriction_and_limit() {
        let search = FixedResults::new(Vec::new());
        let fetcher = EvidenceFetcher::new(search, &config(Duration::from_secs(5))).unwrap();

        let snippets = fetcher
            .fetch(&Claim::new("  Vaccines contain microchips. "), 6, 1000)
            .await;

        assert!(snippets.is_empty());
        let queries = fetcher.search.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].0,
            "Vaccines contain microchips. site:snopes.com OR site:politifact.com OR site:bbc.com OR site:reuters.com"
        );
        assert_eq!(queries[0].1, 6);
    }

    #[tokio::test]
    async fn search_failure_degrades_to_empty_evidence() {
        let fetcher = EvidenceFetcher::new(FailingSearch, &config(Duration::from_secs(5))).unwrap();
        let snippets = fetcher.fetch(&Claim::new("claim"), 6, 1000).await;
        assert!(snippets.is_empty());
    }

    #[tokio::test]
    async fn sends_configured_user_agent() {
        let server = StubServer::start(vec![Route::html("/ua", page("Agent check."))])
            .await
            .unwrap();
        let fetcher = EvidenceFetcher::new(
            FixedResults::new(vec![server.url("/ua")]),
            &config(Duration::from_secs(5)),
        )
        .unwrap();

        fetcher.fetch(&Claim::new("claim"), 1, 1000).await;

        let request = server.requests()[0].to_ascii_lowercase();
        assert!(request.contains("user-agent: mozilla/5.0"));
    }
}
