//! Evidence layer: site-restricted search, bounded page fetches, paragraph extraction.

pub mod extract;
pub mod fetcher;
pub mod search;

#[cfg(any(test, feature = "test-support"))]
pub mod stub;

pub use extract::paragraph_text;
pub use fetcher::{EvidenceFetcher, FetchError};
pub use search::{SearchError, SearchProvider, SearxSearch, site_query};
