//! Content fetchers
//!
//! A [`ContentFetcher`] turns a URL into the visible text of the page. The
//! pipeline only depends on the trait, so tests and alternate transports can
//! plug in their own implementation.

mod http;

pub use http::HttpFetcher;

use crate::error::FetchError;
use crate::types::PageContent;
use async_trait::async_trait;

/// Trait for page content fetchers
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Unique identifier for this fetcher (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Fetch the page at `url` and return its visible text
    ///
    /// Makes a single attempt. Any network, status or decoding failure is
    /// returned as a [`FetchError`].
    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError>;
}

