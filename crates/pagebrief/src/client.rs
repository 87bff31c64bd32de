//! Page fetching entry points
//!
//! Convenience wrappers around [`HttpFetcher`](crate::fetchers::HttpFetcher)
//! for callers that only need the fetch stage.

use crate::error::FetchError;
use crate::fetchers::{ContentFetcher, HttpFetcher};
use crate::types::PageContent;
use std::time::Duration;

/// Connect timeout used when none is configured
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Total request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch options for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Time allowed to establish the connection
    pub connect_timeout: Duration,
    /// Time allowed for the whole request, body included
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fetch a URL and return its visible text
///
/// For custom options, use [`fetch_with_options`].
pub async fn fetch(url: &str) -> Result<PageContent, FetchError> {
    fetch_with_options(url, FetchOptions::default()).await
}

/// Fetch a URL with custom options
pub async fn fetch_with_options(
    url: &str,
    options: FetchOptions,
) -> Result<PageContent, FetchError> {
    HttpFetcher::with_options(options).fetch(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_empty_url() {
        let result = fetch("").await;
        assert!(matches!(result, Err(FetchError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_scheme() {
        let result = fetch("ftp://example.com").await;
        assert!(matches!(result, Err(FetchError::InvalidUrlScheme)));
    }

    #[test]
    fn test_fetch_options_default() {
        let options = FetchOptions::default();
        assert!(options.user_agent.is_none());
        assert_eq!(options.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);
    }
}
