//! HTTP page fetcher
//!
//! Performs one GET request per URL and converts HTML bodies to plain text.

use crate::client::FetchOptions;
use crate::convert::{clean_whitespace, html_to_text, is_html};
use crate::error::FetchError;
use crate::fetchers::ContentFetcher;
use crate::types::PageContent;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// Binary content type prefixes
const BINARY_PREFIXES: &[&str] = &[
    "image/",
    "audio/",
    "video/",
    "application/octet-stream",
    "application/pdf",
    "application/zip",
    "application/gzip",
    "application/x-tar",
    "application/x-rar",
    "application/x-7z",
    "application/vnd.ms-",
    "application/vnd.openxmlformats",
    "font/",
];

const ACCEPT_HTML: &str = "text/html, application/xhtml+xml, text/plain;q=0.9, */*;q=0.8";

/// HTTP fetcher
///
/// Handles HTTP/HTTPS URLs with:
/// - a single GET attempt, no retries
/// - non-2xx statuses reported as errors
/// - binary content rejected
/// - HTML reduced to its visible text
pub struct HttpFetcher {
    options: FetchOptions,
}

impl HttpFetcher {
    /// Create a fetcher with default options
    pub fn new() -> Self {
        Self::with_options(FetchOptions::default())
    }

    /// Create a fetcher with custom options
    pub fn with_options(options: FetchOptions) -> Self {
        Self { options }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut headers = HeaderMap::new();
        let user_agent = self
            .options
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.options.connect_timeout)
            .build()
            .map_err(FetchError::ClientBuildError)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
        validate_url(url)?;

        let client = self.build_client()?;
        let deadline = Instant::now() + self.options.timeout;

        debug!(url = %url, "Fetching page");
        let response = tokio::time::timeout_at(deadline, client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout)?
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Page returned non-success status");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        if let Some(ref ct) = content_type {
            if is_binary_content_type(ct) {
                return Err(FetchError::UnsupportedContent(ct.clone()));
            }
        }

        let body = read_body_until(response, deadline).await?;
        let raw = String::from_utf8_lossy(&body);

        let text = if is_html(content_type.as_deref(), &raw) {
            html_to_text(&raw)
        } else {
            clean_whitespace(&raw)
        };

        debug!(url = %url, bytes = body.len(), chars = text.len(), "Page fetched");

        Ok(PageContent {
            url: url.to_string(),
            status_code: status.as_u16(),
            content_type,
            text,
        })
    }
}

/// Reject URLs the transport cannot use
fn validate_url(url: &str) -> Result<(), FetchError> {
    if url.is_empty() {
        return Err(FetchError::MissingUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(FetchError::InvalidUrlScheme);
    }
    Url::parse(url).map_err(|_| FetchError::InvalidUrlScheme)?;
    Ok(())
}

/// Check if content type indicates binary content
fn is_binary_content_type(content_type: &str) -> bool {
    let ct_lower = content_type.to_lowercase();
    BINARY_PREFIXES
        .iter()
        .any(|prefix| ct_lower.starts_with(prefix))
}

/// Read the full response body, failing if the deadline passes first
async fn read_body_until(
    response: reqwest::Response,
    deadline: Instant,
) -> Result<Vec<u8>, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    loop {
        tokio::select! {
            chunk = stream.next() => {
                match chunk {
                    Some(Ok(bytes)) => body.extend_from_slice(&bytes),
                    Some(Err(e)) => return Err(FetchError::from_reqwest(e)),
                    None => return Ok(body),
                }
            }
            _ = tokio::time::sleep_until(deadline) => {
                warn!(bytes = body.len(), "Body deadline reached");
                return Err(FetchError::Timeout);
            }
        }
    }
}
