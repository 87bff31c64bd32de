//! Error types for PageBrief

use thiserror::Error;

/// Fixed prefix carried by every rendered [`FetchError`]
pub const FETCH_ERROR_MARKER: &str = "Error during scraping";

/// Errors that can occur while fetching page content
///
/// Every variant renders with the [`FETCH_ERROR_MARKER`] prefix so the message
/// can be shown to the user verbatim.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL is missing
    #[error("Error during scraping: missing required parameter: url")]
    MissingUrl,

    /// URL has invalid scheme or cannot be parsed
    #[error("Error during scraping: invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Error during scraping: failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Failed to connect to server
    #[error("Error during scraping: {0}")]
    ConnectError(String),

    /// Request or body read exceeded its deadline
    #[error("Error during scraping: request timed out")]
    Timeout,

    /// Server answered with a non-2xx status
    #[error("Error during scraping: HTTP status {0}")]
    HttpStatus(u16),

    /// Server returned content that cannot be turned into text
    #[error("Error during scraping: unsupported content type {0}")]
    UnsupportedContent(String),

    /// Other request error
    #[error("Error during scraping: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(root_cause(&err))
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus(status.as_u16())
        } else {
            FetchError::RequestError(root_cause(&err))
        }
    }
}

/// Walk the source chain and return the innermost message
///
/// reqwest wraps OS errors ("Connection refused") several layers deep.
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    let message = current.to_string();
    // io::Error renders as "Connection refused (os error 111)"
    match message.find(" (os error") {
        Some(idx) => message[..idx].to_string(),
        None => message,
    }
}

/// Errors returned by a model client
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to build HTTP client
    #[error("Failed to create model HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Transport failure talking to the model endpoint
    #[error("Model request failed: {0}")]
    RequestError(#[source] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("Model API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },

    /// Response body was not a chat completion
    #[error("Failed to decode model response: {0}")]
    DecodeError(String),

    /// Completion carried no text
    #[error("Model returned no completion choices")]
    EmptyResponse,
}

/// Errors raised while building configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Credential is absent or blank
    #[error("Missing API key: set AIMLAPI_API_KEY or pass --api-key")]
    MissingApiKey,

    /// Endpoint is not an http(s) URL
    #[error("Invalid model base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors that end a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetch stage failed; rendered verbatim
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Analysis or writing stage failed
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_errors_carry_marker() {
        let errors = [
            FetchError::MissingUrl,
            FetchError::InvalidUrlScheme,
            FetchError::ConnectError("Connection refused".to_string()),
            FetchError::Timeout,
            FetchError::HttpStatus(404),
            FetchError::UnsupportedContent("image/png".to_string()),
            FetchError::RequestError("boom".to_string()),
        ];
        for err in errors {
            assert!(err.to_string().starts_with(FETCH_ERROR_MARKER), "{err}");
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::ConnectError("Connection refused".to_string()).to_string(),
            "Error during scraping: Connection refused"
        );
        assert_eq!(
            FetchError::HttpStatus(503).to_string(),
            "Error during scraping: HTTP status 503"
        );
        assert_eq!(
            ModelError::ApiError {
                status: 401,
                body: "invalid key".to_string()
            }
            .to_string(),
            "Model API error: HTTP 401: invalid key"
        );
    }

    #[test]
    fn test_pipeline_error_is_transparent() {
        let err = PipelineError::from(FetchError::ConnectError("Connection refused".to_string()));
        assert_eq!(err.to_string(), "Error during scraping: Connection refused");

        let err = PipelineError::from(ModelError::EmptyResponse);
        assert_eq!(err.to_string(), "Model returned no completion choices");
    }

    #[test]
    fn test_root_cause_strips_os_error_suffix() {
        let io = std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "Connection refused (os error 111)",
        );
        assert_eq!(root_cause(&io), "Connection refused");
    }
}
