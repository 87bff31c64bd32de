//! Model endpoint configuration and stage prompts

use crate::error::ConfigError;
use std::env;
use std::fmt;
use std::time::Duration;

/// Chat-completion endpoint used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://api.aimlapi.com/v1";

/// Model identifier used for both model calls
pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";

/// Environment variable holding the credential
pub const API_KEY_ENV: &str = "AIMLAPI_API_KEY";

/// Environment variable overriding the endpoint
pub const BASE_URL_ENV: &str = "AIMLAPI_BASE_URL";

/// Environment variable overriding the model identifier
pub const MODEL_ENV: &str = "AIMLAPI_MODEL";

/// Connection settings for a chat-completion endpoint
///
/// Built once by the caller and handed to
/// [`ChatClient::new`](crate::model::ChatClient::new).
#[derive(Clone)]
pub struct ModelConfig {
    /// Bearer credential
    pub api_key: String,
    /// Endpoint root, `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Optional request timeout; transport default when unset
    pub timeout: Option<Duration>,
}

impl ModelConfig {
    /// Create a config for the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Read the config from `AIMLAPI_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model);
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the endpoint root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the credential and endpoint before any request is made
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }

    /// Full chat-completion URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// System instructions for the two model stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompts {
    /// Instruction sent with the page text
    pub analysis: String,
    /// Instruction sent with the analysis
    pub writing: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            analysis: "You are an agent that analyzes content and extracts key insights. \
                       Analyze the content provided by the user."
                .to_string(),
            writing: "You are an agent that writes summaries of research. \
                      Write a summary based on the analysis provided by the user."
                .to_string(),
        }
    }
}
