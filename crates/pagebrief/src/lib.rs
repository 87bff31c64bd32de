//! PageBrief - scrape a web page, analyze it, write a summary
//!
//! The crate runs a three-stage pipeline against a chat-completion model:
//!
//! 1. **Fetch** - a [`ContentFetcher`] downloads the page and extracts its
//!    visible text ([`HttpFetcher`] by default).
//! 2. **Analyze** - the text is sent to the model with an "extract key
//!    insights" instruction.
//! 3. **Write** - the analysis is sent to the model with a "write a summary"
//!    instruction; the reply is the final [`Report`].
//!
//! A failed fetch ends the run with [`PipelineError::Fetch`] and no model is
//! called. Model failures end the run with [`PipelineError::Model`].
//!
//! ```no_run
//! use pagebrief::{ChatClient, ModelConfig, Pipeline};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ModelConfig::from_env()?;
//! let client = ChatClient::new(&config)?;
//! let report = Pipeline::default()
//!     .run("https://example.com/article", &client)
//!     .await?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
mod convert;
mod error;
pub mod fetchers;
pub mod model;
mod pipeline;
pub mod stages;
mod types;

pub use client::{fetch, fetch_with_options, FetchOptions};
pub use config::{ModelConfig, Prompts, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use convert::html_to_text;
pub use error::{ConfigError, FetchError, ModelError, PipelineError, FETCH_ERROR_MARKER};
pub use fetchers::{ContentFetcher, HttpFetcher};
pub use model::{ChatClient, ModelClient};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use types::{Message, PageContent, Report, Role, Stage, StageStatus};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "PageBrief/1.0";

/// Extended documentation for the command line (llmtxt)
pub const TOOL_LLMTXT: &str = r#"# PageBrief

Scrapes a web page, analyzes its text with a language model and writes a
summary report from that analysis.

## Pipeline
1. Fetch: one HTTP GET, HTML reduced to visible text
2. Analyze: model call with "extract key insights" instruction
3. Write: model call with "write a summary" instruction

## Configuration
- `AIMLAPI_API_KEY` (required): model API credential
- `AIMLAPI_BASE_URL` (optional): OpenAI-compatible endpoint root,
  default https://api.aimlapi.com/v1
- `AIMLAPI_MODEL` (optional): model identifier, default gpt-4o-mini-2024-07-18
- `RUST_LOG` (optional): log filter, logs go to stderr

A `.env` file in the working directory is loaded first.

## Commands

### Summarize a page
```sh
pagebrief run https://example.com/article
```

### Save the report as plain text
```sh
pagebrief run https://example.com/article --save
pagebrief run https://example.com/article --save report.txt
```

### JSON output (url, analysis, summary)
```sh
pagebrief run https://example.com/article --output json
```

### Only fetch the page text
```sh
pagebrief fetch https://example.com/article
```

## Errors
- Fetch failures print "Error during scraping: ..." and make no model call
- Model failures end the run; nothing is saved
- Exit code 1 on any error
"#;
