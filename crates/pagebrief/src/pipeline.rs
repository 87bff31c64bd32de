//! Fetch → analyze → write orchestration

use crate::client::FetchOptions;
use crate::config::Prompts;
use crate::error::PipelineError;
use crate::fetchers::{ContentFetcher, HttpFetcher};
use crate::model::ModelClient;
use crate::stages;
use crate::types::{Report, Stage, StageStatus};
use tracing::{info, warn};

/// Builder for configuring a [`Pipeline`]
#[derive(Default)]
pub struct PipelineBuilder {
    fetcher: Option<Box<dyn ContentFetcher>>,
    fetch_options: FetchOptions,
    prompts: Prompts,
}

impl PipelineBuilder {
    /// Create a builder with the HTTP fetcher and default prompts
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom fetcher instead of [`HttpFetcher`]
    pub fn fetcher(mut self, fetcher: impl ContentFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Set custom User-Agent for the HTTP fetcher
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.fetch_options.user_agent = Some(ua.into());
        self
    }

    /// Set options for the HTTP fetcher
    pub fn fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    /// Set the stage prompts
    pub fn prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        let fetcher = self
            .fetcher
            .unwrap_or_else(|| Box::new(HttpFetcher::with_options(self.fetch_options)));
        Pipeline {
            fetcher,
            prompts: self.prompts,
        }
    }
}

/// Three-stage summary pipeline
///
/// Runs one URL at a time: fetch the page, analyze its text, write a summary
/// from the analysis. A failed fetch ends the run before any model call.
pub struct Pipeline {
    fetcher: Box<dyn ContentFetcher>,
    prompts: Prompts,
}

impl Default for Pipeline {
    fn default() -> Self {
        PipelineBuilder::new().build()
    }
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Prompts used by the model stages
    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// Run the pipeline for `url`
    pub async fn run(&self, url: &str, client: &dyn ModelClient) -> Result<Report, PipelineError> {
        self.run_with_status(url, client, |_| {}).await
    }

    /// Run the pipeline, reporting each stage transition to `status_callback`
    pub async fn run_with_status<F>(
        &self,
        url: &str,
        client: &dyn ModelClient,
        mut status_callback: F,
    ) -> Result<Report, PipelineError>
    where
        F: FnMut(StageStatus),
    {
        status_callback(StageStatus::new(Stage::Fetching).with_message("Scraping the website"));
        info!(url = %url, fetcher = self.fetcher.name(), "Fetching page");

        let page = match self.fetcher.fetch(url).await {
            Ok(page) => page,
            Err(err) => {
                warn!(url = %url, error = %err, "Fetch failed");
                status_callback(StageStatus::new(Stage::Failed).with_message(err.to_string()));
                return Err(err.into());
            }
        };

        status_callback(StageStatus::new(Stage::Analyzing).with_message("Analyzing the content"));
        info!(chars = page.text.len(), "Analyzing page content");

        let analysis = match stages::analyze(&page.text, client, &self.prompts).await {
            Ok(analysis) => analysis,
            Err(err) => {
                status_callback(StageStatus::new(Stage::Failed).with_message(err.to_string()));
                return Err(err.into());
            }
        };

        status_callback(
            StageStatus::new(Stage::Writing).with_message("Writing the final summary"),
        );
        info!(chars = analysis.len(), "Writing summary");

        let summary = match stages::write(&analysis, client, &self.prompts).await {
            Ok(summary) => summary,
            Err(err) => {
                status_callback(StageStatus::new(Stage::Failed).with_message(err.to_string()));
                return Err(err.into());
            }
        };

        status_callback(StageStatus::new(Stage::Done).with_message("Final summary written"));
        info!(url = %url, "Pipeline complete");

        Ok(Report {
            url: page.url,
            analysis,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ModelError};
    use crate::types::{Message, PageContent};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct StaticFetcher(Result<String, String>);

    #[async_trait]
    impl ContentFetcher for StaticFetcher {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn fetch(&self, url: &str) -> Result<PageContent, FetchError> {
            match &self.0 {
                Ok(text) => Ok(PageContent::new(url, text.as_str())),
                Err(msg) => Err(FetchError::ConnectError(msg.clone())),
            }
        }
    }

    /// Replays canned replies and records every request
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, ModelError>>>,
        calls: Mutex<Vec<Vec<Message>>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, ModelError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<Message>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn complete(&self, messages: &[Message]) -> Result<String, ModelError> {
            self.calls.lock().unwrap().push(messages.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ModelError::EmptyResponse))
        }
    }

    fn pipeline(fetched: Result<&str, &str>) -> Pipeline {
        let fetched = fetched.map(str::to_string).map_err(str::to_string);
        Pipeline::builder()
            .fetcher(StaticFetcher(fetched))
            .build()
    }

    #[tokio::test]
    async fn test_run_end_to_end() {
        let pipeline = pipeline(Ok("Breaking News: Markets Rally"));
        let client = ScriptedClient::new(vec![
            Ok("Insight: markets showed gains".to_string()),
            Ok("Report: Markets rallied amid positive sentiment".to_string()),
        ]);

        let report = pipeline
            .run("https://example.com/article", &client)
            .await
            .unwrap();

        assert_eq!(report.summary, "Report: Markets rallied amid positive sentiment");
        assert_eq!(report.analysis, "Insight: markets showed gains");
        assert_eq!(report.url, "https://example.com/article");

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), 2);
        assert_eq!(calls[0][1].content, "Breaking News: Markets Rally");
        assert_eq!(calls[1].len(), 2);
        assert_eq!(calls[1][1].content, "Insight: markets showed gains");
    }

    #[tokio::test]
    async fn test_fetch_failure_short_circuits() {
        let pipeline = pipeline(Err("Connection refused"));
        let client = ScriptedClient::new(vec![]);

        let err = pipeline
            .run("https://unreachable.invalid/", &client)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Fetch(_)));
        assert_eq!(err.to_string(), "Error during scraping: Connection refused");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetched_text_resembling_marker_is_content() {
        let text = "Error during scraping: this article is about scraper errors";
        let pipeline = pipeline(Ok(text));
        let client = ScriptedClient::new(vec![Ok("a".to_string()), Ok("b".to_string())]);

        let report = pipeline.run("https://example.com", &client).await.unwrap();

        assert_eq!(report.summary, "b");
        assert_eq!(client.calls()[0][1].content, text);
    }

    #[tokio::test]
    async fn test_writing_failure_discards_analysis() {
        let pipeline = pipeline(Ok("page"));
        let client = ScriptedClient::new(vec![
            Ok("analysis".to_string()),
            Err(ModelError::ApiError {
                status: 429,
                body: "quota exceeded".to_string(),
            }),
        ]);

        let err = pipeline.run("https://example.com", &client).await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Model(ModelError::ApiError { status: 429, .. })
        ));
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_analysis_failure_skips_writing() {
        let pipeline = pipeline(Ok("page"));
        let client = ScriptedClient::new(vec![Err(ModelError::EmptyResponse)]);

        let err = pipeline.run("https://example.com", &client).await.unwrap_err();

        assert!(matches!(err, PipelineError::Model(ModelError::EmptyResponse)));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_status_sequence() {
        let pipeline = pipeline(Ok("page"));
        let client = ScriptedClient::new(vec![Ok("a".to_string()), Ok("b".to_string())]);
        let mut stages = Vec::new();

        pipeline
            .run_with_status("https://example.com", &client, |status| {
                stages.push(status.stage)
            })
            .await
            .unwrap();

        assert_eq!(
            stages,
            vec![Stage::Fetching, Stage::Analyzing, Stage::Writing, Stage::Done]
        );
    }

    #[tokio::test]
    async fn test_status_sequence_on_fetch_failure() {
        let pipeline = pipeline(Err("Connection refused"));
        let client = ScriptedClient::new(vec![]);
        let mut statuses = Vec::new();

        let _ = pipeline
            .run_with_status("https://example.com", &client, |status| {
                statuses.push(status)
            })
            .await;

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].stage, Stage::Fetching);
        assert_eq!(statuses[1].stage, Stage::Failed);
        assert_eq!(
            statuses[1].message.as_deref(),
            Some("Error during scraping: Connection refused")
        );
    }

    #[test]
    fn test_builder_prompts() {
        let prompts = Prompts {
            analysis: "a".to_string(),
            writing: "w".to_string(),
        };
        let pipeline = Pipeline::builder().prompts(prompts.clone()).build();
        assert_eq!(pipeline.prompts(), &prompts);
    }
}
