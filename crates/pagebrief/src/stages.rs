//! Analysis and writing stages
//!
//! Each stage sends exactly two messages: the stage's system instruction and
//! the input text, unmodified.

use crate::config::Prompts;
use crate::error::ModelError;
use crate::model::ModelClient;
use crate::types::Message;

/// Messages for the analysis request
pub fn analysis_messages(content: &str, prompts: &Prompts) -> Vec<Message> {
    vec![
        Message::system(prompts.analysis.as_str()),
        Message::user(content),
    ]
}

/// Messages for the writing request
pub fn writing_messages(analysis: &str, prompts: &Prompts) -> Vec<Message> {
    vec![
        Message::system(prompts.writing.as_str()),
        Message::user(analysis),
    ]
}

/// Extract key insights from page text
pub async fn analyze(
    content: &str,
    client: &dyn ModelClient,
    prompts: &Prompts,
) -> Result<String, ModelError> {
    client.complete(&analysis_messages(content, prompts)).await
}

/// Write a summary from an analysis
pub async fn write(
    analysis: &str,
    client: &dyn ModelClient,
    prompts: &Prompts,
) -> Result<String, ModelError> {
    client.complete(&writing_messages(analysis, prompts)).await
}
