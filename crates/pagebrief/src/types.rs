//! Core types for PageBrief

use serde::{Deserialize, Serialize};

/// Visible text extracted from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// The fetched URL
    pub url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Flattened visible text
    pub text: String,
}

impl PageContent {
    /// Create page content for a URL
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status_code: 200,
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
        }
    }
}

/// A role-tagged unit of a model request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Page the report was written for
    pub url: String,

    /// Output of the analysis stage
    pub analysis: String,

    /// Output of the writing stage
    pub summary: String,
}

impl Report {
    /// Render the report for plain-text export
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str(&self.summary);
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output
    }
}

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Fetching,
    Analyzing,
    Writing,
    Done,
    Failed,
}

impl Stage {
    /// Completion percentage reported when entering this stage
    pub fn percent(self) -> f32 {
        match self {
            Stage::Fetching => 0.0,
            Stage::Analyzing => 33.0,
            Stage::Writing => 66.0,
            Stage::Done => 100.0,
            Stage::Failed => 100.0,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Fetching => write!(f, "fetching"),
            Stage::Analyzing => write!(f, "analyzing"),
            Stage::Writing => write!(f, "writing"),
            Stage::Done => write!(f, "done"),
            Stage::Failed => write!(f, "failed"),
        }
    }
}

/// Status update during a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageStatus {
    /// Stage just entered
    pub stage: Stage,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Estimated completion percentage (0-100)
    pub percent_complete: f32,
}

impl StageStatus {
    /// Create a status for a stage with its default percentage
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            message: None,
            percent_complete: stage.percent(),
        }
    }

    /// Set message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
