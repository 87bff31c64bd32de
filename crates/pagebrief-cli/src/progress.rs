//! Terminal progress display for pipeline runs

use indicatif::{ProgressBar, ProgressStyle};
use pagebrief::{Stage, StageStatus};

const TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}";

/// Spinner label while a stage is running
fn running_label(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Fetching => Some("Step 1: Scraping the website..."),
        Stage::Analyzing => Some("Step 2: Analyzing the content..."),
        Stage::Writing => Some("Step 3: Writing the final summary..."),
        Stage::Done | Stage::Failed => None,
    }
}

/// Line printed once the previous stage has finished
fn completed_label(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Analyzing => Some("Step 1 complete: Website scraped"),
        Stage::Writing => Some("Step 2 complete: Content analyzed"),
        Stage::Done => Some("Step 3 complete: Final summary written"),
        Stage::Fetching | Stage::Failed => None,
    }
}

/// Progress bar driven by [`StageStatus`] updates
///
/// Draws to stderr and hides itself when stderr is not a terminal.
pub struct StageProgress {
    bar: ProgressBar,
}

impl StageProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }

    /// Apply one status update
    pub fn update(&self, status: &StageStatus) {
        if let Some(line) = completed_label(status.stage) {
            self.bar.println(line);
        }
        match status.stage {
            Stage::Done => {
                self.bar.set_position(100);
                self.bar.finish_and_clear();
            }
            Stage::Failed => self.bar.abandon(),
            stage => {
                self.bar.set_position(status.percent_complete as u64);
                if let Some(label) = running_label(stage) {
                    self.bar.set_message(label);
                }
                self.bar.tick();
            }
        }
    }
}
