//! PageBrief CLI - scrape a page, analyze it and write a summary report

mod progress;

use clap::{Parser, Subcommand, ValueEnum};
use pagebrief::{
    ChatClient, ConfigError, ContentFetcher, FetchOptions, HttpFetcher, ModelConfig, Pipeline,
    Report, DEFAULT_BASE_URL, DEFAULT_MODEL, TOOL_LLMTXT,
};
use progress::StageProgress;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// File name used by `--save` without a path
const DEFAULT_REPORT_FILE: &str = "web_analysis_report.txt";

/// Output format for the run subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Plain text report
    #[default]
    Text,
    /// JSON with url, analysis and summary
    Json,
}

/// PageBrief - scrape a web page, analyze it and write a summary
#[derive(Parser, Debug)]
#[command(name = "pagebrief")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape the URL, analyze the content and write a summary report
    Run {
        /// URL of the page to summarize
        url: String,

        /// Output format
        #[arg(long, short, default_value = "text")]
        output: OutputFormat,

        /// Save the report as plain text (default: web_analysis_report.txt)
        #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_REPORT_FILE)]
        save: Option<PathBuf>,

        /// Print the intermediate analysis before the summary
        #[arg(long)]
        show_analysis: bool,

        #[command(flatten)]
        model: ModelArgs,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,
    },
    /// Fetch the URL and print its visible text
    Fetch {
        /// URL to fetch
        url: String,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct ModelArgs {
    /// Model API key
    #[arg(long, env = "AIMLAPI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenAI-compatible endpoint root
    #[arg(long, env = "AIMLAPI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Model identifier
    #[arg(long, env = "AIMLAPI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
}

impl ModelArgs {
    fn to_config(&self) -> Result<ModelConfig, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let config = ModelConfig::new(api_key)
            .with_base_url(self.base_url.as_str())
            .with_model(self.model.as_str());
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Run {
            url,
            output,
            save,
            show_analysis,
            model,
            user_agent,
        }) => {
            let opts = RunOptions {
                output,
                save,
                show_analysis,
            };
            run_pipeline(&url, &model, user_agent, opts).await;
        }
        Some(Commands::Fetch { url, user_agent }) => {
            run_fetch(&url, user_agent).await;
        }
        None => {
            eprintln!("Usage: pagebrief run <URL>");
            eprintln!("   or: pagebrief fetch <URL>");
            eprintln!("   or: pagebrief --help");
            std::process::exit(1);
        }
    }
}

/// Log to stderr so stdout carries only the report
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

struct RunOptions {
    output: OutputFormat,
    save: Option<PathBuf>,
    show_analysis: bool,
}

async fn run_pipeline(url: &str, model: &ModelArgs, user_agent: Option<String>, opts: RunOptions) {
    // Credential is checked before any network work
    let config = model.to_config().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let client = ChatClient::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let mut builder = Pipeline::builder();
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let pipeline = builder.build();

    let progress = StageProgress::new();
    let result = pipeline
        .run_with_status(url, &client, |status| progress.update(&status))
        .await;

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match opts.output {
        OutputFormat::Text => writeln_safe(&format_report(&report, opts.show_analysis)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            });
            writeln_safe(&json);
        }
    }

    if let Some(path) = opts.save {
        if let Err(e) = save_report(&report, &path) {
            eprintln!("Error saving report to {}: {}", path.display(), e);
            std::process::exit(1);
        }
        eprintln!("Report saved to {}", path.display());
    }
}

async fn run_fetch(url: &str, user_agent: Option<String>) {
    let options = FetchOptions {
        user_agent,
        ..Default::default()
    };

    match HttpFetcher::with_options(options).fetch(url).await {
        Ok(page) => writeln_safe(&page.text),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Format the final report for the terminal
fn format_report(report: &Report, show_analysis: bool) -> String {
    let mut output = String::new();

    if show_analysis {
        output.push_str("## Analysis\n\n");
        output.push_str(report.analysis.trim_end());
        output.push_str("\n\n## Final Report\n\n");
    }
    output.push_str(report.summary.trim_end());

    output
}

/// Write the report as a plain-text file
fn save_report(report: &Report, path: &Path) -> io::Result<()> {
    std::fs::write(path, report.to_text())
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
