//! Example: Summarize one URL with progress output
//!
//! Run with: AIMLAPI_API_KEY=... cargo run -p pagebrief --example summarize_url -- <URL>

use pagebrief::{ChatClient, ModelConfig, Pipeline};

#[tokio::main]
async fn main() {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let config = match ModelConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match ChatClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Summarizing {}", url);

    let result = Pipeline::default()
        .run_with_status(&url, &client, |status| {
            println!(
                "   [{:>3.0}%] {}",
                status.percent_complete,
                status.message.as_deref().unwrap_or("")
            );
        })
        .await;

    match result {
        Ok(report) => {
            println!("\nAnalysis\n========\n{}", report.analysis);
            println!("\nFinal Report\n============\n{}", report.summary);
        }
        Err(e) => {
            println!("\n{}", e);
            std::process::exit(1);
        }
    }
}
