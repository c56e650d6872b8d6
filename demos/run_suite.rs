//! Run the reqres contract suite and print a report.
//!
//! # Running
//!
//! ```bash
//! # Against the public service
//! REQRES_API_KEY=reqres-free-v1 cargo run --example run_suite
//!
//! # Against any other deployment
//! REQRES_BASE_URL=http://localhost:8080 cargo run --example run_suite
//! ```
//!
//! Exits with status 1 when any scenario fails.

use reqres_contracts::scenario::{reqres_suite, run_suite};
use reqres_contracts::{error::ErrorCategory, ApiConfig, ReqresClient, SchemaLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    let loader = SchemaLoader::new(config.fixtures_dir.clone());
    let client = ReqresClient::new(config)?;

    println!("Running reqres contracts against {}", client.config().base_url);
    let report = run_suite(&client, &loader, &reqres_suite()?).await;
    println!("{report}");

    let unreachable = report
        .failures()
        .filter_map(|o| o.error())
        .filter(|e| e.category() == ErrorCategory::Transport)
        .count();
    if unreachable > 0 {
        println!("{unreachable} scenario(s) could not reach the service");
    }

    if !report.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
