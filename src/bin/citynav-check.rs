//! Post-deployment health check for a running citynav server

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use citynav::check::HealthChecker;

#[derive(Parser, Debug)]
#[command(name = "citynav-check", author, version, about)]
struct Cli {
    /// Base URL of the deployed server
    #[arg(short, long, env = "CITYNAV_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    timeout_secs: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "citynav=debug" } else { "citynav=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let checker = HealthChecker::new(&cli.url, Duration::from_secs(cli.timeout_secs))
        .context("failed to create HTTP client")?;

    let report = checker.run().await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if report.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        let failed = report.failures().count();
        eprintln!("{} of {} checks failed", failed, report.outcomes.len());
        Ok(ExitCode::FAILURE)
    }
}
