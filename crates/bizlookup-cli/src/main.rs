mod queries;
mod report;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use bizlookup_core::{BatchSummary, LookupConfig, Resolution};
use bizlookup_places::{PlacesClient, Resolver};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bizlookup")]
#[command(about = "Look up business listings, ratings and reviews via the Places API (v1)")]
struct Cli {
    /// Business queries (name + location); quote multi-word queries
    queries: Vec<String>,
    /// Places API key (overrides GOOGLE_PLACES_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
    /// File containing queries, one per line; `#` starts a comment line
    #[arg(long)]
    queries_file: Option<PathBuf>,
    /// Output CSV file for business data
    #[arg(long, default_value = "business_results.csv")]
    output: PathBuf,
    /// Output text file for reviews
    #[arg(long, default_value = "reviews.txt")]
    reviews: PathBuf,
    /// Also write a formatted Markdown report to this path
    #[arg(long)]
    markdown: Option<PathBuf>,
    /// Skip fetching reviews
    #[arg(long)]
    no_reviews: bool,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Minimum delay between API requests in seconds (e.g. 0.5)
    #[arg(long, value_parser = parse_delay)]
    delay: Option<Duration>,
    /// Number of queries resolved concurrently
    #[arg(long)]
    concurrency: Option<usize>,
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delay(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|e| format!("expected seconds, e.g. 0.5: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

/// Applies command-line overrides on top of the environment configuration.
fn apply_overrides(config: &mut LookupConfig, cli: &Cli) {
    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(delay) = cli.delay {
        config.inter_request_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
    }
    if let Some(concurrency) = cli.concurrency {
        config.max_concurrent_queries = concurrency.max(1);
    }
}

fn init_tracing(log_level: &str, verbose: bool) -> anyhow::Result<()> {
    let env_filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = bizlookup_core::load_lookup_config()?;
    apply_overrides(&mut config, &cli);
    init_tracing(&config.log_level, cli.verbose)?;

    let api_key = config
        .require_api_key()
        .context("no API key provided; set GOOGLE_PLACES_API_KEY or use --api-key")?
        .to_owned();

    let queries = queries::collect_queries(&cli.queries, cli.queries_file.as_deref())?;
    if queries.is_empty() {
        anyhow::bail!("no queries provided; pass queries as arguments or use --queries-file");
    }

    let results = run_lookup(&config, &api_key, &queries, !cli.no_reviews).await?;
    write_reports(&cli, &results)?;

    let summary = BatchSummary::from_resolutions(&results);
    tracing::info!(
        total = summary.total,
        successful = summary.successful,
        failed = summary.failed,
        "lookup complete"
    );
    println!("{summary}");
    Ok(())
}

async fn run_lookup(
    config: &LookupConfig,
    api_key: &str,
    queries: &[String],
    include_reviews: bool,
) -> anyhow::Result<Vec<Resolution>> {
    tracing::info!(
        queries = queries.len(),
        concurrency = config.max_concurrent_queries,
        include_reviews,
        "processing queries"
    );
    let client = PlacesClient::from_config(config, api_key)
        .context("failed to build places client")?;
    let resolver = Resolver::new(client).with_page_size(config.search_page_size);
    Ok(resolver
        .resolve_batch(queries, include_reviews, config.max_concurrent_queries)
        .await)
}

fn write_reports(cli: &Cli, results: &[Resolution]) -> anyhow::Result<()> {
    report::write_csv(&cli.output, results)?;
    tracing::info!(path = %cli.output.display(), "business data written");

    if !cli.no_reviews && results.iter().any(|r| !r.reviews.is_empty()) {
        report::write_reviews(&cli.reviews, results)?;
        tracing::info!(path = %cli.reviews.display(), "reviews written");
    }

    if let Some(path) = &cli.markdown {
        report::write_markdown(path, results, &chrono::Local::now())?;
        tracing::info!(path = %path.display(), "markdown report written");
    }
    Ok(())
}
