//! serp-scrape CLI - run the scraping API or a one-shot search.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use serp_scrape::{
    AcquirerConfig, BrowserAcquirer, HttpAcquirer, Pacing, PageAcquirer, ResultExtractor,
    SearchPipeline, SearchQuery,
};

/// Organic search-result scraper
#[derive(Parser)]
#[command(name = "serp-scrape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the Chrome/Chromium executable (auto-detected by default)
    #[arg(long, global = true)]
    chrome: Option<String>,

    /// Run the browser with a visible window instead of headless
    #[arg(long, global = true)]
    visible: bool,

    /// Use plain HTTP acquisition instead of a headless browser
    #[arg(long, global = true)]
    http_fallback: bool,

    /// Skip the randomized anti-detection delay
    #[arg(long, global = true)]
    no_delay: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Run a one-shot search and print the results
    Search(SearchArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    bind: String,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search keyword
    query: String,

    /// Readiness-wait timeout in seconds
    #[arg(short, long, default_value = "20")]
    timeout: u64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let mut config = AcquirerConfig {
        chrome_path: cli.chrome.clone(),
        headless: !cli.visible,
        ..Default::default()
    };
    if cli.no_delay {
        config.pacing = Pacing::none();
    }

    match cli.command {
        Commands::Serve(args) => run_serve(args, config, cli.http_fallback).await,
        Commands::Search(args) => run_search(args, config, cli.http_fallback).await,
    }
}

fn build_pipeline(config: AcquirerConfig, http_fallback: bool) -> Result<SearchPipeline> {
    let acquirer: Arc<dyn PageAcquirer> = if http_fallback {
        Arc::new(HttpAcquirer::with_config(config)?)
    } else {
        Arc::new(BrowserAcquirer::with_config(config))
    };
    Ok(SearchPipeline::new(acquirer, ResultExtractor::new()?))
}

async fn run_serve(args: ServeArgs, config: AcquirerConfig, http_fallback: bool) -> Result<()> {
    let pipeline = Arc::new(build_pipeline(config, http_fallback)?);
    serp_scrape::web::run(&args.bind, pipeline).await
}

async fn run_search(args: SearchArgs, mut config: AcquirerConfig, http_fallback: bool) -> Result<()> {
    config.wait_timeout = Duration::from_secs(args.timeout);
    let pipeline = build_pipeline(config, http_fallback)?;

    let query = SearchQuery::parse(&args.query)?;
    let results = pipeline.run(&query).await?;

    match args.format {
        OutputFormat::Text => {
            if results.is_empty() {
                println!("No results for \"{}\"", query);
                return Ok(());
            }
            println!("\nResults for \"{}\":\n", query);
            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   URL: {}", result.url);
                if !result.description.is_empty() {
                    println!("   {}", result.description);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }

    Ok(())
}
