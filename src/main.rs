//! Web-Analyzer main entry point
//!
//! This is the command-line interface for the Web-Analyzer page analysis engine.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use web_analyzer::config::{load_config_with_hash, Config};
use web_analyzer::output::{
    collect_report, format_markdown_report, print_statistics, render_json, write_markdown_report,
    AnalysisStatistics,
};
use web_analyzer::storage::{open_memory_store, AnalysisStore};
use web_analyzer::url::validate_target_url;
use web_analyzer::{AnalysisOrchestrator, Submission};

/// Web-Analyzer: per-URL web page analysis
///
/// Web-Analyzer fetches each target page, reports its title, markup version,
/// heading histogram, link counts, and login form presence, and checks every
/// distinct link on the page for liveness.
#[derive(Parser, Debug)]
#[command(name = "web-analyzer")]
#[command(version = "1.0.0")]
#[command(about = "Per-URL web page analysis", long_about = None)]
struct Cli {
    /// URLs to analyze
    #[arg(value_name = "URL", required = true)]
    targets: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// Also write a markdown report to this file (overrides the config)
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Validate config and targets, show what would be analyzed, and exit
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    let targets = validate_targets(&cli.targets);
    if targets.is_empty() {
        bail!("No valid URLs to analyze");
    }

    let summary_path = cli
        .summary
        .clone()
        .or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));

    if cli.dry_run {
        handle_dry_run(&config, &targets, summary_path.as_deref());
        return Ok(());
    }

    handle_analysis(&config, &targets, cli.format, summary_path.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_analyzer=info,warn"),
            1 => EnvFilter::new("web_analyzer=debug,info"),
            2 => EnvFilter::new("web_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Keeps the targets that are absolute http(s) URLs, trimmed and deduplicated
fn validate_targets(targets: &[String]) -> Vec<String> {
    let mut valid = Vec::new();
    for target in targets {
        match validate_target_url(target) {
            Ok(_) => {
                let target = target.trim().to_string();
                if !valid.contains(&target) {
                    valid.push(target);
                }
            }
            Err(e) => tracing::error!("Skipping invalid URL {:?}: {}", target, e),
        }
    }
    valid
}

/// Handles the --dry-run mode: shows what would be analyzed
fn handle_dry_run(config: &Config, targets: &[String], summary_path: Option<&Path>) {
    println!("=== Web-Analyzer Dry Run ===\n");

    println!("User Agent: {}", config.user_agent.header_value());

    println!("\nFetcher:");
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!("  Connect timeout: {}s", config.fetcher.connect_timeout_secs);
    println!("  Max redirects: {}", config.fetcher.max_redirects);

    println!("\nLink Checker:");
    println!("  Timeout: {}s", config.link_checker.timeout_secs);
    println!("  Concurrency: {}", config.link_checker.concurrency);

    println!("\nAnalysis:");
    println!(
        "  Max concurrent analyses: {}",
        config.analysis.max_concurrent_analyses
    );
    println!("  Poll interval: {}ms", config.analysis.poll_interval_ms);

    if let Some(path) = summary_path {
        println!("\nSummary: {}", path.display());
    }

    println!("\nTargets ({}):", targets.len());
    for target in targets {
        println!("  - {}", target);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would analyze {} URLs", targets.len());
}

/// Handles the main analysis run
async fn handle_analysis(
    config: &Config,
    targets: &[String],
    format: ReportFormat,
    summary_path: Option<&Path>,
) -> anyhow::Result<()> {
    let store: Arc<dyn AnalysisStore> = open_memory_store();
    let orchestrator = AnalysisOrchestrator::from_config(config, Arc::clone(&store))
        .context("Failed to build HTTP clients")?;

    for target in targets {
        if orchestrator.submit(target) == Submission::Coalesced {
            tracing::debug!("{} is already being analyzed", target);
        }
    }

    let poll_interval = Duration::from_millis(config.analysis.poll_interval_ms);
    for target in targets {
        orchestrator.wait_for(target, poll_interval).await;
    }

    let report = collect_report(store.as_ref());
    match format {
        ReportFormat::Json => println!("{}", render_json(&report)?),
        ReportFormat::Markdown => print!("{}", format_markdown_report(&report)),
    }

    if let Some(path) = summary_path {
        write_markdown_report(&report, path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!("Report written to {}", path.display());
    }

    print_statistics(&AnalysisStatistics::from_report(&report));

    Ok(())
}
