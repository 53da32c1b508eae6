//! Sponsor-Finder main entry point
//!
//! This is the command-line interface for harvesting and verifying contact
//! emails on company websites.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use sponsor_finder::config::{load_config_with_hash, validate, Config, CrawlStrategy};
use sponsor_finder::output::{
    build_records, export_csv, export_json, print_emails, print_statistics,
    print_verification_summary, print_verification_table,
};
use sponsor_finder::storage::{open_storage, save_crawl_results, Storage};
use sponsor_finder::url::{parse_seed_url, site_root};
use sponsor_finder::verify::VerificationResult;
use sponsor_finder::EmailSearcher;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Sponsor-Finder: contact email harvesting for sponsorship outreach
///
/// Crawls a bounded number of pages on a company website, prioritising
/// contact, about, team and support pages, and lists the email addresses
/// it finds. Addresses can be checked for mail exchangers and, optionally,
/// probed over SMTP.
#[derive(Parser, Debug)]
#[command(name = "sponsor-finder")]
#[command(version = "1.0.0")]
#[command(about = "Find contact emails on company websites", long_about = None)]
struct Cli {
    /// Company website to search (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL", required_unless_present = "stats")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_pages: Option<i64>,

    /// Delay between page visits in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Visit pages in discovery order instead of analysing the homepage first
    #[arg(long)]
    breadth_first: bool,

    /// Fetch pages through the scraping proxy
    #[arg(long)]
    proxy: bool,

    /// Check each address's domain for MX records
    #[arg(long)]
    verify: bool,

    /// Also probe mail servers over SMTP (implies --verify)
    #[arg(long)]
    smtp: bool,

    /// Path to the SQLite database
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Do not save results to the database
    #[arg(long)]
    no_save: bool,

    /// Write results to a CSV file
    #[arg(long, value_name = "FILE")]
    export_csv: Option<PathBuf>,

    /// Write results to a JSON file
    #[arg(long, value_name = "FILE")]
    export_json: Option<PathBuf>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration")?;

    if cli.stats {
        return handle_stats(&config);
    }

    let Some(input) = cli.url.as_deref() else {
        bail!("A website URL is required");
    };
    let seed = parse_seed_url(input).with_context(|| format!("Invalid URL: {}", input))?;

    if cli.dry_run {
        handle_dry_run(&config, &seed);
        return Ok(());
    }

    handle_search(config, config_hash, seed, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sponsor_finder=info,warn"),
            1 => EnvFilter::new("sponsor_finder=debug,info"),
            2 => EnvFilter::new("sponsor_finder=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.delay_ms = delay_ms;
    }
    if cli.breadth_first {
        config.crawler.strategy = CrawlStrategy::BreadthFirst;
    }
    if cli.proxy {
        config.proxy.enabled = true;
    }
    if cli.smtp {
        config.verification.smtp = true;
    }
    if let Some(db) = &cli.db {
        config.output.database_path = db.display().to_string();
    }
}

/// Handles the --dry-run mode: shows the crawl plan for one site
fn handle_dry_run(config: &Config, seed: &Url) {
    println!("=== Sponsor-Finder Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", seed);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay: {}ms", config.crawler.delay_ms);
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!("  Link cap per page: {}", config.crawler.link_cap);
    println!("  Strategy: {:?}", config.crawler.strategy);
    println!("  Verify TLS: {}", config.crawler.verify_tls);
    println!("  Max body: {} bytes", config.crawler.max_body_bytes);
    println!(
        "  Proxy: {}",
        if config.proxy.enabled {
            config.proxy.endpoint.as_str()
        } else {
            "disabled"
        }
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    let root = site_root(seed);
    println!("\nContact Paths ({}):", config.filters.contact_paths.len());
    for path in &config.filters.contact_paths {
        match root.join(path) {
            Ok(url) => println!("  - {}", url),
            Err(_) => println!("  - {} (invalid)", path),
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))
        .context("Failed to open database")?;
    let stats = storage.statistics()?;
    let recent = storage.recent_searches(10)?;

    print_statistics(&stats, &recent);
    Ok(())
}

/// Handles the main search: crawl, verify, save and export
async fn handle_search(
    config: Config,
    config_hash: Option<String>,
    seed: Url,
    cli: &Cli,
) -> anyhow::Result<()> {
    let verify = cli.verify || config.verification.smtp;
    let smtp = config.verification.smtp;
    let database_path = PathBuf::from(&config.output.database_path);

    let searcher =
        EmailSearcher::from_config(config).context("Failed to set up the HTTP client")?;
    spawn_ctrl_c_watcher(&searcher);

    tracing::info!("Searching {} for contact emails", seed);
    let outcome = searcher.search(&seed).await;
    let emails = outcome.sorted_emails();

    print_emails(seed.as_str(), &emails);
    if outcome.was_stopped() {
        println!(
            "\nSearch interrupted after {} page(s); results are partial.",
            outcome.pages_visited
        );
    }

    let verification: Vec<VerificationResult> = if verify && !emails.is_empty() {
        if outcome.was_stopped() {
            tracing::warn!("Skipping verification of an interrupted search");
            Vec::new()
        } else {
            println!();
            let results = searcher.verify_emails(&emails, smtp).await;
            print_verification_table(&results);
            println!();
            print_verification_summary(&results);
            results
        }
    } else {
        Vec::new()
    };

    if !cli.no_save {
        let mut storage = open_storage(&database_path)
            .with_context(|| format!("Failed to open {}", database_path.display()))?;
        save_crawl_results(&mut storage, &seed, &emails, &verification)
            .context("Failed to save results")?;
        storage
            .record_search("email", seed.as_str(), emails.len(), config_hash.as_deref())
            .context("Failed to record search history")?;
    }

    if cli.export_csv.is_some() || cli.export_json.is_some() {
        let records = build_records(&seed, &emails, &verification);

        if let Some(path) = &cli.export_csv {
            export_csv(&records, path)
                .with_context(|| format!("Failed to export {}", path.display()))?;
            println!("✓ Exported CSV to: {}", path.display());
        }
        if let Some(path) = &cli.export_json {
            export_json(&records, path)
                .with_context(|| format!("Failed to export {}", path.display()))?;
            println!("✓ Exported JSON to: {}", path.display());
        }
    }

    Ok(())
}

/// Cancels the searcher's work on the first Ctrl-C
fn spawn_ctrl_c_watcher(searcher: &EmailSearcher) {
    let token = searcher.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with partial results");
            token.cancel();
        }
    });
}

