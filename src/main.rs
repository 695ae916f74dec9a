//! Leadline main entry point
//!
//! This is the command-line interface for the Leadline lead finder.

use anyhow::Context;
use clap::{ArgGroup, Parser};
use leadline::config::{load_or_default, resolve_credential, Config};
use leadline::pitch::{PitchClient, PitchRequest, PitchTemplate};
use leadline::places::PlacesClient;
use leadline::SiteCrawler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Leadline: find local businesses and the emails to reach them
///
/// Leadline searches a places directory for businesses in a niche, crawls
/// each business website for contact emails, and can draft a pitch email
/// for every lead it finds.
#[derive(Parser, Debug)]
#[command(name = "leadline")]
#[command(version)]
#[command(about = "Small-business lead finder and pitch drafter", long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["dry_run", "emails", "text", "niche"]),
))]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and print the effective settings
    #[arg(long)]
    dry_run: bool,

    /// Crawl a site and print the emails found, one per line
    #[arg(long, value_name = "URL")]
    emails: Option<String>,

    /// Crawl a site and print its text
    #[arg(long, value_name = "URL")]
    text: Option<String>,

    /// Business niche to search for, e.g. "car detailing"
    #[arg(long, value_name = "NICHE", requires = "location")]
    niche: Option<String>,

    /// Location to search in (repeatable)
    #[arg(long, value_name = "LOCATION", requires = "niche")]
    location: Vec<String>,

    /// Draft a pitch email for each lead with an email address
    #[arg(long, requires = "niche")]
    pitch: bool,

    /// Override the per-site page budget
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    let mut config = match load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from: {}", path.display());
    }

    if let Some(max_pages) = cli.max_pages {
        anyhow::ensure!(max_pages >= 1, "--max-pages must be at least 1");
        config.crawler.max_pages = max_pages;
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(url) = &cli.emails {
        handle_emails(&config, url).await?;
    } else if let Some(url) = &cli.text {
        handle_text(&config, url).await?;
    } else if let Some(niche) = &cli.niche {
        handle_leads(&config, niche, &cli.location, cli.pitch).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("leadline=info,warn"),
            1 => EnvFilter::new("leadline=debug,info"),
            2 => EnvFilter::new("leadline=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Leadline Dry Run ===\n");

    println!("Crawler:");
    println!("  Max pages per site: {}", config.crawler.max_pages);
    println!("  Max text chars: {}", config.crawler.max_chars);
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Politeness delay: {}ms", config.crawler.politeness_delay);
    println!("  User agent: {}", config.user_agent.user_agent);

    println!("\nPlaces:");
    println!("  Endpoint: {}", config.places.base_url);
    println!(
        "  API key: ${} ({})",
        config.places.api_key_env,
        credential_state(&config.places.api_key_env)
    );
    println!("  Search radius: {}m", config.places.search_radius);
    println!(
        "  Result pages per location: {}",
        config.places.max_result_pages
    );
    println!("  Lead limit: {}", config.places.lead_limit);

    println!("\nPitch:");
    println!("  Endpoint: {}", config.pitch.base_url);
    println!(
        "  API key: ${} ({})",
        config.pitch.api_key_env,
        credential_state(&config.pitch.api_key_env)
    );
    println!(
        "  Model: {} (temperature {}, max tokens {})",
        config.pitch.model, config.pitch.temperature, config.pitch.max_tokens
    );
    match &config.pitch.template_path {
        Some(path) => println!("  Template: {}", path),
        None => println!("  Template: built-in"),
    }

    println!("\n✓ Configuration is valid");
}

fn credential_state(env_var: &str) -> &'static str {
    if resolve_credential(env_var).is_ok() {
        "set"
    } else {
        "not set"
    }
}

/// Handles the --emails mode
async fn handle_emails(config: &Config, url: &str) -> anyhow::Result<()> {
    let crawler = SiteCrawler::new(config)?;
    let report = crawler
        .crawl_emails_report(url, config.crawler.max_pages)
        .await?;

    if report.all_failed() {
        tracing::warn!("No page of {} could be fetched", url);
    }

    for email in &report.output {
        println!("{}", email);
    }

    Ok(())
}

/// Handles the --text mode
async fn handle_text(config: &Config, url: &str) -> anyhow::Result<()> {
    let crawler = SiteCrawler::new(config)?;
    let text = crawler
        .crawl_for_text(url, config.crawler.max_pages, config.crawler.max_chars)
        .await?;

    println!("{}", text);
    Ok(())
}

/// Handles lead search: directory lookup, email enrichment, optional pitch
async fn handle_leads(
    config: &Config,
    niche: &str,
    locations: &[String],
    pitch: bool,
) -> anyhow::Result<()> {
    let places_key = resolve_credential(&config.places.api_key_env)?;
    let places = PlacesClient::new(&config.places, places_key)?;
    let crawler = SiteCrawler::new(config)?;

    // Resolve pitch credentials before any directory call
    let pitcher = if pitch {
        let key = resolve_credential(&config.pitch.api_key_env)?;
        let template = PitchTemplate::from_config(&config.pitch)
            .context("Failed to load pitch template")?;
        Some(PitchClient::new(&config.pitch, key, template)?)
    } else {
        None
    };

    tracing::info!("Searching for {:?} in {}", niche, locations.join(", "));
    let mut leads = places
        .get_leads(niche, locations, config.places.max_result_pages)
        .await?;
    leads.truncate(config.places.lead_limit);

    let total = leads.len();
    let mut with_email = 0;

    for mut lead in leads {
        if lead.needs_email() {
            if let Some(website) = lead.website.clone() {
                match crawler
                    .crawl_for_emails(&website, config.crawler.max_pages)
                    .await
                {
                    Ok(emails) => lead.email = emails.into_iter().next(),
                    Err(e) => tracing::warn!("Skipping website of {}: {}", lead.name, e),
                }
            }
        }

        let mut record = lead.to_json();

        if lead.email.is_some() {
            with_email += 1;

            if let Some(pitcher) = &pitcher {
                let site_text = match &lead.website {
                    Some(website) => {
                        crawler
                            .crawl_text_or_empty(
                                website,
                                config.crawler.max_pages,
                                config.crawler.max_chars,
                            )
                            .await
                    }
                    None => String::new(),
                };

                let request = PitchRequest::from_lead(&lead, site_text);
                match pitcher.generate(&request).await {
                    Ok(generated) => record["pitch"] = serde_json::to_value(&generated)?,
                    Err(e) => tracing::warn!("Pitch failed for {}: {}", lead.name, e),
                }
            }
        }

        println!("{}", record);
    }

    tracing::info!("{} lead(s), {} with an email address", total, with_email);
    Ok(())
}
