//! Newswatch CLI - fetch, filter, summarize, and email a news digest.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newswatch::digest::{EmailConfig, EmailSender, Summarizer, DEFAULT_CONFIG_FILE, DEFAULT_MODEL};
use newswatch::feeds::{default_sources, FeedFetcher};
use newswatch::pipeline::{Digest, DigestPipeline, PipelineConfig, DEFAULT_MAX_RESULTS};
use newswatch::render::{self, SummaryState};
use newswatch::storage::OutputWriter;
use newswatch::RelevanceFilter;

/// Newswatch - keyword-filtered news digest over RSS/Atom feeds.
#[derive(Parser)]
#[command(name = "newswatch")]
#[command(about = "Fetch, filter, and email a keyword news digest")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full digest cycle (the default when no subcommand is given)
    Run(RunArgs),

    /// Interactively (re)create the stored email configuration
    Setup {
        /// Config file path
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },

    /// Send a probe email to verify the stored configuration
    TestEmail {
        /// Config file path
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunArgs::default())
    }
}

#[derive(Args)]
struct RunArgs {
    /// Output directory for digest artifacts
    #[arg(long, default_value = "digests")]
    output: PathBuf,

    /// Maximum number of items to keep
    #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: usize,

    /// Keyword to filter on (repeatable; replaces the default set)
    #[arg(long = "keyword")]
    keywords: Vec<String>,

    /// Email config file path
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Model used for the AI summary
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Write the output files but skip the summary and email steps
    #[arg(long)]
    skip_email: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from("digests"),
            max_results: DEFAULT_MAX_RESULTS,
            keywords: Vec::new(),
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            model: DEFAULT_MODEL.to_string(),
            skip_email: false,
        }
    }
}

/// Why delivery failed - decides whether the outer fallback email still
/// applies.
enum DeliveryError {
    /// Both notification paths were already attempted; do not retry.
    Notification(anyhow::Error),
    /// Failure before or outside notification.
    Other(anyhow::Error),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("newswatch=debug,info")
    } else {
        EnvFilter::new("newswatch=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command.unwrap_or_default() {
        Commands::Run(args) => run_digest(args).await,
        Commands::Setup { config } => run_setup(&config),
        Commands::TestEmail { config } => run_test_email(&config).await,
    }
}

async fn run_digest(args: RunArgs) -> Result<()> {
    let filter = if args.keywords.is_empty() {
        RelevanceFilter::default()
    } else {
        RelevanceFilter::new(args.keywords.clone())
    };
    let fetcher = Arc::new(FeedFetcher::new(filter).context("failed to set up feed fetcher")?);
    let pipeline = DigestPipeline::new(
        fetcher,
        PipelineConfig {
            max_results: args.max_results,
            ..PipelineConfig::default()
        },
    );

    let sources = default_sources();
    println!("Starting to fetch news from {} RSS feeds...", sources.len());
    let digest = pipeline.collect(&sources).await;
    print_run_summary(&digest, args.max_results);

    match deliver(&digest, &args).await {
        Ok(()) => {
            println!("Digest run completed.");
            Ok(())
        }
        Err(DeliveryError::Notification(e)) => {
            // The degraded email was already attempted inside deliver().
            Err(e)
        }
        Err(DeliveryError::Other(e)) => {
            eprintln!("❌ Digest run failed: {e:#}");
            // Best-effort partial-data email before terminating; only a
            // stored config is usable here (never prompt on the error path).
            if !digest.is_empty() && !args.skip_email {
                if let Ok(config) = EmailConfig::load(&args.config) {
                    let sender = EmailSender::new(config);
                    match send_digest_email(&sender, &digest, SummaryState::Failed).await {
                        Ok(()) => println!("Sent partial-data email."),
                        Err(send_err) => {
                            eprintln!("Failed to send even the partial-data email: {send_err:#}");
                        }
                    }
                }
            }
            Err(e)
        }
    }
}

/// Render, save, summarize, and email one collected digest.
async fn deliver(digest: &Digest, args: &RunArgs) -> std::result::Result<(), DeliveryError> {
    let now = Local::now().naive_local();

    let csv = render::to_csv(&digest.items);
    let document = render::document(&digest.items, now);

    let writer = OutputWriter::new(args.output.clone());
    let paths = writer
        .write(now.date(), &csv, &document)
        .map_err(DeliveryError::Other)?;
    println!(
        "Saved digest to {} and {}",
        paths.csv.display(),
        paths.html.display()
    );

    if args.skip_email {
        return Ok(());
    }

    let config = EmailConfig::load_or_setup(&args.config).map_err(DeliveryError::Other)?;

    println!("Generating AI summary...");
    let summary = match Summarizer::from_env(args.model.clone()) {
        Ok(summarizer) => match summarizer.summarize(&document).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(error = %e, "AI summary unavailable");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "AI summary unavailable");
            None
        }
    };

    let state = match summary.as_deref() {
        Some(text) => SummaryState::Available(text),
        None => SummaryState::Unavailable,
    };

    let sender = EmailSender::new(config);
    println!("Sending digest email...");
    match send_digest_email(&sender, digest, state).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("❌ Failed to send digest email: {e:#}");
            if digest.is_empty() {
                return Err(DeliveryError::Notification(e));
            }
            // Degraded path: digest only, explicit summary-failed marker.
            println!("Retrying with a digest-only email...");
            match send_digest_email(&sender, digest, SummaryState::Failed).await {
                Ok(()) => {
                    println!("Sent digest-only fallback email.");
                    Ok(())
                }
                Err(fallback_err) => Err(DeliveryError::Notification(
                    fallback_err.context("fallback email failed"),
                )),
            }
        }
    }
}

async fn send_digest_email(
    sender: &EmailSender,
    digest: &Digest,
    summary: SummaryState<'_>,
) -> Result<()> {
    let date_str = Local::now().format("%A, %B %d, %Y").to_string();
    let html = render::email_html(&date_str, summary, &digest.items);
    let text = render::email_text(&date_str, summary, &digest.items);
    let subject = format!("Daily News Digest - {date_str}");

    sender.send(&subject, &html, &text).await?;
    println!("✅ Email sent to {}", sender.recipient());
    Ok(())
}

fn print_run_summary(digest: &Digest, max_results: usize) {
    println!("\n=== SUMMARY ===");
    println!("Feeds processed: {}", digest.sources_attempted);
    println!("Successful feeds: {}", digest.sources_succeeded);
    println!("Failed feeds: {}", digest.sources_failed);
    println!("Entries checked: {}", digest.entries_checked);
    println!(
        "Kept {} matching news items (limited to {max_results}).",
        digest.items.len()
    );
}

fn run_setup(config_path: &Path) -> Result<()> {
    println!("Newswatch - Email Configuration Setup\n");
    let config = EmailConfig::setup_interactive()?;
    config.save(config_path)?;
    println!("✅ Configuration saved to {}", config_path.display());
    Ok(())
}

async fn run_test_email(config_path: &Path) -> Result<()> {
    let config = EmailConfig::load(config_path).with_context(|| {
        format!(
            "no usable email configuration at {} - run `newswatch setup` first",
            config_path.display()
        )
    })?;
    let sender = EmailSender::new(config);
    sender.send_test().await?;
    println!("✅ Test email sent.");
    Ok(())
}
