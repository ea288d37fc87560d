//! Trendsift main entry point
//!
//! This is the command-line interface for the Trendsift viral video finder.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trendsift::crawl::{CrawlParams, DEFAULT_MAX_PER_KEYWORD, DEFAULT_MIN_LIKES};
use trendsift::{ClientProfile, CredentialSources};

/// Trendsift: viral short-video discovery
///
/// Reads keywords from the first column of a CSV, fetches hashtag videos
/// through authenticated sessions, keeps the ones above a like threshold,
/// and exports everything to a single CSV.
#[derive(Parser, Debug)]
#[command(name = "trendsift")]
#[command(version = "1.0.0")]
#[command(about = "Find viral short videos for a keyword list and export them to CSV", long_about = None)]
struct Cli {
    /// Input CSV with keywords in the first column, one per row
    #[arg(short, long, value_name = "CSV")]
    input: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = "viral_videos.csv")]
    output: PathBuf,

    /// Minimum like count for a video to be kept
    #[arg(long, default_value_t = DEFAULT_MIN_LIKES)]
    min_likes: u64,

    /// Maximum accepted videos per keyword
    #[arg(long, default_value_t = DEFAULT_MAX_PER_KEYWORD)]
    max_per_keyword: usize,

    /// Browser profile for platform sessions: chromium, firefox, or webkit.
    /// Falls back to the TIKTOK_BROWSER environment variable.
    #[arg(long)]
    client: Option<ClientProfile>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let sources = CredentialSources::from_env();
    let profile = resolve_profile(cli.client)?;
    let params = CrawlParams {
        min_likes: cli.min_likes,
        max_per_keyword: cli.max_per_keyword,
    };

    trendsift::run(&sources, &cli.input, &cli.output, profile, params).await?;

    Ok(())
}

/// CLI flag wins; otherwise the TIKTOK_BROWSER variable, then the default.
fn resolve_profile(flag: Option<ClientProfile>) -> anyhow::Result<ClientProfile> {
    if let Some(profile) = flag {
        return Ok(profile);
    }
    match std::env::var("TIKTOK_BROWSER") {
        Ok(name) => ClientProfile::from_name(&name)
            .with_context(|| format!("unknown TIKTOK_BROWSER value: {name}")),
        Err(_) => Ok(ClientProfile::default()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("trendsift=info,warn"),
            1 => EnvFilter::new("trendsift=debug,info"),
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
