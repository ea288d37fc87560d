//! Trendsift: viral short-video discovery for keyword lists
//!
//! This crate fetches hashtag-indexed short videos for a list of search
//! keywords, keeps the ones above an engagement threshold, and exports the
//! aggregate to a CSV dataset. Sessions are authenticated with one or more
//! credential tokens and reused across keywords.

pub mod config;
pub mod crawl;
pub mod output;
pub mod platform;

use std::path::Path;
use thiserror::Error;

/// Main error type for Trendsift operations
#[derive(Debug, Error)]
pub enum TrendError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] platform::PlatformError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// Both the credential and keyword variants are fatal and surface before
/// any session is opened.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no credential found: set ms_token (or ms_tokens) with one or more \
         cookies separated by commas, semicolons, or whitespace"
    )]
    NoCredentials,

    #[error("Input CSV not found: {}", .0.display())]
    KeywordsNotFound(std::path::PathBuf),

    #[error("No keywords found in the first column of {}", .0.display())]
    NoKeywords(std::path::PathBuf),

    #[error("Failed to read keyword file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Trendsift operations
pub type Result<T> = std::result::Result<T, TrendError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{read_keywords, CredentialSources, TokenSet};
pub use crawl::{fetch_for_keyword, run_keywords, CrawlParams, VideoRecord};
pub use platform::{ClientProfile, HashtagFeed, SessionPool, TikTokClient};

/// Runs the full pipeline: resolve credentials and keywords, open sessions,
/// crawl every keyword, and export the aggregate.
///
/// Credential and keyword failures abort before any network activity. The
/// session pool lives for the duration of this call and is torn down on
/// every exit path, including fetch errors.
///
/// Returns the number of rows written to `output`.
pub async fn run(
    sources: &CredentialSources,
    input: &Path,
    output: &Path,
    profile: ClientProfile,
    params: CrawlParams,
) -> Result<usize> {
    let tokens = TokenSet::from_sources(sources)?;
    let keywords = read_keywords(input)?;

    tracing::info!(
        "Searching videos for {} keyword(s) with {} credential token(s)",
        keywords.len(),
        tokens.len()
    );

    let pool = SessionPool::open(&tokens, profile, platform::SESSION_SETTLE).await?;
    let client = TikTokClient::new(pool);

    let aggregate = run_keywords(&client, &keywords, params).await;

    let written = output::write_rows(output, &aggregate)?;
    tracing::info!("Wrote {} row(s) to {}", written, output.display());

    Ok(written)
}
