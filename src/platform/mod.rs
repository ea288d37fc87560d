//! Platform capability boundary.
//!
//! This module contains everything that talks to the video platform:
//! - Authenticated session establishment and rotation
//! - The [`HashtagFeed`] trait, a lazy per-hashtag video stream
//! - The concrete TikTok web API client behind that trait
//!
//! The rest of the pipeline only depends on [`HashtagFeed`], so tests can
//! substitute scripted feeds.

mod session;
mod tiktok;
mod types;

pub use session::{ClientProfile, Session, SessionPool, SESSION_SETTLE};
pub use tiktok::TikTokClient;
pub use types::{AuthorInfo, VideoMetadata, VideoStats};

use futures::stream::BoxStream;
use thiserror::Error;

/// Platform-specific errors
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("hashtag '{name}' not found on the platform")]
    ChallengeNotFound { name: String },

    #[error("credential token is not a valid cookie value")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for platform operations
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Lazy per-hashtag video feed.
///
/// Implementations yield videos on demand, in platform order, so the
/// consumer can stop pulling as soon as its local stopping condition is
/// met. Dropping the stream abandons any pages not yet requested.
pub trait HashtagFeed: Send + Sync {
    /// Returns a stream of at most `limit` videos for `hashtag` (given
    /// without the leading `#`).
    ///
    /// Item errors mean the feed itself could not be iterated; malformed
    /// individual videos are not errors and come through with empty fields.
    fn videos<'a>(
        &'a self,
        hashtag: &'a str,
        limit: usize,
    ) -> BoxStream<'a, PlatformResult<VideoMetadata>>;
}
