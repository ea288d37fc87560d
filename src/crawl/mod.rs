//! Fetch-filter-aggregate pipeline.
//!
//! This module contains the core run logic:
//! - Per-keyword fetch with engagement filtering and early stop
//! - The sequential keyword loop with per-keyword failure isolation

mod fetcher;
mod orchestrator;

pub use fetcher::{fetch_for_keyword, VideoRecord};
pub use orchestrator::{run_keywords, CrawlParams};

/// Default minimum like count for a video to be accepted.
pub const DEFAULT_MIN_LIKES: u64 = 25_000;

/// Default cap on accepted videos per keyword.
pub const DEFAULT_MAX_PER_KEYWORD: usize = 20;

/// Upstream fetch window per keyword. Larger than any plausible accepted
/// count so the filter sees enough candidates, while still bounding the
/// number of external calls.
pub const FETCH_COUNT_PER_KEYWORD: usize = 200;
