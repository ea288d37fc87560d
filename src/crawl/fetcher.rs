//! Per-keyword fetch and filter.

use crate::crawl::FETCH_COUNT_PER_KEYWORD;
use crate::platform::{HashtagFeed, PlatformResult, VideoMetadata};
use futures::StreamExt;

/// One accepted video, ready for export.
///
/// `like_count` is always known (it was compared against the threshold);
/// the other counters are passed through uninterpreted and may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub keyword: String,
    pub video_id: String,
    pub description: String,
    pub like_count: u64,
    pub comment_count: Option<u64>,
    pub share_count: Option<u64>,
    pub play_count: Option<u64>,
    pub author_handle: String,
    pub author_nickname: String,
    pub url: String,
}

impl VideoRecord {
    fn from_metadata(keyword: &str, meta: &VideoMetadata) -> Self {
        Self {
            keyword: keyword.to_string(),
            video_id: meta.id.clone(),
            description: meta.desc.clone(),
            like_count: meta.like_count(),
            comment_count: meta.stats.comment_count,
            share_count: meta.stats.share_count,
            play_count: meta.stats.play_count,
            author_handle: meta.author.unique_id.clone(),
            author_nickname: meta.author.nickname.clone(),
            url: meta.canonical_url(),
        }
    }
}

/// Fetches videos for one keyword, keeping those with at least `min_likes`
/// likes, up to `max_results`.
///
/// The keyword is normalized by stripping leading `#` markers before it is
/// handed to the feed; records still carry the keyword as given. The feed
/// is pulled lazily and dropped the moment the cap is reached, so
/// candidates past the stopping point are never requested.
///
/// Items below the threshold are skipped, never errors. An error here
/// means the feed itself could not be iterated.
pub async fn fetch_for_keyword<F>(
    feed: &F,
    keyword: &str,
    min_likes: u64,
    max_results: usize,
) -> PlatformResult<Vec<VideoRecord>>
where
    F: HashtagFeed + ?Sized,
{
    let normalized = keyword.trim_start_matches('#');
    let mut results = Vec::new();
    if max_results == 0 {
        return Ok(results);
    }

    let mut videos = feed.videos(normalized, FETCH_COUNT_PER_KEYWORD);
    while let Some(item) = videos.next().await {
        let meta = item?;

        if meta.like_count() < min_likes {
            continue;
        }

        results.push(VideoRecord::from_metadata(keyword, &meta));
        if results.len() >= max_results {
            break;
        }
    }

    Ok(results)
}
