//! Sequential keyword loop with per-keyword failure isolation.

use crate::crawl::fetcher::{fetch_for_keyword, VideoRecord};
use crate::crawl::{DEFAULT_MAX_PER_KEYWORD, DEFAULT_MIN_LIKES};
use crate::platform::HashtagFeed;

/// Fetch parameters shared by every keyword in a run.
#[derive(Debug, Clone, Copy)]
pub struct CrawlParams {
    pub min_likes: u64,
    pub max_per_keyword: usize,
}

impl Default for CrawlParams {
    fn default() -> Self {
        Self {
            min_likes: DEFAULT_MIN_LIKES,
            max_per_keyword: DEFAULT_MAX_PER_KEYWORD,
        }
    }
}

/// Runs the fetch loop over `keywords`, strictly sequentially.
///
/// Sequential because the limited session pool is shared across keywords;
/// interleaving fetches would risk the platform's per-session concurrency
/// assumptions. A failed keyword is logged and skipped with no retry; it
/// contributes zero rows and never aborts the run. The aggregate keeps
/// keyword order, then fetch order within each keyword, and is returned
/// even when every keyword failed.
pub async fn run_keywords<F>(feed: &F, keywords: &[String], params: CrawlParams) -> Vec<VideoRecord>
where
    F: HashtagFeed + ?Sized,
{
    let mut aggregate = Vec::new();

    for keyword in keywords {
        tracing::info!("Fetching videos for '{}'", keyword);

        match fetch_for_keyword(feed, keyword, params.min_likes, params.max_per_keyword).await {
            Ok(rows) => {
                tracing::info!(
                    "'{}': {} video(s) with >= {} likes",
                    keyword,
                    rows.len(),
                    params.min_likes
                );
                aggregate.extend(rows);
            }
            Err(e) => {
                tracing::warn!("Skipping keyword '{}': {}", keyword, e);
            }
        }
    }

    aggregate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::fetcher::tests::meta;
    use crate::platform::{PlatformError, PlatformResult, VideoMetadata};
    use futures::stream::{self, BoxStream, StreamExt};
    use std::collections::HashMap;

    /// Feed serving different item lists per hashtag; unknown hashtags fail.
    struct KeyedFeed {
        feeds: HashMap<String, Vec<VideoMetadata>>,
    }

    impl KeyedFeed {
        fn new(entries: Vec<(&str, Vec<VideoMetadata>)>) -> Self {
            Self {
                feeds: entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            }
        }
    }

    impl HashtagFeed for KeyedFeed {
        fn videos<'a>(
            &'a self,
            hashtag: &'a str,
            limit: usize,
        ) -> BoxStream<'a, PlatformResult<VideoMetadata>> {
            match self.feeds.get(hashtag) {
                Some(items) => stream::iter(items.iter().cloned().take(limit).map(Ok)).boxed(),
                None => {
                    let name = hashtag.to_string();
                    stream::once(async move { Err(PlatformError::ChallengeNotFound { name }) })
                        .boxed()
                }
            }
        }
    }

    fn words(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_failed_keyword_is_isolated() {
        let feed = KeyedFeed::new(vec![
            ("cats", vec![meta("c1", 5000), meta("c2", 6000)]),
            ("birds", vec![meta("b1", 7000)]),
        ]);
        let params = CrawlParams {
            min_likes: 1000,
            max_per_keyword: 20,
        };

        // "dogs" has no feed entry and fails; the others still land, in order.
        let aggregate = run_keywords(&feed, &words(&["#cats", "dogs", "birds"]), params).await;

        let ids: Vec<&str> = aggregate.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "b1"]);
        assert!(aggregate.iter().all(|r| r.keyword != "dogs"));
    }

    #[tokio::test]
    async fn test_total_failure_yields_empty_aggregate() {
        let feed = KeyedFeed::new(vec![]);
        let aggregate = run_keywords(&feed, &words(&["dogs", "fish"]), CrawlParams::default()).await;
        assert!(aggregate.is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_keeps_keyword_then_fetch_order() {
        let feed = KeyedFeed::new(vec![
            ("b", vec![meta("b1", 2000), meta("b2", 3000)]),
            ("a", vec![meta("a1", 4000)]),
        ]);
        let params = CrawlParams {
            min_likes: 1000,
            max_per_keyword: 20,
        };

        let aggregate = run_keywords(&feed, &words(&["b", "a"]), params).await;

        let ids: Vec<&str> = aggregate.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, vec!["b1", "b2", "a1"]);
    }

    #[tokio::test]
    async fn test_cap_applies_per_keyword() {
        let feed = KeyedFeed::new(vec![
            ("a", vec![meta("a1", 2000), meta("a2", 2000), meta("a3", 2000)]),
            ("b", vec![meta("b1", 2000), meta("b2", 2000)]),
        ]);
        let params = CrawlParams {
            min_likes: 1000,
            max_per_keyword: 2,
        };

        let aggregate = run_keywords(&feed, &words(&["a", "b"]), params).await;
        assert_eq!(aggregate.len(), 4);
    }
}
