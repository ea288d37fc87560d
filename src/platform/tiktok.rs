//! TikTok web API client.
//!
//! A thin client over the challenge endpoints: resolve the hashtag name to
//! a challenge id, then page through the item list with a cursor. Pages are
//! only requested while the consumer keeps pulling the stream, which is
//! what makes early stop cheap.

use crate::platform::session::SessionPool;
use crate::platform::types::VideoMetadata;
use crate::platform::{HashtagFeed, PlatformError, PlatformResult};
use futures::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;
use std::collections::VecDeque;
use url::Url;

/// Items requested per page. The platform serves at most roughly this many
/// per call regardless of the `count` parameter.
const PAGE_SIZE: usize = 30;

const DEFAULT_API_BASE: &str = "https://www.tiktok.com/api";

/// Client for the platform's web API, backed by a [`SessionPool`].
pub struct TikTokClient {
    pool: SessionPool,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct ChallengeDetailResponse {
    #[serde(rename = "challengeInfo")]
    challenge_info: Option<ChallengeInfo>,
}

#[derive(Debug, Deserialize)]
struct ChallengeInfo {
    challenge: Option<Challenge>,
}

#[derive(Debug, Deserialize)]
struct Challenge {
    #[serde(default)]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ItemListResponse {
    #[serde(rename = "itemList")]
    item_list: Vec<VideoMetadata>,
    cursor: Option<serde_json::Value>,
    #[serde(rename = "hasMore")]
    has_more: bool,
}

impl TikTokClient {
    pub fn new(pool: SessionPool) -> Self {
        Self::with_api_base(pool, DEFAULT_API_BASE)
    }

    /// Uses an alternate API base; integration tests point this at a mock
    /// server.
    pub fn with_api_base(pool: SessionPool, api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self { pool, api_base }
    }

    pub fn session_count(&self) -> usize {
        self.pool.len()
    }

    fn endpoint(&self, segment: &str) -> PlatformResult<Url> {
        Ok(Url::parse(&format!("{}/{}", self.api_base, segment))?)
    }

    /// Resolves a hashtag name to its challenge id.
    async fn challenge_id(&self, name: &str) -> PlatformResult<String> {
        let session = self.pool.checkout();
        let url = self.endpoint("challenge/detail/")?;

        let detail: ChallengeDetailResponse = session
            .client()
            .get(url)
            .query(&[
                ("challengeName", name),
                ("device_id", session.device_id()),
                ("msToken", session.token()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        detail
            .challenge_info
            .and_then(|info| info.challenge)
            .map(|challenge| challenge.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PlatformError::ChallengeNotFound {
                name: name.to_string(),
            })
    }

    /// Fetches one page of the challenge item list.
    async fn item_page(
        &self,
        challenge_id: &str,
        cursor: u64,
        count: usize,
    ) -> PlatformResult<ItemListResponse> {
        let session = self.pool.checkout();
        let url = self.endpoint("challenge/item_list/")?;

        let page = session
            .client()
            .get(url)
            .query(&[
                ("challengeID", challenge_id),
                ("cursor", &cursor.to_string()),
                ("count", &count.to_string()),
                ("device_id", session.device_id()),
                ("msToken", session.token()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(page)
    }
}

impl HashtagFeed for TikTokClient {
    fn videos<'a>(
        &'a self,
        hashtag: &'a str,
        limit: usize,
    ) -> BoxStream<'a, PlatformResult<VideoMetadata>> {
        struct FeedState<'a> {
            client: &'a TikTokClient,
            hashtag: &'a str,
            challenge_id: Option<String>,
            buffer: VecDeque<VideoMetadata>,
            cursor: u64,
            yielded: usize,
            limit: usize,
            exhausted: bool,
        }

        let state = FeedState {
            client: self,
            hashtag,
            challenge_id: None,
            buffer: VecDeque::new(),
            cursor: 0,
            yielded: 0,
            limit,
            exhausted: false,
        };

        stream::try_unfold(state, |mut st| async move {
            if st.yielded >= st.limit {
                return Ok(None);
            }

            while st.buffer.is_empty() && !st.exhausted {
                // The challenge id is resolved lazily, on the first pull.
                let id = match &st.challenge_id {
                    Some(id) => id.clone(),
                    None => {
                        let id = st.client.challenge_id(st.hashtag).await?;
                        st.challenge_id = Some(id.clone());
                        id
                    }
                };

                let remaining = st.limit - st.yielded;
                let page = st
                    .client
                    .item_page(&id, st.cursor, remaining.min(PAGE_SIZE))
                    .await?;

                st.cursor = parse_cursor(page.cursor.as_ref())
                    .unwrap_or(st.cursor + page.item_list.len() as u64);
                if page.item_list.is_empty() || !page.has_more {
                    st.exhausted = true;
                }
                st.buffer.extend(page.item_list);
            }

            match st.buffer.pop_front() {
                Some(item) => {
                    st.yielded += 1;
                    Ok(Some((item, st)))
                }
                None => Ok(None),
            }
        })
        .boxed()
    }
}

/// Cursors come back as numbers or strings depending on payload vintage.
fn parse_cursor(value: Option<&serde_json::Value>) -> Option<u64> {
    match value? {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{CredentialSources, TokenSet};
    use crate::platform::session::ClientProfile;
    use std::time::Duration;

    async fn test_client(api_base: &str) -> TikTokClient {
        let tokens = TokenSet::from_sources(&CredentialSources::from_values(["tok"])).unwrap();
        let pool = SessionPool::open(&tokens, ClientProfile::default(), Duration::ZERO)
            .await
            .unwrap();
        TikTokClient::with_api_base(pool, api_base)
    }

    #[tokio::test]
    async fn test_api_base_trailing_slashes_are_trimmed() {
        let client = test_client("http://127.0.0.1:1/api///").await;
        let url = client.endpoint("challenge/detail/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:1/api/challenge/detail/");
    }

    #[test]
    fn test_parse_cursor_accepts_number_and_string() {
        let number = serde_json::json!(30);
        let string = serde_json::json!("60");
        let junk = serde_json::json!([1, 2]);

        assert_eq!(parse_cursor(Some(&number)), Some(30));
        assert_eq!(parse_cursor(Some(&string)), Some(60));
        assert_eq!(parse_cursor(Some(&junk)), None);
    }

    #[test]
    fn test_item_list_response_defaults() {
        let page: ItemListResponse = serde_json::from_str("{}").unwrap();
        assert!(page.item_list.is_empty());
        assert!(!page.has_more);
        assert!(page.cursor.is_none());
    }

    #[test]
    fn test_challenge_detail_parses() {
        let detail: ChallengeDetailResponse = serde_json::from_str(
            r#"{"challengeInfo": {"challenge": {"id": "1234", "title": "cats"}}}"#,
        )
        .unwrap();
        let id = detail
            .challenge_info
            .and_then(|info| info.challenge)
            .map(|c| c.id);
        assert_eq!(id.as_deref(), Some("1234"));
    }
}
