//! Wire format of the platform's video metadata.
//!
//! Only the fields the pipeline reads are modeled; the rest of the payload
//! is ignored. Every field is defaulted so a sparse or malformed item never
//! fails the page it arrived on.

use serde::{Deserialize, Deserializer};

/// One video as returned by the challenge item-list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoMetadata {
    pub id: String,
    pub desc: String,
    pub stats: VideoStats,
    pub author: AuthorInfo,
}

/// Engagement counters attached to a video.
///
/// Counts arrive as numbers or numeric strings depending on payload
/// vintage; anything unparseable is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoStats {
    #[serde(rename = "diggCount", deserialize_with = "lenient_count")]
    pub digg_count: Option<u64>,

    #[serde(rename = "commentCount", deserialize_with = "lenient_count")]
    pub comment_count: Option<u64>,

    #[serde(rename = "shareCount", deserialize_with = "lenient_count")]
    pub share_count: Option<u64>,

    #[serde(rename = "playCount", deserialize_with = "lenient_count")]
    pub play_count: Option<u64>,
}

/// Author info nested in a video item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorInfo {
    #[serde(rename = "uniqueId")]
    pub unique_id: String,
    pub nickname: String,
}

impl VideoMetadata {
    /// Like count with missing or non-numeric values treated as zero.
    pub fn like_count(&self) -> u64 {
        self.stats.digg_count.unwrap_or(0)
    }

    /// Canonical watch URL for the video.
    pub fn canonical_url(&self) -> String {
        format!(
            "https://www.tiktok.com/@{}/video/{}",
            self.author.unique_id, self.id
        )
    }
}

/// Accepts a count as a JSON number or numeric string; anything else maps
/// to `None` rather than an error.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}
