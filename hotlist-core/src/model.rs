use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Tag stored on every item so consumers can tell which provider it came from.
pub const SOURCE_TYPE: &str = "bilibili";

const SEARCH_URL: &str = "https://search.bilibili.com/all";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrendingItem {
    pub show_name: String,
    pub keyword: String,
    pub link: String,
    #[serde(rename = "type")]
    pub source_type: String,
}

impl TrendingItem {
    /// Builds an item from the two upstream-provided fields. `link` and
    /// `source_type` are always derived here, never read from upstream.
    pub fn new(show_name: impl Into<String>, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let link = search_link(&keyword);
        Self {
            show_name: show_name.into(),
            keyword,
            link,
            source_type: SOURCE_TYPE.to_owned(),
        }
    }
}

/// Search URL for a keyword. Pure: equal keywords always yield equal links.
pub fn search_link(keyword: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(keyword.as_bytes()).collect();
    format!("{}?keyword={}", SEARCH_URL, encoded)
}

/// The complete cached state: one ordered list of items plus the moment it
/// was fetched. Replaced whole by every successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheSnapshot {
    pub items: Vec<TrendingItem>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheSnapshot {
    pub fn new(items: Vec<TrendingItem>) -> Self {
        Self {
            items,
            fetched_at: Utc::now(),
        }
    }

    /// Time since this snapshot was fetched, or `None` when the stored
    /// timestamp lies in the future (clock moved backwards).
    pub fn age(&self) -> Option<std::time::Duration> {
        Utc::now()
            .signed_duration_since(self.fetched_at)
            .to_std()
            .ok()
    }
}
