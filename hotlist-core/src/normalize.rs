use serde::Deserialize;

use crate::error::ParseError;
use crate::model::TrendingItem;

// Mirror of the upstream response down the `data.trending.list` path.
// Fields not modelled here are dropped during deserialization.
#[derive(Debug, Deserialize)]
struct Payload {
    data: Option<PayloadData>,
}

#[derive(Debug, Deserialize)]
struct PayloadData {
    trending: Option<TrendingBlock>,
}

#[derive(Debug, Deserialize)]
struct TrendingBlock {
    list: Option<Vec<TrendingRecord>>,
}

#[derive(Debug, Deserialize)]
struct TrendingRecord {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    show_name: Option<String>,
}

/// Parses a raw upstream payload into trending items, preserving order.
///
/// A record with `keyword` or `show_name` absent (or null) still yields an
/// item with that field empty; only an unparsable payload or a missing
/// `data.trending.list` path is an error.
pub fn normalize(raw: &[u8]) -> Result<Vec<TrendingItem>, ParseError> {
    let payload: Payload = serde_json::from_slice(raw)?;
    let list = payload
        .data
        .ok_or(ParseError::MissingPath("data"))?
        .trending
        .ok_or(ParseError::MissingPath("data.trending"))?
        .list
        .ok_or(ParseError::MissingPath("data.trending.list"))?;

    Ok(list
        .into_iter()
        .map(|record| {
            TrendingItem::new(
                record.show_name.unwrap_or_default(),
                record.keyword.unwrap_or_default(),
            )
        })
        .collect())
}
