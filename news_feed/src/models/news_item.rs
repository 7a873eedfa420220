//! Canonical in-memory representation of one market news story.
//!
//! The same struct is used for items generated by the text backend, items
//! pre-seeded at startup, and the `newsItem` field of an insight request. The
//! wire form is camelCase JSON; `timestamp` travels as Unix milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp of an item read without one. The feed store overwrites it on
/// ingestion.
pub const UNSTAMPED: DateTime<Utc> = DateTime::UNIX_EPOCH;

fn unstamped() -> DateTime<Utc> {
    UNSTAMPED
}

/// Market direction implied by a story.
///
/// Unrecognised values coming back from the backend are read as `Neutral`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// How time-critical a story is. Unrecognised values read as `Normal`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Breaking,
    High,
    #[default]
    #[serde(other)]
    Normal,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Breaking => "breaking",
            Urgency::High => "high",
            Urgency::Normal => "normal",
        }
    }
}

/// Expected market impact. Unrecognised values read as `Low`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

/// Short code of the outlet a story is attributed to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Et,
    Mint,
    Mc,
    Bs,
    Ndtv,
    Reuters,
    Bloomberg,
    Nse,
    Bse,
    Social,
    #[default]
    #[serde(other)]
    Unknown,
}

impl SourceId {
    /// Every known outlet code, in display order.
    pub const ALL: [SourceId; 10] = [
        SourceId::Et,
        SourceId::Mint,
        SourceId::Mc,
        SourceId::Bs,
        SourceId::Ndtv,
        SourceId::Reuters,
        SourceId::Bloomberg,
        SourceId::Nse,
        SourceId::Bse,
        SourceId::Social,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SourceId::Et => "et",
            SourceId::Mint => "mint",
            SourceId::Mc => "mc",
            SourceId::Bs => "bs",
            SourceId::Ndtv => "ndtv",
            SourceId::Reuters => "reuters",
            SourceId::Bloomberg => "bloomberg",
            SourceId::Nse => "nse",
            SourceId::Bse => "bse",
            SourceId::Social => "social",
            SourceId::Unknown => "unknown",
        }
    }

    /// Human-readable outlet name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::Et => "Economic Times",
            SourceId::Mint => "Mint",
            SourceId::Mc => "Moneycontrol",
            SourceId::Bs => "Business Standard",
            SourceId::Ndtv => "NDTV Profit",
            SourceId::Reuters => "Reuters",
            SourceId::Bloomberg => "Bloomberg",
            SourceId::Nse => "NSE Official",
            SourceId::Bse => "BSE Official",
            SourceId::Social => "Social Pulse",
            SourceId::Unknown => "Unknown",
        }
    }
}

/// One market news story.
///
/// Only `id` is required on the wire; everything else defaults so that a
/// loosely formatted backend answer still yields a usable item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Stable, globally unique identifier. This is the dedup key of the feed.
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    /// Outlet display name (e.g. "Economic Times").
    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub source_id: SourceId,

    /// Display string such as "Just now" or "14 min ago".
    #[serde(default)]
    pub time: String,

    /// Instant the item entered the feed. Items that have not been ingested
    /// yet carry [`UNSTAMPED`].
    #[serde(with = "chrono::serde::ts_milliseconds", default = "unstamped")]
    pub timestamp: DateTime<Utc>,

    /// Sector name; expected to be a key of the sector catalog.
    #[serde(default)]
    pub sector: String,

    #[serde(default)]
    pub sentiment: Sentiment,

    #[serde(default)]
    pub urgency: Urgency,

    #[serde(default)]
    pub impact: Impact,

    /// Affected ticker symbols, most relevant first.
    #[serde(default)]
    pub tickers: Vec<String>,

    /// True only during the highlight window right after ingestion.
    #[serde(default)]
    pub is_new: bool,
}

impl NewsItem {
    /// Builds a minimal item; the remaining fields take their defaults.
    pub fn new(id: impl Into<String>, title: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            source: String::new(),
            source_id: SourceId::default(),
            time: String::new(),
            timestamp: UNSTAMPED,
            sector: sector.into(),
            sentiment: Sentiment::default(),
            urgency: Urgency::default(),
            impact: Impact::default(),
            tickers: Vec::new(),
            is_new: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backend_shaped_object_deserializes() {
        let value = json!({
            "id": "live_1700000000000_1",
            "title": "HDFC Bank Q3 beats estimates",
            "source": "Economic Times",
            "sourceId": "et",
            "time": "Just now",
            "sector": "Banking & Finance",
            "sentiment": "bullish",
            "urgency": "high",
            "summary": "Net profit up 18% YoY.",
            "tickers": ["HDFCBANK", "BANKNIFTY"],
            "impact": "High"
        });

        let item: NewsItem = serde_json::from_value(value).unwrap();
        assert_eq!(item.source_id, SourceId::Et);
        assert_eq!(item.sentiment, Sentiment::Bullish);
        assert_eq!(item.urgency, Urgency::High);
        assert_eq!(item.impact, Impact::High);
        assert_eq!(item.tickers, vec!["HDFCBANK", "BANKNIFTY"]);
        assert!(!item.is_new);
        assert_eq!(item.timestamp, UNSTAMPED);
    }

    #[test]
    fn unknown_enum_values_fall_back() {
        let value = json!({
            "id": "x",
            "sourceId": "twitter",
            "sentiment": "mixed",
            "urgency": "critical",
            "impact": "Severe"
        });

        let item: NewsItem = serde_json::from_value(value).unwrap();
        assert_eq!(item.source_id, SourceId::Unknown);
        assert_eq!(item.sentiment, Sentiment::Neutral);
        assert_eq!(item.urgency, Urgency::Normal);
        assert_eq!(item.impact, Impact::Low);
        assert!(item.tickers.is_empty());
    }

    #[test]
    fn missing_id_is_rejected() {
        let result = serde_json::from_value::<NewsItem>(json!({ "title": "no id" }));
        assert!(result.is_err());
    }

    #[test]
    fn serializes_camel_case_with_millisecond_timestamp() {
        let mut item = NewsItem::new("s1", "Title", "IT & Tech");
        item.timestamp = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        item.is_new = true;

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["timestamp"], json!(1_700_000_000_123_i64));
        assert_eq!(value["isNew"], json!(true));
        assert_eq!(value["sourceId"], json!("unknown"));
    }
}
