//! Request payloads sent to the news backend.
//!
//! A [`NewsRequest`] is the opaque payload a client posts to the news proxy.
//! Its JSON body is either `{ "sector": .. }` (bulk news) or
//! `{ "type": "insight", "newsItem": .. }` (single-item analysis).
//! The proxy turns it into an upstream [`prompt::MessagesRequest`].

pub mod prompt;

use serde_json::{Value, json};

use crate::models::news_item::NewsItem;

/// Value of the `type` field for insight requests.
pub const INSIGHT_TYPE: &str = "insight";

#[derive(Clone, Debug, PartialEq)]
pub enum NewsRequest {
    /// Ask for a fresh batch of news for one sector. Unknown sector names are
    /// allowed; they simply carry no stock or keyword hints.
    Sector(String),
    /// Ask for a trading insight on one story.
    Insight(Box<NewsItem>),
}

impl NewsRequest {
    pub fn bulk(sector: impl Into<String>) -> Self {
        NewsRequest::Sector(sector.into())
    }

    pub fn insight(item: &NewsItem) -> Self {
        NewsRequest::Insight(Box::new(item.clone()))
    }

    /// JSON body understood by the news proxy.
    pub fn to_body(&self) -> Value {
        match self {
            NewsRequest::Sector(sector) => json!({ "sector": sector }),
            NewsRequest::Insight(item) => json!({ "type": INSIGHT_TYPE, "newsItem": item }),
        }
    }

    /// Short label for logs.
    pub fn describe(&self) -> String {
        match self {
            NewsRequest::Sector(sector) => format!("sector news for {sector}"),
            NewsRequest::Insight(item) => format!("insight for {}", item.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_body_carries_only_sector() {
        let body = NewsRequest::bulk("Oil & Gas").to_body();
        assert_eq!(body, json!({ "sector": "Oil & Gas" }));
    }

    #[test]
    fn insight_body_carries_type_and_item() {
        let item = NewsItem::new("s2", "Reliance Q3", "Oil & Gas");
        let body = NewsRequest::insight(&item).to_body();
        assert_eq!(body["type"], json!("insight"));
        assert_eq!(body["newsItem"]["id"], json!("s2"));
        assert_eq!(body["newsItem"]["sector"], json!("Oil & Gas"));
        assert!(body.get("sector").is_none());
    }
}
