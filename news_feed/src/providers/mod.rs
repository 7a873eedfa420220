//! Backend abstraction for news generation.
//!
//! [`NewsBackend`] is the single seam between the engine and the text
//! generation service. Everything above it (scheduler, insight session) only
//! sees JSON bodies in the messages-API shape; everything below it deals with
//! HTTP.
//!
//! Two implementations ship with the crate:
//! - [`proxy_client::ProxyClient`] posts to a remote news proxy.
//! - [`local::LocalProxy`] runs the proxy handler in-process.

pub mod local;
pub mod proxy_client;

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::{
    errors::FeedError,
    models::news_item::NewsItem,
    requests::NewsRequest,
    response::{parse_insight, parse_news_items},
};

/// Why a news or insight request did not produce a usable body.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The news proxy or upstream API could not be reached, or the exchange
    /// was cut short.
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx answer. `message` is what the caller should see.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// 2xx answer whose body is not JSON.
    #[error("API returned a non-JSON body: {0}")]
    Body(#[from] serde_json::Error),
}

impl ProviderError {
    /// Reads the `error` field of a proxy error body, or "API error" when
    /// there is none.
    pub fn from_error_body(status: StatusCode, body: &Value) -> Self {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("API error")
            .to_string();
        ProviderError::Api { status, message }
    }
}

/// Sends news requests to a text generation service.
#[async_trait]
pub trait NewsBackend: Send + Sync {
    /// Sends one request and returns the raw messages-API body.
    async fn send(&self, request: &NewsRequest) -> Result<Value, ProviderError>;
}

/// Fetches one sector's news and drops items whose id is already `known`.
pub async fn fetch_sector_news(
    backend: &dyn NewsBackend,
    sector: &str,
    known: &HashSet<String>,
) -> Result<Vec<NewsItem>, FeedError> {
    let body = backend.send(&NewsRequest::bulk(sector)).await?;
    Ok(parse_news_items(&body, known)?)
}

/// Generates a trading insight for one story.
pub async fn generate_insight(backend: &dyn NewsBackend, item: &NewsItem) -> Result<String, FeedError> {
    let body = backend.send(&NewsRequest::insight(item)).await?;
    Ok(parse_insight(&body))
}
