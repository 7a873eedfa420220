use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{
    providers::{NewsBackend, ProviderError},
    requests::NewsRequest,
};

/// Posts news requests to a remote news proxy over HTTP.
///
/// Requests are paced by a direct rate limiter so a burst of manual refreshes
/// cannot exceed `requests_per_minute`.
pub struct ProxyClient {
    client: Client,
    url: String,
    limiter: DefaultDirectRateLimiter,
}

impl ProxyClient {
    pub fn new(url: impl Into<String>, requests_per_minute: u32, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, url, requests_per_minute))
    }

    /// Uses a preconfigured HTTP client. A zero rate is raised to one request
    /// per minute.
    pub fn with_client(client: Client, url: impl Into<String>, requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            client,
            url: url.into(),
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl NewsBackend for ProxyClient {
    async fn send(&self, request: &NewsRequest) -> Result<Value, ProviderError> {
        self.limiter.until_ready().await;
        debug!(url = %self.url, request = %request.describe(), "posting to news proxy");

        let response = self.client.post(&self.url).json(&request.to_body()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
            return Err(ProviderError::from_error_body(status, &body));
        }

        Ok(response.json::<Value>().await?)
    }
}
