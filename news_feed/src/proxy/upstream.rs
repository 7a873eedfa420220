//! The text generation service behind the news proxy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use secrecy::{ExposeSecret, SecretString};

use crate::{providers::ProviderError, requests::prompt::MessagesRequest};

/// Raw upstream answer. The body is kept as text so error bodies can be
/// relayed verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: StatusCode,
    pub body: String,
}

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn post_messages(
        &self,
        api_key: &SecretString,
        request: &MessagesRequest,
    ) -> Result<UpstreamReply, ProviderError>;
}

/// Messages API client authenticated with `x-api-key`.
pub struct AnthropicUpstream {
    client: Client,
    api_base: String,
    api_version: String,
}

impl AnthropicUpstream {
    pub fn new(
        api_base: impl Into<String>,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: api_base.into(),
            api_version: api_version.into(),
        })
    }
}

#[async_trait]
impl Upstream for AnthropicUpstream {
    async fn post_messages(
        &self,
        api_key: &SecretString,
        request: &MessagesRequest,
    ) -> Result<UpstreamReply, ProviderError> {
        let response = self
            .client
            .post(&self.api_base)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", self.api_version.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(UpstreamReply { status, body })
    }
}
