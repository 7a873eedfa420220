//! The news proxy: the only component that holds the upstream credential.
//!
//! [`ProxyHandler::handle`] is transport-agnostic. It takes a method and a
//! JSON body and returns a status plus JSON body, so it can sit behind any
//! HTTP server or be called in-process through
//! [`crate::providers::local::LocalProxy`].

pub mod upstream;

use chrono::Utc;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use shared_utils::env::get_env_var;
use tracing::{debug, warn};

use crate::{
    errors::FeedError,
    models::news_item::NewsItem,
    providers::ProviderError,
    requests::{
        INSIGHT_TYPE, NewsRequest,
        prompt::{PromptOptions, build_messages_request},
    },
};
use upstream::Upstream;

/// Where the upstream API key comes from.
#[derive(Clone, Debug)]
pub enum Credential {
    /// Read this environment variable on every request.
    Env(String),
    /// A key injected at construction time.
    Fixed(SecretString),
}

impl Credential {
    pub fn resolve(&self) -> Result<SecretString, FeedError> {
        match self {
            Credential::Env(name) => Ok(SecretString::from(get_env_var(name)?)),
            Credential::Fixed(key) if key.expose_secret().trim().is_empty() => Err(FeedError::Config {
                name: "API key".to_string(),
            }),
            Credential::Fixed(key) => Ok(key.clone()),
        }
    }
}

/// Status and JSON body returned to the proxy's caller.
#[derive(Clone, Debug, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn error(err: &FeedError) -> Self {
        Self {
            status: err.status(),
            body: json!({ "error": err.client_message() }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyBody {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    news_item: Option<Value>,
}

pub struct ProxyHandler<U> {
    upstream: U,
    credential: Credential,
    prompts: PromptOptions,
}

impl<U: Upstream> ProxyHandler<U> {
    pub fn new(upstream: U, credential: Credential, prompts: PromptOptions) -> Self {
        Self {
            upstream,
            credential,
            prompts,
        }
    }

    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Handles one inbound request. Never fails; every error becomes a status
    /// with an `{ "error": .. }` body.
    pub async fn handle(&self, method: &Method, body: &Value) -> ProxyResponse {
        match self.try_handle(method, body).await {
            Ok(value) => ProxyResponse::ok(value),
            Err(err) => {
                warn!(status = %err.status(), error = %err, "news proxy request failed");
                ProxyResponse::error(&err)
            }
        }
    }

    async fn try_handle(&self, method: &Method, body: &Value) -> Result<Value, FeedError> {
        if *method != Method::POST {
            return Err(FeedError::MethodNotAllowed);
        }

        let api_key = self.credential.resolve()?;
        let request = parse_request(body)?;
        debug!(request = %request.describe(), "forwarding to upstream");

        let upstream_request = build_messages_request(&request, &self.prompts, Utc::now());
        let reply = self.upstream.post_messages(&api_key, &upstream_request).await?;

        if !reply.status.is_success() {
            return Err(ProviderError::Api {
                status: reply.status,
                message: reply.body,
            }
            .into());
        }

        let value = serde_json::from_str::<Value>(&reply.body).map_err(ProviderError::Body)?;
        Ok(value)
    }
}

/// Validates an inbound body and turns it into a [`NewsRequest`].
///
/// Empty strings count as absent. An insight request needs a `newsItem`; any
/// other request needs a `sector`.
pub fn parse_request(body: &Value) -> Result<NewsRequest, FeedError> {
    let parsed = match body {
        Value::Null => ProxyBody::default(),
        other => serde_json::from_value::<ProxyBody>(other.clone())
            .map_err(|e| FeedError::Validation(format!("Invalid request body: {e}")))?,
    };

    let sector = parsed.sector.filter(|s| !s.is_empty());
    let kind = parsed.kind.filter(|k| !k.is_empty());

    match (kind.as_deref(), sector) {
        (None, None) => Err(FeedError::Validation("Missing sector or type".to_string())),
        (Some(INSIGHT_TYPE), _) => {
            let raw = parsed
                .news_item
                .filter(|v| !v.is_null())
                .ok_or_else(|| FeedError::Validation("Missing newsItem for insight request".to_string()))?;
            let item = serde_json::from_value::<NewsItem>(raw)
                .map_err(|e| FeedError::Validation(format!("Invalid newsItem: {e}")))?;
            Ok(NewsRequest::Insight(Box::new(item)))
        }
        (_, Some(sector)) => Ok(NewsRequest::Sector(sector)),
        (Some(other), None) => Err(FeedError::Validation(format!("Unsupported request type: {other}"))),
    }
}
