use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::{
    providers::{NewsBackend, ProviderError},
    proxy::{ProxyHandler, upstream::Upstream},
    requests::NewsRequest,
};

/// Runs the news proxy handler in-process.
///
/// Behaves exactly like [`super::proxy_client::ProxyClient`] talking to a
/// remote proxy, minus the network hop: the same status mapping applies.
pub struct LocalProxy<U> {
    handler: ProxyHandler<U>,
}

impl<U: Upstream> LocalProxy<U> {
    pub fn new(handler: ProxyHandler<U>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &ProxyHandler<U> {
        &self.handler
    }
}

#[async_trait]
impl<U: Upstream> NewsBackend for LocalProxy<U> {
    async fn send(&self, request: &NewsRequest) -> Result<Value, ProviderError> {
        let response = self.handler.handle(&Method::POST, &request.to_body()).await;
        if response.status.is_success() {
            Ok(response.body)
        } else {
            Err(ProviderError::from_error_body(response.status, &response.body))
        }
    }
}
