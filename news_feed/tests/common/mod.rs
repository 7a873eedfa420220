#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use news_feed::{
    models::news_item::NewsItem,
    providers::{NewsBackend, ProviderError},
    requests::NewsRequest,
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

type Responder = dyn Fn(&NewsRequest) -> Result<Value, ProviderError> + Send + Sync;

/// Messages-API body whose text is `text`.
pub fn text_body(text: &str) -> Value {
    json!({ "content": [{ "type": "text", "text": text }] })
}

/// Messages-API body carrying the given news objects as a JSON array.
pub fn items_body(items: &[Value]) -> Value {
    text_body(&Value::Array(items.to_vec()).to_string())
}

/// Backend-shaped news object.
pub fn news_json(id: &str, sector: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Headline {id}"),
        "source": "Economic Times",
        "sourceId": "et",
        "time": "2 min ago",
        "sector": sector,
        "sentiment": "bullish",
        "urgency": "high",
        "summary": "Summary.",
        "tickers": ["TCS"],
        "impact": "High"
    })
}

pub fn item(id: &str, sector: &str) -> NewsItem {
    NewsItem::new(id, format!("Headline {id}"), sector)
}

pub fn api_error(status: u16, message: &str) -> ProviderError {
    ProviderError::Api {
        status: StatusCode::from_u16(status).unwrap(),
        message: message.to_string(),
    }
}

/// Answers every request through a closure and records what it was asked.
pub struct MockBackend {
    respond: Box<Responder>,
    calls: Mutex<Vec<NewsRequest>>,
}

impl MockBackend {
    pub fn new(respond: impl Fn(&NewsRequest) -> Result<Value, ProviderError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Three fresh items per sector, ids derived from the sector's first word.
    pub fn per_sector() -> Self {
        Self::new(|request| match request {
            NewsRequest::Sector(sector) => {
                let prefix = sector.split_whitespace().next().unwrap_or("x").to_lowercase();
                let items: Vec<_> = (1..=3).map(|n| news_json(&format!("{prefix}_{n}"), sector)).collect();
                Ok(items_body(&items))
            }
            NewsRequest::Insight(item) => Ok(text_body(&format!("insight for {}", item.id))),
        })
    }

    pub fn calls(&self) -> Vec<NewsRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl NewsBackend for MockBackend {
    async fn send(&self, request: &NewsRequest) -> Result<Value, ProviderError> {
        self.calls.lock().unwrap().push(request.clone());
        (self.respond)(request)
    }
}

/// Like [`MockBackend`] but every answer waits for a permit first.
pub struct GatedBackend {
    inner: MockBackend,
    gate: Arc<Semaphore>,
}

impl GatedBackend {
    pub fn new(inner: MockBackend) -> Self {
        Self {
            inner,
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    /// Lets `n` pending or future requests complete.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn call_count(&self) -> usize {
        self.inner.call_count()
    }

    /// Waits until at least `n` requests have been received.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.call_count() < n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
}

#[async_trait]
impl NewsBackend for GatedBackend {
    async fn send(&self, request: &NewsRequest) -> Result<Value, ProviderError> {
        self.inner.calls.lock().unwrap().push(request.clone());
        let permit = self.gate.acquire().await.unwrap();
        permit.forget();
        (self.inner.respond)(request)
    }
}
