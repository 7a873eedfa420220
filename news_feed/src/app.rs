//! Wiring of a complete feed engine from a [`Config`].

use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use crate::{
    config::{BackendConfig, BackendMode, Config},
    feed::{FeedStore, SharedFeed},
    insight::InsightController,
    providers::{NewsBackend, local::LocalProxy, proxy_client::ProxyClient},
    proxy::{Credential, ProxyHandler, upstream::AnthropicUpstream},
    scheduler::RefreshScheduler,
    seed::seed_news,
};

pub struct NewsFeedApp {
    pub feed: SharedFeed,
    pub scheduler: RefreshScheduler,
    pub insight: InsightController,
}

impl NewsFeedApp {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let backend = build_backend(&cfg.backend)?;
        Ok(Self::with_backend(cfg, backend))
    }

    /// Builds the engine around an already constructed backend.
    pub fn with_backend(cfg: &Config, backend: Arc<dyn NewsBackend>) -> Self {
        let store = if cfg.feed.seed_items {
            FeedStore::with_items(cfg.feed.capacity, seed_news(Utc::now()))
        } else {
            FeedStore::new(cfg.feed.capacity)
        };
        let feed = SharedFeed::new(store);

        let settings = cfg.refresh.settings();
        let scheduler = match cfg.refresh.rng_seed {
            Some(seed) => RefreshScheduler::new(feed.clone(), backend.clone(), settings, StdRng::seed_from_u64(seed)),
            None => RefreshScheduler::from_entropy(feed.clone(), backend.clone(), settings),
        };

        Self {
            feed,
            scheduler,
            insight: InsightController::new(backend),
        }
    }
}

pub fn build_backend(cfg: &BackendConfig) -> anyhow::Result<Arc<dyn NewsBackend>> {
    match cfg.mode {
        BackendMode::Proxy => {
            info!(url = %cfg.proxy_url, "using remote news proxy");
            let client = ProxyClient::new(&cfg.proxy_url, cfg.requests_per_minute, cfg.timeout())
                .context("failed to build news proxy client")?;
            Ok(Arc::new(client))
        }
        BackendMode::Local => {
            info!(api_base = %cfg.api_base, model = %cfg.model, "running news proxy in-process");
            let upstream = AnthropicUpstream::new(&cfg.api_base, &cfg.api_version, cfg.timeout())
                .context("failed to build upstream client")?;
            let handler = ProxyHandler::new(upstream, Credential::Env(cfg.credential_env.clone()), cfg.into());
            Ok(Arc::new(LocalProxy::new(handler)))
        }
    }
}
