//! `news_feed.toml`: refresh timing, feed bounds and backend selection.
//!
//! Every field has a default, so an empty file (or no file) is a valid
//! configuration. Unknown keys are rejected.
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path: [`load_config_path`]

use std::{path::Path, time::Duration};

use anyhow::{Context, bail};
use serde::Deserialize;
use toml::from_str;

use crate::{feed::store::DEFAULT_CAPACITY, requests::prompt::PromptOptions, scheduler::RefreshSettings};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub refresh: RefreshConfig,
    pub feed: FeedConfig,
    pub backend: BackendConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RefreshConfig {
    pub interval_secs: u64,
    pub sectors_per_cycle: usize,
    pub new_flag_ttl_secs: u64,
    /// Seed for sector sampling and the market walk. Entropy when absent.
    pub rng_seed: Option<u64>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 90,
            sectors_per_cycle: 2,
            new_flag_ttl_secs: 12,
            rng_seed: None,
        }
    }
}

impl RefreshConfig {
    pub fn settings(&self) -> RefreshSettings {
        RefreshSettings {
            interval: Duration::from_secs(self.interval_secs),
            sectors_per_cycle: self.sectors_per_cycle,
            new_flag_ttl: Duration::from_secs(self.new_flag_ttl_secs),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    pub capacity: usize,
    /// Start with the built-in seed stories.
    pub seed_items: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            seed_items: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Run the proxy handler in-process.
    #[default]
    Local,
    /// Post to a news proxy at `proxy_url`.
    Proxy,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub mode: BackendMode,
    pub proxy_url: String,
    pub api_base: String,
    pub api_version: String,
    pub model: String,
    pub news_max_tokens: u32,
    pub insight_max_tokens: u32,
    /// Environment variable holding the upstream API key.
    pub credential_env: String,
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let prompts = PromptOptions::default();
        Self {
            mode: BackendMode::Local,
            proxy_url: "http://127.0.0.1:3000/api/news".to_string(),
            api_base: "https://api.anthropic.com/v1/messages".to_string(),
            api_version: "2023-06-01".to_string(),
            model: prompts.model,
            news_max_tokens: prompts.news_max_tokens,
            insight_max_tokens: prompts.insight_max_tokens,
            credential_env: "ANTHROPIC_API_KEY".to_string(),
            requests_per_minute: 30,
            timeout_secs: 60,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl From<&BackendConfig> for PromptOptions {
    fn from(cfg: &BackendConfig) -> Self {
        PromptOptions {
            model: cfg.model.clone(),
            news_max_tokens: cfg.news_max_tokens,
            insight_max_tokens: cfg.insight_max_tokens,
        }
    }
}

fn validate(cfg: &Config) -> anyhow::Result<()> {
    if cfg.refresh.interval_secs == 0 {
        bail!("refresh.interval_secs must be at least 1");
    }
    if cfg.refresh.sectors_per_cycle == 0 {
        bail!("refresh.sectors_per_cycle must be at least 1");
    }
    if cfg.feed.capacity == 0 {
        bail!("feed.capacity must be at least 1");
    }
    if cfg.backend.credential_env.trim().is_empty() {
        bail!("backend.credential_env must name an environment variable");
    }
    if cfg.backend.mode == BackendMode::Proxy && cfg.backend.proxy_url.trim().is_empty() {
        bail!("backend.proxy_url is required when backend.mode = \"proxy\"");
    }
    Ok(())
}

/// Parse and validate a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<Config> {
    let cfg: Config = from_str(toml_str).context("failed to parse config TOML")?;
    validate(&cfg).context("invalid config")?;
    Ok(cfg)
}

/// Read a configuration file from disk, then parse and validate it.
pub fn load_config_path(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
