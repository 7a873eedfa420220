//! Live market news feed engine for Indian equities.
//!
//! Periodically pulls sector-tagged stories from a text generation backend,
//! merges them into a bounded, deduplicated feed, ages out "new" markers and
//! produces trading insights for a selected story on demand.

pub mod app;
pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod feed;
pub mod insight;
pub mod models;
pub mod providers;
pub mod proxy;
pub mod requests;
pub mod response;
pub mod scheduler;
pub mod seed;
