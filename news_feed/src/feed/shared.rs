//! Thread-safe handle around a [`FeedStore`].
//!
//! Writers serialize through a mutex so the membership check and insert of a
//! merge happen in one critical section. After every mutation a fresh
//! [`FeedSnapshot`] is swapped in with `arc-swap`; readers load it without
//! touching the lock.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use arc_swap::ArcSwap;
use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    feed::store::{FeedStore, MergeOutcome},
    models::news_item::NewsItem,
};

/// Immutable view of the feed at one point in time.
#[derive(Debug, Default)]
pub struct FeedSnapshot {
    pub items: Vec<NewsItem>,
    /// Incremented on every mutation that changed the feed.
    pub version: u64,
}

struct Inner {
    store: Mutex<FeedStore>,
    snapshot: ArcSwap<FeedSnapshot>,
}

#[derive(Clone)]
pub struct SharedFeed {
    inner: Arc<Inner>,
}

impl SharedFeed {
    pub fn new(store: FeedStore) -> Self {
        let snapshot = FeedSnapshot {
            items: store.items().to_vec(),
            version: 0,
        };
        Self {
            inner: Arc::new(Inner {
                store: Mutex::new(store),
                snapshot: ArcSwap::from_pointee(snapshot),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FeedStore> {
        self.inner.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, store: &FeedStore) {
        let version = self.inner.snapshot.load().version + 1;
        self.inner.snapshot.store(Arc::new(FeedSnapshot {
            items: store.items().to_vec(),
            version,
        }));
    }

    /// Merges `candidates` atomically with respect to other merges.
    pub fn merge(&self, candidates: Vec<NewsItem>) -> MergeOutcome {
        let mut store = self.lock();
        let outcome = store.merge(candidates, Utc::now());
        if !outcome.is_noop() {
            self.publish(&store);
        }
        outcome
    }

    pub fn expire_new_flags(&self) -> usize {
        let mut store = self.lock();
        let cleared = store.expire_new_flags();
        if cleared > 0 {
            self.publish(&store);
        }
        cleared
    }

    /// Clears the new flags after `ttl` on a background task.
    pub fn schedule_expiry(&self, ttl: Duration) -> JoinHandle<usize> {
        let feed = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let cleared = feed.expire_new_flags();
            debug!(cleared, "cleared new flags");
            cleared
        })
    }

    pub fn known_ids(&self) -> HashSet<String> {
        self.lock().known_ids()
    }

    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.inner.snapshot.load_full()
    }

    /// Runs a read-only closure against the live store.
    pub fn with_store<T>(&self, f: impl FnOnce(&FeedStore) -> T) -> T {
        let store = self.lock();
        f(&*store)
    }
}
