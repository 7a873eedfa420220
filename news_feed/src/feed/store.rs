//! The bounded, deduplicated, newest-first news feed.
//!
//! `items` and `index` always hold exactly the same ids. `seen` holds every id
//! ever accepted, including evicted ones, and is never pruned: an id is
//! ingested at most once per store. Every mutation goes through
//! [`FeedStore::merge`] or [`FeedStore::expire_new_flags`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::models::news_item::{NewsItem, Urgency};

pub const DEFAULT_CAPACITY: usize = 50;

/// Display time stamped on freshly merged items.
pub const JUST_NOW: &str = "Just now";

/// Which part of the feed a view covers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SectorFilter {
    #[default]
    All,
    Sector(String),
}

impl SectorFilter {
    /// `"All"` and the empty string select the whole feed.
    pub fn parse(value: &str) -> Self {
        match value {
            "" | "All" => SectorFilter::All,
            sector => SectorFilter::Sector(sector.to_string()),
        }
    }

    pub fn matches(&self, item: &NewsItem) -> bool {
        match self {
            SectorFilter::All => true,
            SectorFilter::Sector(sector) => item.sector == *sector,
        }
    }
}

/// What one merge changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Ids inserted by this merge, in feed order.
    pub accepted: Vec<String>,
    /// Ids pushed off the tail to respect the capacity.
    pub evicted: Vec<String>,
}

impl MergeOutcome {
    pub fn is_noop(&self) -> bool {
        self.accepted.is_empty() && self.evicted.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectorCounts {
    /// Sector name to item count, in order of first appearance in the feed.
    pub by_sector: IndexMap<String, usize>,
    pub total: usize,
}

impl SectorCounts {
    pub fn get(&self, sector: &str) -> usize {
        self.by_sector.get(sector).copied().unwrap_or(0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UrgencyCounts {
    pub breaking: usize,
    pub high: usize,
}

#[derive(Clone, Debug)]
pub struct FeedStore {
    items: Vec<NewsItem>,
    index: HashSet<String>,
    seen: HashSet<String>,
    capacity: usize,
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl FeedStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: HashSet::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a store from items that are already in feed order.
    ///
    /// Seed items keep their own flags and timestamps. Duplicate ids keep the
    /// first occurrence, and anything beyond `capacity` is dropped.
    pub fn with_items(capacity: usize, items: impl IntoIterator<Item = NewsItem>) -> Self {
        let mut store = Self::new(capacity);
        for item in items {
            if store.items.len() == capacity {
                break;
            }
            if store.index.insert(item.id.clone()) {
                store.seen.insert(item.id.clone());
                store.items.push(item);
            }
        }
        store
    }

    /// Prepends every candidate whose id has never been accepted, then
    /// truncates to the capacity from the tail. Evicted ids stay seen, so
    /// merging the same candidates again changes nothing.
    ///
    /// Accepted items are stamped `is_new`, `timestamp = now` and
    /// `time = "Just now"`. Candidates keep their relative order.
    pub fn merge(&mut self, candidates: impl IntoIterator<Item = NewsItem>, now: DateTime<Utc>) -> MergeOutcome {
        let mut fresh = Vec::new();
        for mut item in candidates {
            if !self.seen.insert(item.id.clone()) {
                continue;
            }
            self.index.insert(item.id.clone());
            item.is_new = true;
            item.timestamp = now;
            item.time = JUST_NOW.to_string();
            fresh.push(item);
        }

        if fresh.is_empty() {
            return MergeOutcome::default();
        }

        let accepted = fresh.iter().map(|item| item.id.clone()).collect();
        fresh.append(&mut self.items);
        self.items = fresh;

        let mut evicted = Vec::new();
        if self.items.len() > self.capacity {
            for item in self.items.drain(self.capacity..) {
                self.index.remove(&item.id);
                evicted.push(item.id);
            }
        }

        MergeOutcome { accepted, evicted }
    }

    /// Clears `is_new` on every stored item, whichever batch it came from.
    /// Returns how many flags were cleared.
    pub fn expire_new_flags(&mut self) -> usize {
        let mut cleared = 0;
        for item in self.items.iter_mut().filter(|item| item.is_new) {
            item.is_new = false;
            cleared += 1;
        }
        cleared
    }

    pub fn counts_by_sector(&self) -> SectorCounts {
        let mut by_sector: IndexMap<String, usize> = IndexMap::new();
        for item in &self.items {
            *by_sector.entry(item.sector.clone()).or_default() += 1;
        }
        SectorCounts {
            by_sector,
            total: self.items.len(),
        }
    }

    pub fn filter_by_sector<'a>(&'a self, filter: &'a SectorFilter) -> impl Iterator<Item = &'a NewsItem> + 'a {
        self.items.iter().filter(move |item| filter.matches(item))
    }

    pub fn urgency_counts(&self, filter: &SectorFilter) -> UrgencyCounts {
        self.filter_by_sector(filter)
            .fold(UrgencyCounts::default(), |mut counts, item| {
                match item.urgency {
                    Urgency::Breaking => counts.breaking += 1,
                    Urgency::High => counts.high += 1,
                    Urgency::Normal => {}
                }
                counts
            })
    }

    pub fn get(&self, id: &str) -> Option<&NewsItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether `id` is currently stored.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Ids of the stored items.
    pub fn stored_ids(&self) -> &HashSet<String> {
        &self.index
    }

    /// Every id ever accepted, evicted ones included. Backend answers are
    /// filtered against this set.
    pub fn known_ids(&self) -> HashSet<String> {
        self.seen.clone()
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
