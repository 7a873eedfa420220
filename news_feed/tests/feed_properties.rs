use std::collections::HashSet;

use chrono::Utc;
use news_feed::{
    feed::{FeedStore, SectorFilter},
    models::news_item::NewsItem,
};
use proptest::prelude::*;

const CAPACITY: usize = 50;

fn batch(ids: &[u8]) -> Vec<NewsItem> {
    ids.iter()
        .map(|n| NewsItem::new(format!("id_{n}"), format!("story {n}"), if n % 2 == 0 { "IT & Tech" } else { "Oil & Gas" }))
        .collect()
}

fn batches() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(0u8..120, 0..8), 1..40)
}

proptest! {
    #[test]
    fn ids_stay_unique_and_bounded(merges in batches()) {
        let mut store = FeedStore::new(CAPACITY);
        for ids in &merges {
            store.merge(batch(ids), Utc::now());

            let stored: HashSet<_> = store.items().iter().map(|n| n.id.clone()).collect();
            prop_assert_eq!(stored.len(), store.len());
            prop_assert!(store.len() <= CAPACITY);
            prop_assert!(stored.is_subset(&store.known_ids()));
            prop_assert_eq!(stored, store.stored_ids().clone());
        }
    }

    #[test]
    fn accepted_items_lead_the_feed_in_caller_order(seed in batches(), next in prop::collection::vec(0u8..120, 1..8)) {
        let mut store = FeedStore::new(CAPACITY);
        for ids in &seed {
            store.merge(batch(ids), Utc::now());
        }
        let before: Vec<_> = store.items().iter().map(|n| n.id.clone()).collect();

        let outcome = store.merge(batch(&next), Utc::now());
        let after: Vec<_> = store.items().iter().map(|n| n.id.clone()).collect();

        prop_assert_eq!(&after[..outcome.accepted.len()], outcome.accepted.as_slice());
        // Survivors keep their order; evictions only ever come off the tail.
        let survivors = &after[outcome.accepted.len()..];
        prop_assert_eq!(survivors, &before[..survivors.len()]);
        prop_assert_eq!(&before[survivors.len()..], outcome.evicted.as_slice());
    }

    #[test]
    fn merging_the_same_batch_twice_is_idempotent(seed in batches(), next in prop::collection::vec(0u8..120, 0..8)) {
        let mut store = FeedStore::new(CAPACITY);
        for ids in &seed {
            store.merge(batch(ids), Utc::now());
        }
        store.merge(batch(&next), Utc::now());
        let once = store.items().to_vec();

        let second = store.merge(batch(&next), Utc::now());
        prop_assert!(second.is_noop());
        prop_assert_eq!(store.items(), once.as_slice());
    }

    #[test]
    fn sector_counts_add_up(merges in batches()) {
        let mut store = FeedStore::new(CAPACITY);
        for ids in &merges {
            store.merge(batch(ids), Utc::now());
        }
        let counts = store.counts_by_sector();
        prop_assert_eq!(counts.total, store.len());
        prop_assert_eq!(counts.by_sector.values().sum::<usize>(), store.len());

        let tech = SectorFilter::Sector("IT & Tech".into());
        prop_assert_eq!(store.filter_by_sector(&tech).count(), counts.get("IT & Tech"));
    }
}
