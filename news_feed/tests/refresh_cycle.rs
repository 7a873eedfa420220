mod common;

use std::{collections::HashSet, sync::Arc, time::Duration};

use common::{GatedBackend, MockBackend, api_error, items_body, news_json};
use news_feed::{
    catalog,
    feed::{FeedStore, SharedFeed},
    providers::NewsBackend,
    requests::NewsRequest,
    scheduler::{RefreshScheduler, RefreshSettings, RefreshStatus, SectorResult, Trigger},
};
use rand::{SeedableRng, rngs::StdRng};

fn scheduler(backend: Arc<dyn NewsBackend>) -> RefreshScheduler {
    let feed = SharedFeed::new(FeedStore::default());
    RefreshScheduler::new(feed, backend, RefreshSettings::default(), StdRng::seed_from_u64(7))
}

fn sectors(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn assert_unique_ids(scheduler: &RefreshScheduler) {
    let snapshot = scheduler.feed().snapshot();
    let ids: HashSet<_> = snapshot.items.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), snapshot.items.len(), "duplicate ids in feed");
}

#[tokio::test]
async fn failing_sector_does_not_block_the_other() {
    let backend = Arc::new(MockBackend::new(|request| match request {
        NewsRequest::Sector(sector) if sector == "IT & Tech" => Err(api_error(500, "upstream exploded")),
        NewsRequest::Sector(sector) => Ok(items_body(&[
            news_json("bank_1", sector),
            news_json("bank_2", sector),
            news_json("bank_3", sector),
        ])),
        NewsRequest::Insight(_) => unreachable!(),
    }));
    let scheduler = scheduler(backend.clone());

    let report = scheduler
        .run_cycle_for(Trigger::Manual, sectors(&["IT & Tech", "Banking & Finance"]))
        .await;

    assert_eq!(backend.call_count(), 2);
    assert_eq!(report.merged, 3);
    assert_eq!(report.failures(), 1);
    assert!(matches!(&report.outcomes[0].result, SectorResult::Failed(msg) if msg.contains("upstream exploded")));
    assert_eq!(
        report.outcomes[1].result,
        SectorResult::Merged { fetched: 3, accepted: 3 }
    );

    let snapshot = scheduler.feed().snapshot();
    assert_eq!(snapshot.items.len(), 3);
    assert!(snapshot.items.iter().all(|n| n.is_new && n.sector == "Banking & Finance"));

    let status = scheduler.status();
    assert_eq!(status.status, RefreshStatus::Idle);
    assert_eq!(status.progress, None);
    assert!(status.last_completed.is_some());
    assert_eq!(status.next_refresh_secs, 90);
}

#[tokio::test]
async fn unparseable_answer_counts_as_a_sector_failure() {
    let backend = Arc::new(MockBackend::new(|_| Ok(common::text_body("Sorry, I can't do that."))));
    let scheduler = scheduler(backend);

    let report = scheduler.run_cycle_for(Trigger::Scheduled, sectors(&["Oil & Gas"])).await;
    assert_eq!(report.failures(), 1);
    assert_eq!(report.merged, 0);
    assert_eq!(scheduler.status().status, RefreshStatus::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn colliding_ids_across_concurrent_sectors_are_stored_once() {
    let backend = Arc::new(MockBackend::new(|request| match request {
        NewsRequest::Sector(sector) => {
            let own = format!("{}_only", sector.split_whitespace().next().unwrap_or("x"));
            Ok(items_body(&[
                news_json("shared_1", sector),
                news_json("shared_2", sector),
                news_json(&own, sector),
            ]))
        }
        NewsRequest::Insight(_) => unreachable!(),
    }));
    let scheduler = scheduler(backend);

    let report = scheduler
        .run_cycle_for(Trigger::Manual, sectors(&["Auto & EV", "Metals & Mining"]))
        .await;

    assert_eq!(report.merged, 4);
    let snapshot = scheduler.feed().snapshot();
    assert_eq!(snapshot.items.len(), 4);
    assert_unique_ids(&scheduler);
    for id in ["shared_1", "shared_2", "Auto_only", "Metals_only"] {
        assert_eq!(snapshot.items.iter().filter(|n| n.id == id).count(), 1, "{id}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn manual_refresh_while_running_starts_a_new_cycle() {
    let backend = Arc::new(GatedBackend::new(MockBackend::per_sector()));
    let scheduler = scheduler(backend.clone());
    let chosen = sectors(&["Banking & Finance", "IT & Tech"]);

    let first = {
        let scheduler = scheduler.clone();
        let chosen = chosen.clone();
        tokio::spawn(async move { scheduler.run_cycle_for(Trigger::Scheduled, chosen).await })
    };
    backend.wait_for_calls(2).await;
    assert_eq!(scheduler.status().status, RefreshStatus::Running);
    assert_eq!(scheduler.status().current, Some(1));

    let second = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.run_cycle_for(Trigger::Manual, chosen).await })
    };
    backend.wait_for_calls(4).await;
    assert_eq!(scheduler.status().current, Some(2));

    backend.release(4);
    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert!(first.superseded);
    assert!(!second.superseded);
    assert_eq!(second.trigger, Trigger::Manual);
    assert_eq!(first.merged + second.merged, 6);

    assert_eq!(scheduler.feed().snapshot().items.len(), 6);
    assert_unique_ids(&scheduler);
    assert_eq!(scheduler.status().status, RefreshStatus::Idle);
}

#[tokio::test]
async fn sampled_sectors_are_distinct_catalog_entries() {
    let backend = Arc::new(MockBackend::per_sector());
    let scheduler = scheduler(backend.clone());

    for _ in 0..20 {
        let picked = scheduler.sample_sectors();
        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
        assert!(picked.iter().all(|s| catalog::is_known_sector(s)));
    }

    let report = scheduler.run_cycle(Trigger::Scheduled).await;
    assert_eq!(report.sectors.len(), 2);
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn markets_move_once_per_cycle() {
    let scheduler = scheduler(Arc::new(MockBackend::per_sector()));
    let before = scheduler.markets();

    scheduler.run_cycle_for(Trigger::Manual, sectors(&["Global Macro"])).await;
    let after = scheduler.markets();

    for (old, new) in before.indices().iter().zip(after.indices()) {
        assert_eq!(old.label, new.label);
        assert!((new.value - old.value).abs() <= old.value * 0.00104 + 1e-9);
    }
    assert_ne!(before, after);
}

#[tokio::test(start_paused = true)]
async fn new_flags_expire_after_the_ttl() {
    let scheduler = scheduler(Arc::new(MockBackend::per_sector()));
    scheduler.run_cycle_for(Trigger::Manual, sectors(&["Infrastructure"])).await;
    assert!(scheduler.feed().snapshot().items.iter().all(|n| n.is_new));

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(scheduler.feed().snapshot().items.iter().all(|n| n.is_new));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(scheduler.feed().snapshot().items.iter().all(|n| !n.is_new));
}

#[tokio::test(start_paused = true)]
async fn timer_loop_refreshes_on_interval_and_on_demand() {
    let backend = Arc::new(MockBackend::per_sector());
    let scheduler = scheduler(backend.clone());
    let (handle, task) = scheduler.start();

    tokio::time::sleep(Duration::from_millis(30_500)).await;
    assert_eq!(backend.call_count(), 0);
    assert_eq!(scheduler.status().next_refresh_secs, 60);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(backend.call_count(), 2);
    assert!(scheduler.status().last_completed.is_some());

    assert!(handle.refresh_now().await);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(backend.call_count(), 4);

    // The manual refresh restarted the interval, so nothing fires at the old 180s mark.
    tokio::time::sleep(Duration::from_millis(89_700)).await;
    assert_eq!(backend.call_count(), 4);

    assert!(handle.shutdown().await);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn next_scheduled_cycle_is_a_full_interval_after_completion() {
    let backend = Arc::new(GatedBackend::new(MockBackend::per_sector()));
    let scheduler = scheduler(backend.clone());
    let (handle, task) = scheduler.start();

    tokio::time::sleep(Duration::from_millis(90_500)).await;
    assert_eq!(backend.call_count(), 2);
    assert!(scheduler.status().is_running());

    // The first cycle takes about 40 seconds to resolve.
    tokio::time::sleep(Duration::from_millis(39_700)).await;
    backend.release(1_000);
    tokio::time::sleep(Duration::from_millis(10)).await;
    let status = scheduler.status();
    assert_eq!(status.status, RefreshStatus::Idle);
    assert_eq!(status.next_refresh_secs, 90);

    // Nothing fires at the 180s mark. Countdown and timer both point at ~220s.
    tokio::time::sleep(Duration::from_millis(89_390)).await;
    assert_eq!(backend.call_count(), 2);
    assert_eq!(scheduler.status().next_refresh_secs, 1);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(backend.call_count(), 4);

    assert!(handle.shutdown().await);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn scheduled_tick_is_skipped_while_a_cycle_runs() {
    let backend = Arc::new(GatedBackend::new(MockBackend::per_sector()));
    let scheduler = scheduler(backend.clone());
    let (handle, task) = scheduler.start();

    tokio::time::sleep(Duration::from_millis(90_500)).await;
    assert_eq!(backend.call_count(), 2);

    // The 180s tick lands while the first cycle is still waiting.
    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(backend.call_count(), 2);
    assert_eq!(scheduler.status().current, Some(1));

    backend.release(1_000);
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(scheduler.status().status, RefreshStatus::Idle);
    assert_eq!(backend.call_count(), 2);

    tokio::time::sleep(Duration::from_secs(91)).await;
    assert_eq!(backend.call_count(), 4);
    assert_eq!(scheduler.status().current, Some(2));

    assert!(handle.shutdown().await);
    task.await.unwrap();
}
