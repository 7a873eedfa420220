//! Periodic and manual refresh cycles.
//!
//! A cycle samples sectors without replacement, fans out one fetch per sector
//! and merges each answer into the shared feed as soon as it resolves. A
//! failing sector is logged and does not affect the others. A manual refresh
//! starts a new cycle right away and restarts the interval timer; fetches of
//! an older cycle are left to finish and their merges dedup as usual.

pub mod cycle;

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use chrono::Utc;
use futures::future::join_all;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info, warn};

use crate::{
    catalog,
    feed::SharedFeed,
    models::market::MarketBoard,
    providers::{NewsBackend, fetch_sector_news},
};
pub use cycle::{CycleState, RefreshStatus, Trigger};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshSettings {
    pub interval: Duration,
    pub sectors_per_cycle: usize,
    /// How long merged items stay flagged as new.
    pub new_flag_ttl: Duration,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(90),
            sectors_per_cycle: 2,
            new_flag_ttl: Duration::from_secs(12),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectorResult {
    Merged { fetched: usize, accepted: usize },
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectorOutcome {
    pub sector: String,
    pub result: SectorResult,
}

/// Summary of one finished cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub cycle_id: u64,
    pub trigger: Trigger,
    pub sectors: Vec<String>,
    /// Per-sector results, in sampling order.
    pub outcomes: Vec<SectorOutcome>,
    /// Items actually inserted into the feed by this cycle.
    pub merged: usize,
    /// A newer cycle began before this one finished.
    pub superseded: bool,
}

impl CycleReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, SectorResult::Failed(_)))
            .count()
    }
}

/// Messages understood by the timer loop started with [`RefreshScheduler::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    RefreshNow,
    Shutdown,
}

#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    tx: mpsc::Sender<Command>,
}

impl SchedulerHandle {
    /// Returns `false` once the loop has stopped.
    pub async fn refresh_now(&self) -> bool {
        self.tx.send(Command::RefreshNow).await.is_ok()
    }

    pub async fn shutdown(&self) -> bool {
        self.tx.send(Command::Shutdown).await.is_ok()
    }
}

struct Inner {
    feed: SharedFeed,
    backend: Arc<dyn NewsBackend>,
    settings: RefreshSettings,
    cycle: Mutex<CycleState>,
    markets: Mutex<MarketBoard>,
    rng: Mutex<StdRng>,
}

#[derive(Clone)]
pub struct RefreshScheduler {
    inner: Arc<Inner>,
}

impl RefreshScheduler {
    pub fn new(feed: SharedFeed, backend: Arc<dyn NewsBackend>, settings: RefreshSettings, rng: StdRng) -> Self {
        let cycle = CycleState::new(settings.interval.as_secs());
        Self {
            inner: Arc::new(Inner {
                feed,
                backend,
                settings,
                cycle: Mutex::new(cycle),
                markets: Mutex::new(MarketBoard::default()),
                rng: Mutex::new(rng),
            }),
        }
    }

    /// Scheduler with an entropy-seeded random source.
    pub fn from_entropy(feed: SharedFeed, backend: Arc<dyn NewsBackend>, settings: RefreshSettings) -> Self {
        Self::new(feed, backend, settings, StdRng::from_entropy())
    }

    pub fn feed(&self) -> &SharedFeed {
        &self.inner.feed
    }

    pub fn settings(&self) -> &RefreshSettings {
        &self.inner.settings
    }

    fn cycle(&self) -> MutexGuard<'_, CycleState> {
        self.inner.cycle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn status(&self) -> CycleState {
        self.cycle().clone()
    }

    pub fn markets(&self) -> MarketBoard {
        self.inner
            .markets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Unbiased sample without replacement from the sector catalog.
    pub fn sample_sectors(&self) -> Vec<String> {
        let names = catalog::sector_names();
        let count = self.inner.settings.sectors_per_cycle.min(names.len());
        let mut rng = self.inner.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        names
            .choose_multiple(&mut *rng, count)
            .map(|name| name.to_string())
            .collect()
    }

    fn walk_markets(&self) {
        let mut rng = self.inner.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut markets = self.inner.markets.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        markets.random_walk(&mut *rng);
    }

    pub async fn run_cycle(&self, trigger: Trigger) -> CycleReport {
        let sectors = self.sample_sectors();
        self.run_cycle_for(trigger, sectors).await
    }

    /// Runs one cycle over the given sectors.
    pub async fn run_cycle_for(&self, trigger: Trigger, sectors: Vec<String>) -> CycleReport {
        let cycle_id = self.cycle().begin(sectors.clone());
        info!(cycle_id, ?trigger, ?sectors, "refresh cycle started");
        self.walk_markets();

        let fetches = sectors.iter().map(|sector| self.fetch_and_merge(cycle_id, sector));
        let outcomes = join_all(fetches).await;

        let merged = outcomes
            .iter()
            .map(|o| match o.result {
                SectorResult::Merged { accepted, .. } => accepted,
                SectorResult::Failed(_) => 0,
            })
            .sum();

        let superseded = !self.cycle().finish(cycle_id, Utc::now());
        self.inner.feed.schedule_expiry(self.inner.settings.new_flag_ttl);
        info!(cycle_id, merged, superseded, "refresh cycle finished");

        CycleReport {
            cycle_id,
            trigger,
            sectors,
            outcomes,
            merged,
            superseded,
        }
    }

    async fn fetch_and_merge(&self, cycle_id: u64, sector: &str) -> SectorOutcome {
        self.cycle().progress(cycle_id, format!("Fetching {sector} news via AI..."));
        let known = self.inner.feed.known_ids();

        let result = match fetch_sector_news(self.inner.backend.as_ref(), sector, &known).await {
            Ok(items) => {
                let fetched = items.len();
                let accepted = self.inner.feed.merge(items).accepted.len();
                debug!(cycle_id, sector, fetched, accepted, "sector merged");
                SectorResult::Merged { fetched, accepted }
            }
            Err(err) => {
                warn!(cycle_id, sector, error = %err, "sector fetch failed");
                SectorResult::Failed(err.to_string())
            }
        };

        SectorOutcome {
            sector: sector.to_string(),
            result,
        }
    }

    /// Runs a cycle on a background task and reports it on `done`.
    fn spawn_cycle_reporting(&self, trigger: Trigger, done: mpsc::Sender<CycleReport>) {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let report = scheduler.run_cycle(trigger).await;
            let _ = done.send(report).await;
        });
    }

    /// Starts the timer loop: a cycle every interval plus the one-second
    /// countdown. The next scheduled cycle is always a full interval after
    /// the current cycle completes. Scheduled ticks that land while a cycle
    /// is still running are skipped. The loop ends on [`Command::Shutdown`]
    /// or when every handle is dropped.
    pub fn start(&self) -> (SchedulerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);
        let scheduler = self.clone();
        let task = tokio::spawn(async move { scheduler.run_loop(rx).await });
        (SchedulerHandle { tx }, task)
    }

    async fn run_loop(self, mut commands: mpsc::Receiver<Command>) {
        let period = self.inner.settings.interval;
        let second = Duration::from_secs(1);
        let mut refresh = interval_at(Instant::now() + period, period);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut countdown = interval_at(Instant::now() + second, second);
        let (done_tx, mut done_rx) = mpsc::channel::<CycleReport>(16);

        loop {
            tokio::select! {
                _ = refresh.tick() => {
                    if self.cycle().is_running() {
                        debug!("previous cycle still running; skipping scheduled refresh");
                    } else {
                        self.spawn_cycle_reporting(Trigger::Scheduled, done_tx.clone());
                    }
                }
                _ = countdown.tick() => {
                    self.cycle().tick_countdown();
                }
                Some(report) = done_rx.recv() => {
                    if !report.superseded {
                        refresh.reset();
                        countdown.reset();
                    }
                }
                command = commands.recv() => match command {
                    Some(Command::RefreshNow) => {
                        refresh.reset();
                        self.spawn_cycle_reporting(Trigger::Manual, done_tx.clone());
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }
        info!("refresh scheduler stopped");
    }
}
