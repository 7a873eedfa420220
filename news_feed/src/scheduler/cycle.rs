//! Pure state of the refresh cycle. No I/O, no clocks of its own.

use chrono::{DateTime, Utc};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshStatus {
    #[default]
    Idle,
    Running,
}

/// What started a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    Scheduled,
    Manual,
}

/// Status, progress and countdown of the refresh engine.
///
/// Only the most recently begun cycle is current. A superseded cycle may still
/// report progress or finish later, but it does not touch the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleState {
    pub status: RefreshStatus,
    /// e.g. "Fetching IT & Tech news via AI...". `None` when idle.
    pub progress: Option<String>,
    /// Sectors sampled for the current cycle.
    pub sectors: Vec<String>,
    pub current: Option<u64>,
    pub last_completed: Option<DateTime<Utc>>,
    /// Seconds until the next scheduled cycle, as shown to the user.
    pub next_refresh_secs: u64,
    pub interval_secs: u64,
    next_id: u64,
}

impl CycleState {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            status: RefreshStatus::Idle,
            progress: None,
            sectors: Vec::new(),
            current: None,
            last_completed: None,
            next_refresh_secs: interval_secs,
            interval_secs,
            next_id: 0,
        }
    }

    /// Starts a new cycle, superseding any running one. Returns its id.
    pub fn begin(&mut self, sectors: Vec<String>) -> u64 {
        self.next_id += 1;
        self.current = Some(self.next_id);
        self.status = RefreshStatus::Running;
        self.progress = None;
        self.sectors = sectors;
        self.next_id
    }

    pub fn is_current(&self, cycle_id: u64) -> bool {
        self.current == Some(cycle_id)
    }

    pub fn progress(&mut self, cycle_id: u64, label: impl Into<String>) {
        if self.is_current(cycle_id) && self.status == RefreshStatus::Running {
            self.progress = Some(label.into());
        }
    }

    /// Marks `cycle_id` complete. Returns `false` if a newer cycle has begun
    /// since, in which case nothing changes.
    pub fn finish(&mut self, cycle_id: u64, now: DateTime<Utc>) -> bool {
        if !self.is_current(cycle_id) {
            return false;
        }
        self.status = RefreshStatus::Idle;
        self.progress = None;
        self.last_completed = Some(now);
        self.next_refresh_secs = self.interval_secs;
        true
    }

    /// One-second countdown step. Wraps to the full interval instead of
    /// reaching zero.
    pub fn tick_countdown(&mut self) {
        self.next_refresh_secs = if self.next_refresh_secs <= 1 {
            self.interval_secs
        } else {
            self.next_refresh_secs - 1
        };
    }

    pub fn is_running(&self) -> bool {
        self.status == RefreshStatus::Running
    }
}
