//! Plain-text rendering of feed state for the terminal.

use std::fmt::Write;

use crate::{
    catalog,
    feed::store::{FeedStore, SectorFilter},
    models::{market::MarketBoard, news_item::NewsItem},
    scheduler::{CycleReport, CycleState, RefreshStatus, SectorResult},
};

pub fn item_line(item: &NewsItem) -> String {
    let marker = if item.is_new { "NEW " } else { "" };
    format!(
        "{marker}[{}] {} | {} | {} | {} | {}",
        item.urgency.as_str(),
        item.title,
        item.sector,
        item.source,
        item.time,
        item.tickers.join(", "),
    )
}

pub fn feed(store: &FeedStore, filter: &SectorFilter) -> String {
    let mut out = String::new();
    let urgency = store.urgency_counts(filter);
    let shown: Vec<_> = store.filter_by_sector(filter).collect();
    let _ = writeln!(
        out,
        "{} stories ({} breaking, {} high)",
        shown.len(),
        urgency.breaking,
        urgency.high
    );
    for item in shown {
        let _ = writeln!(out, "  {:<28} {}", item.id, item_line(item));
    }
    out
}

pub fn markets(board: &MarketBoard) -> String {
    board
        .indices()
        .iter()
        .map(|m| format!("{} {:.2} ({})", m.label, m.value, m.change_label()))
        .collect::<Vec<_>>()
        .join("  |  ")
}

pub fn status(state: &CycleState) -> String {
    match (state.status, &state.progress) {
        (RefreshStatus::Running, Some(progress)) => progress.clone(),
        (RefreshStatus::Running, None) => "Refreshing...".to_string(),
        (RefreshStatus::Idle, _) => format!("Next refresh in {}s", state.next_refresh_secs),
    }
}

pub fn report(report: &CycleReport) -> String {
    let mut out = format!("cycle {} ({:?}): {} new", report.cycle_id, report.trigger, report.merged);
    for outcome in &report.outcomes {
        match &outcome.result {
            SectorResult::Merged { fetched, accepted } => {
                let _ = write!(out, "\n  {}: {accepted}/{fetched} merged", outcome.sector);
            }
            SectorResult::Failed(error) => {
                let _ = write!(out, "\n  {}: failed: {error}", outcome.sector);
            }
        }
    }
    out
}

pub fn sectors(store: &FeedStore) -> String {
    let counts = store.counts_by_sector();
    let mut out = format!("All ({})\n", counts.total);
    for name in catalog::sector_names() {
        let meta = catalog::lookup(name);
        let _ = writeln!(out, "{name} ({}): {}", counts.get(name), meta.stocks.join(", "));
    }
    out
}
