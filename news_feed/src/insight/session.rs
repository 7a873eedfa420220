//! Selection and insight state for one viewer.
//!
//! Every selection gets a fresh [`SelectionToken`]. A generation request
//! carries the token it was issued for, and its result is only applied if
//! that token is still current.

use crate::models::news_item::NewsItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightPhase {
    /// Nothing selected.
    Empty,
    /// Something selected and no request in flight.
    Ready,
    /// A request for the current selection is in flight.
    Loading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SelectionToken(u64);

/// Proof that a request was started for a given selection.
#[derive(Clone, Debug, PartialEq)]
pub struct InsightTicket {
    pub token: SelectionToken,
    pub item: NewsItem,
}

#[derive(Clone, Debug, Default)]
pub struct InsightSession {
    selected: Option<NewsItem>,
    token: u64,
    loading: bool,
    insight: Option<String>,
    error: Option<String>,
}

impl InsightSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `item`, clearing any insight or error. An in-flight request
    /// keeps running but its result will be discarded.
    pub fn select(&mut self, item: NewsItem) -> SelectionToken {
        self.token += 1;
        self.selected = Some(item);
        self.loading = false;
        self.insight = None;
        self.error = None;
        SelectionToken(self.token)
    }

    pub fn clear_selection(&mut self) {
        self.token += 1;
        self.selected = None;
        self.loading = false;
        self.insight = None;
        self.error = None;
    }

    pub fn phase(&self) -> InsightPhase {
        match (&self.selected, self.loading) {
            (None, _) => InsightPhase::Empty,
            (Some(_), true) => InsightPhase::Loading,
            (Some(_), false) => InsightPhase::Ready,
        }
    }

    /// Moves Ready to Loading and returns the work to dispatch. Returns `None`
    /// (and changes nothing) when nothing is selected or a request is already
    /// in flight.
    pub fn begin(&mut self) -> Option<InsightTicket> {
        if self.phase() != InsightPhase::Ready {
            return None;
        }
        let item = self.selected.clone()?;
        self.loading = true;
        self.insight = None;
        self.error = None;
        Some(InsightTicket {
            token: SelectionToken(self.token),
            item,
        })
    }

    /// Applies a finished request. Returns `false` if the selection changed
    /// since the ticket was issued; the result is then dropped.
    pub fn complete(&mut self, token: SelectionToken, result: Result<String, String>) -> bool {
        if token != SelectionToken(self.token) || !self.loading {
            return false;
        }
        self.loading = false;
        match result {
            Ok(text) => {
                self.insight = Some(text);
                self.error = None;
            }
            Err(message) => {
                self.insight = None;
                self.error = Some(message);
            }
        }
        true
    }

    pub fn selected(&self) -> Option<&NewsItem> {
        self.selected.as_ref()
    }

    pub fn insight(&self) -> Option<&str> {
        self.insight.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
