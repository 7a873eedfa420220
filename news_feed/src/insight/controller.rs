use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{info, warn};

use crate::{
    insight::session::{InsightSession, SelectionToken},
    models::news_item::NewsItem,
    providers::{NewsBackend, generate_insight},
};

/// Shown when a failed request carries no usable message.
pub const FAILURE_FALLBACK: &str = "Failed to generate insight. Check your API key in the proxy environment.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsightOutcome {
    /// Nothing selected or a request already in flight; nothing dispatched.
    Skipped,
    /// The result was applied to the session.
    Applied,
    /// The selection changed while the request was in flight.
    Discarded,
}

/// Drives an [`InsightSession`] against a backend.
pub struct InsightController {
    session: Mutex<InsightSession>,
    backend: Arc<dyn NewsBackend>,
}

impl InsightController {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self {
            session: Mutex::new(InsightSession::new()),
            backend,
        }
    }

    fn session(&self) -> MutexGuard<'_, InsightSession> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn select(&self, item: NewsItem) -> SelectionToken {
        self.session().select(item)
    }

    pub fn clear_selection(&self) {
        self.session().clear_selection();
    }

    pub fn snapshot(&self) -> InsightSession {
        self.session().clone()
    }

    /// Generates an insight for the current selection.
    pub async fn generate(&self) -> InsightOutcome {
        let ticket = self.session().begin();
        let Some(ticket) = ticket else {
            return InsightOutcome::Skipped;
        };

        let result = generate_insight(self.backend.as_ref(), &ticket.item)
            .await
            .map_err(|err| {
                warn!(id = %ticket.item.id, error = %err, "insight generation failed");
                let message = err.client_message();
                if message.trim().is_empty() {
                    FAILURE_FALLBACK.to_string()
                } else {
                    message
                }
            });

        if self.session().complete(ticket.token, result) {
            info!(id = %ticket.item.id, "insight ready");
            InsightOutcome::Applied
        } else {
            info!(id = %ticket.item.id, "discarding insight for stale selection");
            InsightOutcome::Discarded
        }
    }
}
