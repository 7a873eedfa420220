pub mod controller;
pub mod session;

pub use controller::{InsightController, InsightOutcome};
pub use session::{InsightPhase, InsightSession, InsightTicket, SelectionToken};
