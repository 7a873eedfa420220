pub mod shared;
pub mod store;

pub use shared::{FeedSnapshot, SharedFeed};
pub use store::{FeedStore, MergeOutcome, SectorCounts, SectorFilter};
