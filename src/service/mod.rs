pub mod poller;

pub use poller::{DailyFeed, DailySnapshot, FeedState, FeedUpdate};
