pub mod aggregator;
pub mod overall;
pub mod prizes;
pub mod standings;

pub use aggregator::aggregate_daily;
pub use overall::overall_standings;
pub use prizes::{prize_schedule, ScheduleRow, SlotReward};
pub use standings::{category_standings, CategoryStanding};
