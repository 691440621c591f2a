pub mod calendar;
pub mod timing;

pub use calendar::{CompetitionCalendar, DateRange};
pub use timing::{countdown_status, event_countdown, phase, CompPhase};
