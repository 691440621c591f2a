use chrono::{DateTime, Utc};

use crate::utils::text::{countdown_clock, humanize};

use super::DateRange;

/// Where a range sits relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompPhase {
    Upcoming,
    Running,
    Ended,
}

pub fn phase(range: DateRange, now: DateTime<Utc>) -> CompPhase {
    if now < range.from {
        CompPhase::Upcoming
    } else if now < range.to {
        CompPhase::Running
    } else {
        CompPhase::Ended
    }
}

/// Countdown chip text for a day or blitz range.
pub fn countdown_status(range: DateRange, now: DateTime<Utc>) -> String {
    match phase(range, now) {
        CompPhase::Upcoming => format!("Starts in {}", humanize(range.from - now)),
        CompPhase::Running => format!("Ends in {}", humanize(range.to - now)),
        CompPhase::Ended => "Ended".to_string(),
    }
}

/// Full-event countdown banner.
pub fn event_countdown(span: DateRange, now: DateTime<Utc>) -> String {
    if now >= span.to {
        return "This competition has ended! See the results above for the winners.".to_string();
    }
    format!("Competition ends in: {}", countdown_clock(span.to - now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn range() -> DateRange {
        let from = "2021-12-18T14:30:00Z".parse().unwrap();
        DateRange {
            from,
            to: from + Duration::hours(24),
        }
    }

    #[test]
    fn test_phase_transitions() {
        let r = range();
        assert_eq!(phase(r, r.from - Duration::seconds(1)), CompPhase::Upcoming);
        assert_eq!(phase(r, r.from), CompPhase::Running);
        assert_eq!(phase(r, r.to - Duration::seconds(1)), CompPhase::Running);
        assert_eq!(phase(r, r.to), CompPhase::Ended);
    }

    #[test]
    fn test_countdown_status_text() {
        let r = range();
        assert_eq!(
            countdown_status(r, r.from - Duration::hours(2)),
            "Starts in 2 hours"
        );
        assert_eq!(
            countdown_status(r, r.to - Duration::minutes(10)),
            "Ends in 10 minutes"
        );
        assert_eq!(countdown_status(r, r.to + Duration::hours(1)), "Ended");
    }

    #[test]
    fn test_event_countdown_line() {
        let r = range();
        let now = r.to - Duration::days(2) - Duration::hours(3) - Duration::minutes(4) - Duration::seconds(5);
        assert_eq!(
            event_countdown(r, now),
            "Competition ends in: 2 days, 3 hours, 4 minutes and 5 seconds"
        );
        assert_eq!(
            event_countdown(r, r.to),
            "This competition has ended! See the results above for the winners."
        );
    }
}
