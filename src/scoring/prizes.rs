use chrono::{DateTime, Utc};

use crate::models::Competition;
use crate::schedule::CompetitionCalendar;

/// One slot of the blitz schedule view: the slot's start time plus,
/// when the backend has data for it, the multiplier and the grind
/// prize ladder with the multiplier applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub starts_at: DateTime<Utc>,
    pub reward: Option<SlotReward>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotReward {
    pub multiplier: u32,
    pub prize_points: Vec<u64>,
}

/// Lines the day's slots up against the fetched competitions. Slots
/// the backend returned nothing for keep `reward: None` and render as
/// "?" placeholders.
pub fn prize_schedule(
    calendar: &CompetitionCalendar,
    day: usize,
    competitions: &[Competition],
) -> Vec<ScheduleRow> {
    calendar
        .windows_for_day(day)
        .iter()
        .map(|window| {
            let reward = competitions
                .iter()
                .find(|c| window.contains(c.start_at))
                .map(|c| SlotReward {
                    multiplier: c.multiplier,
                    prize_points: c
                        .grind_rewards
                        .iter()
                        .map(|p| p.points * c.multiplier as u64)
                        .collect(),
                });
            ScheduleRow {
                starts_at: window.from,
                reward,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;
    use crate::config::Settings;
    use crate::models::{CompetitionPrize, CompetitionStatus};
    use chrono::Duration;

    fn calendar() -> CompetitionCalendar {
        let settings = Settings::default();
        CompetitionCalendar::new(&settings.schedule, &settings.polling).unwrap()
    }

    #[test]
    fn test_one_row_per_slot_with_placeholders() {
        let cal = calendar();
        let rows = prize_schedule(&cal, 0, &[]);
        assert_eq!(rows.len(), 144);
        assert!(rows.iter().all(|r| r.reward.is_none()));
        assert_eq!(rows[0].starts_at, cal.span().from);
    }

    #[test]
    fn test_multiplier_applies_to_prize_points() {
        let cal = calendar();
        let slot = cal.windows_for_day(0)[3];
        let mut comp = fixtures::competition(
            "boosted",
            CompetitionStatus::Draft,
            slot.from,
            slot.to,
            vec![],
        );
        comp.multiplier = 4;
        comp.grind_rewards = vec![
            CompetitionPrize { rank: 1, points: 10 },
            CompetitionPrize { rank: 2, points: 7 },
        ];

        let rows = prize_schedule(&cal, 0, &[comp]);
        let reward = rows[3].reward.as_ref().unwrap();
        assert_eq!(reward.multiplier, 4);
        assert_eq!(reward.prize_points, vec![40, 28]);
        assert!(rows[2].reward.is_none());
    }

    #[test]
    fn test_competition_matched_by_start_time_not_position() {
        let cal = calendar();
        let slot = cal.windows_for_day(1)[10];
        let comp = fixtures::competition(
            "late",
            CompetitionStatus::Draft,
            slot.from + Duration::seconds(1),
            slot.to,
            vec![],
        );

        let rows = prize_schedule(&cal, 1, &[comp]);
        assert!(rows[10].reward.is_some());
        assert!(rows[9].reward.is_none());
    }
}
