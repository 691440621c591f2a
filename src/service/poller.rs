use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::client::CompetitionApi;
use crate::models::{Competition, LeaderboardEntry};
use crate::schedule::CompetitionCalendar;
use crate::scoring::aggregate_daily;

/// Everything the daily view needs from one completed fetch pass.
#[derive(Debug, Clone)]
pub struct DailySnapshot {
    pub day: usize,
    pub fetched_at: DateTime<Utc>,
    pub competitions: Vec<Competition>,
    pub daily: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone)]
pub enum FeedState {
    Loading,
    Ready(DailySnapshot),
    Failed(String),
}

/// A feed update tagged with the selection generation that produced
/// it. Consumers drop updates whose generation is stale, so a response
/// that was in flight when the user switched days can never overwrite
/// the new day's state.
#[derive(Debug, Clone)]
pub struct FeedUpdate {
    pub day: usize,
    pub generation: u64,
    pub state: FeedState,
}

/// Polling feed for the daily leaderboard. One selected day at a time;
/// selecting a day tears the previous poll task down and starts a new
/// one, which re-fetches at every reload mark until replaced.
pub struct DailyFeed {
    api: Arc<dyn CompetitionApi>,
    calendar: Arc<CompetitionCalendar>,
    tx: watch::Sender<FeedUpdate>,
    rx: watch::Receiver<FeedUpdate>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl DailyFeed {
    pub fn new(api: Arc<dyn CompetitionApi>, calendar: Arc<CompetitionCalendar>) -> Self {
        let (tx, rx) = watch::channel(FeedUpdate {
            day: 0,
            generation: 0,
            state: FeedState::Loading,
        });
        Self {
            api,
            calendar,
            tx,
            rx,
            task: None,
            generation: 0,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedUpdate> {
        self.rx.clone()
    }

    /// Generation of the current selection; updates carrying an older
    /// generation are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switch the feed to a day. The previous poll task is aborted
    /// before the new one spawns, so at most one poll loop runs at any
    /// time.
    pub fn select_day(&mut self, day: usize) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;

        let api = Arc::clone(&self.api);
        let calendar = Arc::clone(&self.calendar);
        let tx = self.tx.clone();
        let generation = self.generation;
        self.task = Some(tokio::spawn(async move {
            poll_day(api, calendar, tx, day, generation).await;
        }));
    }
}

impl Drop for DailyFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn poll_day(
    api: Arc<dyn CompetitionApi>,
    calendar: Arc<CompetitionCalendar>,
    tx: watch::Sender<FeedUpdate>,
    day: usize,
    generation: u64,
) {
    let Some(range) = calendar.day(day) else {
        warn!("Day {} is outside the schedule, feed going idle", day);
        return;
    };

    let _ = tx.send(FeedUpdate {
        day,
        generation,
        state: FeedState::Loading,
    });

    loop {
        match api.competitions(range.from, range.to).await {
            Ok(competitions) => {
                let now = Utc::now();
                let daily = aggregate_daily(&competitions, now);
                info!(
                    "Day {} poll: {} competitions, {} leaderboard entries",
                    day,
                    competitions.len(),
                    daily.len()
                );
                let _ = tx.send(FeedUpdate {
                    day,
                    generation,
                    state: FeedState::Ready(DailySnapshot {
                        day,
                        fetched_at: now,
                        competitions,
                        daily,
                    }),
                });
            }
            Err(e) => {
                // The next reload mark is the retry; previous data
                // stays on screen behind the banner.
                warn!("Day {} poll failed: {}", day, e);
                let _ = tx.send(FeedUpdate {
                    day,
                    generation,
                    state: FeedState::Failed(e.to_string()),
                });
            }
        }

        let delay = calendar.reload_delay(Utc::now());
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{fixtures, MockCompetitionApi};
    use crate::config::Settings;
    use crate::models::{CompError, CompetitionStatus};
    use chrono::Duration;

    fn calendar() -> Arc<CompetitionCalendar> {
        let settings = Settings::default();
        Arc::new(CompetitionCalendar::new(&settings.schedule, &settings.polling).unwrap())
    }

    async fn next_settled(rx: &mut watch::Receiver<FeedUpdate>) -> FeedUpdate {
        loop {
            rx.changed().await.unwrap();
            let update = rx.borrow().clone();
            if !matches!(update.state, FeedState::Loading) {
                return update;
            }
        }
    }

    #[tokio::test]
    async fn test_feed_publishes_aggregated_snapshot() {
        let cal = calendar();
        let day = cal.day(2).unwrap();
        let mut api = MockCompetitionApi::new();
        api.expect_competitions()
            .withf(move |from, to| *from == day.from && *to == day.to)
            .returning(move |_, _| {
                Ok(vec![fixtures::competition(
                    "a",
                    CompetitionStatus::Finished,
                    day.from,
                    day.from + Duration::minutes(10),
                    vec![fixtures::entry("cakes", [10, 5, 0, 0])],
                )])
            });

        let mut feed = DailyFeed::new(Arc::new(api), cal);
        let mut rx = feed.subscribe();
        feed.select_day(2);

        let update = next_settled(&mut rx).await;
        assert_eq!(update.day, 2);
        assert_eq!(update.generation, feed.generation());
        let FeedState::Ready(snapshot) = update.state else {
            panic!("expected a ready snapshot");
        };
        assert_eq!(snapshot.daily.len(), 1);
        assert_eq!(snapshot.daily[0].total_points, 15);
    }

    #[tokio::test]
    async fn test_feed_publishes_failure_message() {
        let mut api = MockCompetitionApi::new();
        api.expect_competitions().returning(|_, _| {
            Err(CompError::Backend {
                message: "stats broken".to_string(),
            })
        });

        let mut feed = DailyFeed::new(Arc::new(api), calendar());
        let mut rx = feed.subscribe();
        feed.select_day(0);

        let update = next_settled(&mut rx).await;
        let FeedState::Failed(message) = update.state else {
            panic!("expected a failed update");
        };
        assert!(message.contains("stats broken"));
    }

    #[tokio::test]
    async fn test_switching_day_bumps_generation() {
        let mut api = MockCompetitionApi::new();
        api.expect_competitions().returning(|_, _| Ok(vec![]));

        let mut feed = DailyFeed::new(Arc::new(api), calendar());
        let mut rx = feed.subscribe();

        feed.select_day(0);
        let first = next_settled(&mut rx).await;
        feed.select_day(1);
        let second = next_settled(&mut rx).await;

        assert!(second.generation > first.generation);
        assert_eq!(second.day, 1);
        // The stale update is recognizable by its generation.
        assert!(first.generation < feed.generation());
    }

    #[tokio::test]
    async fn test_day_outside_schedule_goes_idle() {
        let api = MockCompetitionApi::new();
        let mut feed = DailyFeed::new(Arc::new(api), calendar());
        let rx = feed.subscribe();
        feed.select_day(99);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(matches!(rx.borrow().state, FeedState::Loading));
        assert_eq!(rx.borrow().generation, 0);
    }
}
