use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::{Competition, User};
use crate::schedule::CompetitionCalendar;
use crate::service::{DailySnapshot, FeedState, FeedUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Daily,
    Blitz,
    Schedule,
    Overall,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Daily, Screen::Blitz, Screen::Schedule, Screen::Overall];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Daily => "Daily Leaderboard",
            Screen::Blitz => "Blitz Results",
            Screen::Schedule => "Blitz Schedule",
            Screen::Overall => "Xmaxx Leaderboard",
        }
    }

    pub fn next(&self) -> Screen {
        match self {
            Screen::Daily => Screen::Blitz,
            Screen::Blitz => Screen::Schedule,
            Screen::Schedule => Screen::Overall,
            Screen::Overall => Screen::Daily,
        }
    }
}

pub struct App {
    pub calendar: Arc<CompetitionCalendar>,
    pub current_screen: Screen,
    pub day: usize,
    /// Selection within the day's listed blitzes on the results screen.
    pub slot: usize,
    pub snapshot: Option<DailySnapshot>,
    pub users: Option<Vec<User>>,
    pub loading: bool,
    pub error_message: Option<String>,
    pub scroll: usize,
    /// Refreshed on every UI tick; countdown text derives from it.
    pub now: DateTime<Utc>,
    /// Generation of the currently selected day; stale feed updates
    /// carry an older one and are dropped.
    pub feed_generation: u64,
    pub should_quit: bool,
}

impl App {
    pub fn new(calendar: Arc<CompetitionCalendar>) -> Self {
        let now = Utc::now();
        let day = calendar.day_index_at(now);
        Self {
            calendar,
            current_screen: Screen::Daily,
            day,
            slot: 0,
            snapshot: None,
            users: None,
            loading: true,
            error_message: None,
            scroll: 0,
            now,
            feed_generation: 0,
            should_quit: false,
        }
    }

    pub fn tick(&mut self) {
        self.now = Utc::now();
    }

    pub fn next_screen(&mut self) {
        self.current_screen = self.current_screen.next();
        self.scroll = 0;
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.scroll = 0;
    }

    /// Move the day selection; returns the new day when it changed so
    /// the caller can re-point the feed.
    pub fn prev_day(&mut self) -> Option<usize> {
        if self.day == 0 {
            return None;
        }
        self.day -= 1;
        self.on_day_change();
        Some(self.day)
    }

    pub fn next_day(&mut self) -> Option<usize> {
        if self.day + 1 >= self.calendar.days().len() {
            return None;
        }
        self.day += 1;
        self.on_day_change();
        Some(self.day)
    }

    fn on_day_change(&mut self) {
        self.snapshot = None;
        self.error_message = None;
        self.loading = true;
        self.slot = 0;
        self.scroll = 0;
    }

    /// Blitzes of the selected day that appear in the results picker:
    /// any with entries, plus failed ones.
    pub fn listed_blitzes(&self) -> Vec<&Competition> {
        self.snapshot
            .as_ref()
            .map(|s| s.competitions.iter().filter(|c| c.is_listed()).collect())
            .unwrap_or_default()
    }

    pub fn selected_blitz(&self) -> Option<&Competition> {
        let listed = self.listed_blitzes();
        if listed.is_empty() {
            return None;
        }
        listed.get(self.slot.min(listed.len() - 1)).copied()
    }

    pub fn prev_slot(&mut self) {
        self.slot = self.slot.saturating_sub(1);
    }

    pub fn next_slot(&mut self) {
        let listed = self.listed_blitzes().len();
        if self.slot + 1 < listed {
            self.slot += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, max: usize) {
        if self.scroll + 1 < max {
            self.scroll += 1;
        }
    }

    /// Apply a feed update, dropping it when it belongs to a previous
    /// day selection.
    pub fn apply_update(&mut self, update: FeedUpdate) {
        if update.generation < self.feed_generation {
            return;
        }
        match update.state {
            FeedState::Loading => {
                self.loading = true;
            }
            FeedState::Ready(snapshot) => {
                self.loading = false;
                self.error_message = None;
                // Latest results sit at the end of the picker.
                let listed = snapshot.competitions.iter().filter(|c| c.is_listed()).count();
                self.slot = listed.saturating_sub(1);
                self.snapshot = Some(snapshot);
            }
            FeedState::Failed(message) => {
                // Previous data stays on screen behind the banner.
                self.loading = false;
                self.error_message = Some(message);
            }
        }
    }

    pub fn set_users(&mut self, users: Vec<User>) {
        self.users = Some(users);
        self.loading = false;
    }

    pub fn set_error(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
        self.loading = false;
    }
}
