use anyhow::Result;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::Mutex;

use folly_comp::{
    client::{CompetitionApi, FixtureBackend, GqlBackend},
    config::Settings,
    service::DailyFeed,
    tui::{ui, App, Event as TuiEvent, EventHandler, Screen},
    CompetitionCalendar,
};

pub async fn run_tui(settings: Settings, offline: bool) -> Result<()> {
    // Disable logging to prevent screen corruption
    disable_logging_output();

    let calendar = Arc::new(CompetitionCalendar::new(&settings.schedule, &settings.polling)?);
    let api: Arc<dyn CompetitionApi> = if offline {
        Arc::new(FixtureBackend::new((*calendar).clone()))
    } else {
        Arc::new(GqlBackend::new(&folly_comp::client::BackendConfig {
            endpoint: settings.backend.endpoint.clone(),
            timeout_seconds: settings.backend.timeout_seconds,
        })?)
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = Arc::new(Mutex::new(App::new(Arc::clone(&calendar))));
    let events = EventHandler::new(settings.polling.tick_millis);

    terminal.clear()?;

    let res = run_app(&mut terminal, app, events, api, calendar).await;

    // Always restore terminal state, even if there was an error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        Err(err)
    } else {
        Ok(())
    }
}

fn disable_logging_output() {
    // Redirect tracing output to a null writer to prevent screen corruption
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let null_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::sink)
        .with_filter(tracing_subscriber::filter::LevelFilter::OFF);

    let _ = tracing_subscriber::registry().with(null_layer).try_init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    events: EventHandler,
    api: Arc<dyn CompetitionApi>,
    calendar: Arc<CompetitionCalendar>,
) -> Result<()> {
    let mut feed = DailyFeed::new(Arc::clone(&api), calendar);

    // Forward feed updates into the app; stale generations are dropped
    // inside apply_update.
    {
        let mut rx = feed.subscribe();
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let update = rx.borrow().clone();
                app.lock().await.apply_update(update);
            }
        });
    }

    // Point the feed at today (or day 1 before the event starts).
    {
        let mut app_guard = app.lock().await;
        feed.select_day(app_guard.day);
        app_guard.feed_generation = feed.generation();
    }

    loop {
        {
            let app_guard = app.lock().await;
            if app_guard.should_quit {
                return Ok(());
            }
            terminal.draw(|f| ui::draw(f, &app_guard))?;
        }

        let event = match events.next() {
            Ok(event) => event,
            Err(e) => {
                app.lock().await.set_error(&format!("Input error: {}", e));
                continue;
            }
        };

        match event {
            TuiEvent::Key(key) => {
                let mut app_guard = app.lock().await;
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app_guard.should_quit = true;
                    }
                    KeyCode::Tab => {
                        app_guard.next_screen();
                        maybe_load_users(&app_guard, &api, &app);
                    }
                    KeyCode::Char('1') => app_guard.set_screen(Screen::Daily),
                    KeyCode::Char('2') => app_guard.set_screen(Screen::Blitz),
                    KeyCode::Char('3') => app_guard.set_screen(Screen::Schedule),
                    KeyCode::Char('4') => {
                        app_guard.set_screen(Screen::Overall);
                        maybe_load_users(&app_guard, &api, &app);
                    }
                    KeyCode::Left => {
                        if let Some(day) = app_guard.prev_day() {
                            feed.select_day(day);
                            app_guard.feed_generation = feed.generation();
                        }
                    }
                    KeyCode::Right => {
                        if let Some(day) = app_guard.next_day() {
                            feed.select_day(day);
                            app_guard.feed_generation = feed.generation();
                        }
                    }
                    KeyCode::Up => match app_guard.current_screen {
                        Screen::Blitz => app_guard.prev_slot(),
                        _ => app_guard.scroll_up(),
                    },
                    KeyCode::Down => match app_guard.current_screen {
                        Screen::Blitz => app_guard.next_slot(),
                        Screen::Daily => {
                            let max = app_guard
                                .snapshot
                                .as_ref()
                                .map(|s| s.daily.len())
                                .unwrap_or(0);
                            app_guard.scroll_down(max);
                        }
                        Screen::Schedule => {
                            let max = app_guard.calendar.windows_per_day();
                            app_guard.scroll_down(max);
                        }
                        Screen::Overall => {
                            let max = app_guard.users.as_ref().map(|u| u.len()).unwrap_or(0);
                            app_guard.scroll_down(max);
                        }
                    },
                    KeyCode::Char('r') => {
                        // Re-poll the selected day now instead of at the
                        // next reload mark.
                        feed.select_day(app_guard.day);
                        app_guard.feed_generation = feed.generation();
                        if app_guard.current_screen == Screen::Overall {
                            app_guard.users = None;
                            maybe_load_users(&app_guard, &api, &app);
                        }
                    }
                    _ => {}
                }
            }
            TuiEvent::Tick => {
                app.lock().await.tick();
            }
            TuiEvent::Resize(_, _) => {
                // Redraw happens at the top of the loop.
            }
        }
    }
}

/// Kick off the one-shot users fetch for the overall leaderboard the
/// first time the screen is opened.
fn maybe_load_users(app_guard: &App, api: &Arc<dyn CompetitionApi>, app: &Arc<Mutex<App>>) {
    if app_guard.current_screen != Screen::Overall || app_guard.users.is_some() {
        return;
    }
    let api = Arc::clone(api);
    let app = Arc::clone(app);
    tokio::spawn(async move {
        match api.users().await {
            Ok(users) => app.lock().await.set_users(users),
            Err(e) => app.lock().await.set_error(&e.to_string()),
        }
    });
}
