use chrono::Utc;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

use folly_comp::{
    client::{BackendConfig, CompetitionApi, GqlBackend},
    config::Settings,
    models::CompetitionStatus,
    schedule::{countdown_status, event_countdown},
    scoring::{aggregate_daily, category_standings, overall_standings, prize_schedule},
    utils::text::{rank_medal, rank_text},
    CompetitionCalendar,
};

mod tui_main;

#[derive(Parser)]
#[clap(name = "folly-comp")]
#[clap(about = "Terminal tracker for the Folly Times Xmaxx competition", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the aggregated daily leaderboard
    Daily {
        /// Competition day (1-based); defaults to the current day
        #[clap(short, long)]
        day: Option<usize>,
    },

    /// Print the per-category results for one blitz
    Blitz {
        /// Competition day (1-based); defaults to the current day
        #[clap(short, long)]
        day: Option<usize>,

        /// Result slot within the day (1-based); defaults to the latest
        #[clap(short, long)]
        slot: Option<usize>,
    },

    /// Print the blitz prize schedule for a day
    Schedule {
        /// Competition day (1-based); defaults to the current day
        #[clap(short, long)]
        day: Option<usize>,
    },

    /// Print the overall competition leaderboard
    Overall,

    /// Launch the interactive TUI
    Tui {
        /// Use deterministic fixture data instead of the backend
        #[clap(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let settings = Settings::new().unwrap_or_else(|_| {
        info!("Using default settings");
        Settings::default()
    });

    if let Err(e) = settings.validate() {
        error!("Invalid settings: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    if let Commands::Tui { offline } = &cli.command {
        return tui_main::run_tui(settings, *offline).await;
    }

    let calendar = CompetitionCalendar::new(&settings.schedule, &settings.polling)?;
    let api: Arc<dyn CompetitionApi> = Arc::new(GqlBackend::new(&BackendConfig {
        endpoint: settings.backend.endpoint.clone(),
        timeout_seconds: settings.backend.timeout_seconds,
    })?);
    let now = Utc::now();

    match cli.command {
        Commands::Daily { day } => {
            let day = resolve_day(&calendar, day)?;
            let range = calendar
                .day(day)
                .ok_or_else(|| anyhow::anyhow!("Day {} is outside the schedule", day + 1))?;

            let competitions = api.competitions(range.from, range.to).await?;
            let board = aggregate_daily(&competitions, now);

            println!("=== Daily Leaderboard — Day {} ===", day + 1);
            println!("{}", countdown_status(range, now));
            if board.is_empty() {
                println!("No results yet wah...");
            }
            for (i, entry) in board.iter().enumerate() {
                println!(
                    "{:<10} {:<24} {:>8}",
                    rank_text(i as u32 + 1),
                    member_label(entry.label(), entry.membership_type.is_gold()),
                    entry.total_points
                );
            }
        }

        Commands::Blitz { day, slot } => {
            let day = resolve_day(&calendar, day)?;
            let range = calendar
                .day(day)
                .ok_or_else(|| anyhow::anyhow!("Day {} is outside the schedule", day + 1))?;

            let competitions = api.competitions(range.from, range.to).await?;
            let listed: Vec<_> = competitions.iter().filter(|c| c.is_listed()).collect();
            if listed.is_empty() {
                println!("No results yet wah...");
                return Ok(());
            }
            let index = slot.map(|s| s.saturating_sub(1)).unwrap_or(listed.len() - 1);
            let blitz = listed
                .get(index)
                .ok_or_else(|| anyhow::anyhow!("Slot {} has no results", index + 1))?;

            println!(
                "=== Blitz Results — {} to {} ===",
                blitz.start_at.format("%d %b %Y %I:%M %p"),
                blitz.finish_at.format("%I:%M %p"),
            );
            if blitz.status == CompetitionStatus::Failed {
                println!("{}", folly_comp::CompError::StatsCollectionFailed);
                return Ok(());
            }
            for category in folly_comp::models::RewardCategory::ALL {
                println!("\n--- {} ---", category.title());
                for standing in category_standings(blitz, category) {
                    println!(
                        "{:<4} {:<24} {:>14} {:>8}",
                        rank_medal(standing.rank),
                        member_label(&standing.label, standing.membership_type.is_gold()),
                        standing.score,
                        standing.reward
                    );
                }
            }
        }

        Commands::Schedule { day } => {
            let day = resolve_day(&calendar, day)?;
            let range = calendar
                .day(day)
                .ok_or_else(|| anyhow::anyhow!("Day {} is outside the schedule", day + 1))?;

            let competitions = api.competitions(range.from, range.to).await?;
            println!("=== Blitz Schedule — Day {} ===", day + 1);
            println!(
                "{:<10} {:<10} {:>5} {:>5} {:>5} {:>5} {:>5}",
                "Time", "Multiplier", "1st", "2nd", "3rd", "4th", "5th"
            );
            for row in prize_schedule(&calendar, day, &competitions) {
                let time = row.starts_at.format("%I:%M %p").to_string();
                match row.reward {
                    Some(reward) => {
                        let prize = |i: usize| {
                            reward
                                .prize_points
                                .get(i)
                                .map(|p| p.to_string())
                                .unwrap_or_else(|| "?".to_string())
                        };
                        println!(
                            "{:<10} {:<10} {:>5} {:>5} {:>5} {:>5} {:>5}",
                            time,
                            format!("x{}", reward.multiplier),
                            prize(0),
                            prize(1),
                            prize(2),
                            prize(3),
                            prize(4)
                        );
                    }
                    None => println!(
                        "{:<10} {:<10} {:>5} {:>5} {:>5} {:>5} {:>5}",
                        time, "?", "?", "?", "?", "?", "?"
                    ),
                }
            }
        }

        Commands::Overall => {
            println!("=== Xmaxx 2021 Leaderboard ===");
            println!("{}", event_countdown(calendar.span(), now));
            if now < calendar.span().from {
                println!("The Main Competition hasn't started.");
                return Ok(());
            }
            let users = api.users().await?;
            let board = overall_standings(&users);
            if board.is_empty() {
                println!("No results yet wah...");
            }
            for (i, user) in board.iter().enumerate() {
                println!(
                    "{:<10} {:<24} {:>8}",
                    rank_text(i as u32 + 1),
                    member_label(user.label(), user.membership_type.is_gold()),
                    user.total_points
                );
            }
        }

        Commands::Tui { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn resolve_day(calendar: &CompetitionCalendar, day: Option<usize>) -> anyhow::Result<usize> {
    match day {
        Some(0) => Err(anyhow::anyhow!("Days are numbered from 1")),
        Some(d) => Ok(d - 1),
        None => Ok(calendar.day_index_at(Utc::now())),
    }
}

fn member_label(label: &str, gold: bool) -> String {
    if gold {
        format!("👑 {}", label)
    } else {
        label.to_string()
    }
}
