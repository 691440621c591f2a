use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{Competition, CompetitionStatus, MembershipType, RewardCategory};
use crate::schedule::{countdown_status, event_countdown};
use crate::scoring::{category_standings, overall_standings, prize_schedule};
use crate::tui::app::{App, Screen};
use crate::utils::text::{rank_medal, rank_text};

const HEADER_BG: Color = Color::Rgb(0x69, 0x7f, 0x42);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.size());

    draw_header(frame, app, chunks[0]);
    match app.current_screen {
        Screen::Daily => draw_daily(frame, app, chunks[1]),
        Screen::Blitz => draw_blitz(frame, app, chunks[1]),
        Screen::Schedule => draw_schedule(frame, app, chunks[1]),
        Screen::Overall => draw_overall(frame, app, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let tabs: Vec<Span> = Screen::ALL
        .iter()
        .flat_map(|screen| {
            let style = if *screen == app.current_screen {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            vec![Span::styled(screen.title(), style), Span::raw("  ")]
        })
        .collect();

    let header = Paragraph::new(vec![
        Line::from(tabs),
        Line::from(Span::styled(
            event_countdown(app.calendar.span(), app.now),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .title("🎄 Folly Times Xmaxx Comp"),
    );
    frame.render_widget(header, area);
}

fn member_cell(label: &str, membership: MembershipType) -> Cell<'static> {
    if membership.is_gold() {
        Cell::from(format!("👑 {}", label)).style(Style::default().fg(Color::Yellow))
    } else {
        Cell::from(label.to_string())
    }
}

fn draw_daily(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(30)])
        .split(area);

    // Calendar chip.
    let day_range = app.calendar.day(app.day);
    let mut lines = vec![
        Line::from(Span::styled(
            format!("DAY {}", app.day + 1),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(range) = day_range {
        lines.push(Line::from(range.from.format("%-d %b %Y").to_string()));
        lines.push(Line::from(Span::styled(
            countdown_status(range, app.now),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "←/→ change day",
        Style::default().fg(Color::DarkGray),
    )));
    let calendar = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Day"));
    frame.render_widget(calendar, chunks[0]);

    // Running daily leaderboard.
    let rows: Vec<Row> = match &app.snapshot {
        Some(snapshot) => snapshot
            .daily
            .iter()
            .enumerate()
            .skip(app.scroll)
            .map(|(i, entry)| {
                Row::new(vec![
                    Cell::from(rank_text(i as u32 + 1)),
                    member_cell(entry.label(), entry.membership_type),
                    Cell::from(format!("{}", entry.total_points)),
                ])
            })
            .collect(),
        None => vec![],
    };

    let empty_text = if app.loading {
        "Loading..."
    } else {
        "No results yet wah..."
    };
    if rows.is_empty() {
        let placeholder = Paragraph::new(empty_text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Daily Leaderboard"));
        frame.render_widget(placeholder, chunks[1]);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(14),
        ],
    )
    .header(table_header(&["Rank", "Member", "Folly Points"]))
    .block(Block::default().borders(Borders::ALL).title("Daily Leaderboard"));
    frame.render_widget(table, chunks[1]);
}

fn draw_blitz(frame: &mut Frame, app: &App, area: Rect) {
    let listed = app.listed_blitzes();
    let Some(blitz) = app.selected_blitz() else {
        let text = if app.loading { "Loading..." } else { "No results yet wah..." };
        let placeholder = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Blitz Results"));
        frame.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(6)])
        .split(area);

    let picker = Paragraph::new(format!(
        "Time: {} to {}  ({} of {}, ↑/↓ to change)",
        blitz.start_at.format("%I:%M %p"),
        blitz.finish_at.format("%I:%M %p"),
        app.slot.min(listed.len().saturating_sub(1)) + 1,
        listed.len(),
    ));
    frame.render_widget(picker, chunks[0]);

    if blitz.status == CompetitionStatus::Failed {
        let banner = Paragraph::new(
            "An error occurred when collecting stats. The \"would be\" results have been added onto the next blitz time.",
        )
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[1]);
        return;
    }

    // Four category tables in a 2x2 grid.
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let cells: Vec<Rect> = rows
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .to_vec()
        })
        .collect();

    for (category, cell) in RewardCategory::ALL.iter().zip(cells) {
        draw_category_table(frame, blitz, *category, cell);
    }
}

fn draw_category_table(frame: &mut Frame, blitz: &Competition, category: RewardCategory, area: Rect) {
    let rows: Vec<Row> = category_standings(blitz, category)
        .into_iter()
        .map(|standing| {
            Row::new(vec![
                Cell::from(rank_medal(standing.rank).to_string()),
                member_cell(&standing.label, standing.membership_type),
                Cell::from(standing.score),
                Cell::from(format!("{}", standing.reward)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Min(14),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(table_header(&["Rank", "Member", category.score_heading(), "Reward"]))
    .block(Block::default().borders(Borders::ALL).title(category.title()));
    frame.render_widget(table, area);
}

fn draw_schedule(frame: &mut Frame, app: &App, area: Rect) {
    let competitions = app
        .snapshot
        .as_ref()
        .map(|s| s.competitions.as_slice())
        .unwrap_or(&[]);
    let schedule = prize_schedule(&app.calendar, app.day, competitions);

    let rows: Vec<Row> = schedule
        .iter()
        .skip(app.scroll)
        .map(|slot| {
            let mut cells = vec![Cell::from(slot.starts_at.format("%I:%M %p").to_string())];
            match &slot.reward {
                Some(reward) => {
                    let style = if reward.multiplier > 1 {
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    cells.push(Cell::from(format!("x{}", reward.multiplier)).style(style));
                    for i in 0..5 {
                        let text = reward
                            .prize_points
                            .get(i)
                            .map(|p| p.to_string())
                            .unwrap_or_else(|| "?".to_string());
                        cells.push(Cell::from(text).style(style));
                    }
                }
                None => {
                    for _ in 0..6 {
                        cells.push(Cell::from("?"));
                    }
                }
            }
            Row::new(cells)
        })
        .collect();

    let title = format!("Blitz Schedule — Day {} (↑/↓ scroll, ←/→ day)", app.day + 1);
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(table_header(&["Time", "Multiplier", "1st", "2nd", "3rd", "4th", "5th"]))
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn draw_overall(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Xmaxx 2021 Leaderboard");

    if app.now < app.calendar.span().from {
        let placeholder = Paragraph::new("The Main Competition hasn't started.")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let Some(users) = &app.users else {
        let placeholder = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let board = overall_standings(users);
    if board.is_empty() {
        let placeholder = Paragraph::new("No results yet wah...")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let rows: Vec<Row> = board
        .iter()
        .enumerate()
        .skip(app.scroll)
        .map(|(i, user)| {
            Row::new(vec![
                Cell::from(rank_text(i as u32 + 1)),
                member_cell(user.label(), user.membership_type),
                Cell::from(format!("{}", user.total_points)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(14),
        ],
    )
    .header(table_header(&["Rank", "Member", "Folly Points"]))
    .block(block);
    frame.render_widget(table, area);
}

fn table_header(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(*t).style(Style::default().bg(HEADER_BG).fg(Color::White)))
            .collect::<Vec<_>>(),
    )
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" quit | "),
        Span::styled("Tab", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" next screen | "),
        Span::styled("←/→", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" day | "),
        Span::styled("↑/↓", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" blitz/scroll | "),
        Span::styled("r", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" refresh"),
    ];
    if let Some(error) = &app.error_message {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("Oh Folly, Silje broke stats wah... ({})", error),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}
