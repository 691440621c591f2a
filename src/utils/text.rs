use chrono::Duration;

/// Medals for the top five ranks of every reward table.
pub const RANKS: [&str; 5] = ["\u{1F947}", "\u{1F948}", "\u{1F949}", "\u{1F396}\u{FE0F}", "\u{1F396}\u{FE0F}"];

/// Medal for a 1-based rank, `"???"` beyond the rewarded ranks.
pub fn rank_medal(rank: u32) -> &'static str {
    RANKS
        .get(rank.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("???")
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 21st...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Rank cell text: medal plus ordinal for the top five, plain ordinal
/// below that.
pub fn rank_text(rank: u32) -> String {
    if (1..=RANKS.len() as u32).contains(&rank) {
        format!("{} {}", rank_medal(rank), ordinal(rank))
    } else {
        ordinal(rank)
    }
}

/// Rough relative-time wording for countdown chips.
pub fn humanize(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    match secs {
        0..=44 => "a few seconds".to_string(),
        45..=89 => "a minute".to_string(),
        90..=2699 => format!("{} minutes", (secs + 30) / 60),
        2700..=5399 => "an hour".to_string(),
        5400..=75_599 => format!("{} hours", (secs + 1800) / 3600),
        75_600..=129_599 => "a day".to_string(),
        _ => format!("{} days", (secs + 43_200) / 86_400),
    }
}

/// Clock-style countdown: "N days, N hours, N minutes and N seconds".
pub fn countdown_clock(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    format!(
        "{} days, {} hours, {} minutes and {} seconds",
        secs / 86_400,
        secs % 86_400 / 3600,
        secs % 3600 / 60,
        secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_suffixes() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(112), "112th");
    }

    #[test]
    fn test_rank_text_medals() {
        assert_eq!(rank_text(1), "\u{1F947} 1st");
        assert_eq!(rank_text(5), "\u{1F396}\u{FE0F} 5th");
        assert_eq!(rank_text(6), "6th");
    }

    #[test]
    fn test_rank_medal_fallback() {
        assert_eq!(rank_medal(3), "\u{1F949}");
        assert_eq!(rank_medal(6), "???");
    }

    #[test]
    fn test_humanize_buckets() {
        assert_eq!(humanize(Duration::seconds(10)), "a few seconds");
        assert_eq!(humanize(Duration::seconds(60)), "a minute");
        assert_eq!(humanize(Duration::minutes(10)), "10 minutes");
        assert_eq!(humanize(Duration::hours(1)), "an hour");
        assert_eq!(humanize(Duration::hours(5)), "5 hours");
        assert_eq!(humanize(Duration::days(3)), "3 days");
    }

    #[test]
    fn test_countdown_clock() {
        let d = Duration::days(1) + Duration::hours(2) + Duration::minutes(3) + Duration::seconds(4);
        assert_eq!(countdown_clock(d), "1 days, 2 hours, 3 minutes and 4 seconds");
        assert_eq!(countdown_clock(Duration::seconds(-5)), "0 days, 0 hours, 0 minutes and 0 seconds");
    }
}
