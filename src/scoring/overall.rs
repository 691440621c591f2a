use crate::models::{User, UserStatus};

/// Global event leaderboard from the `users` query: disqualified and
/// pointless users dropped, highest total first, ties alphabetical.
pub fn overall_standings(users: &[User]) -> Vec<User> {
    let mut board: Vec<User> = users
        .iter()
        .filter(|u| u.status != UserStatus::Disqualified && u.total_points > 0)
        .cloned()
        .collect();
    board.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.username.cmp(&b.username))
    });
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;

    #[test]
    fn test_drops_disqualified_and_zero_point_users() {
        let mut banned = fixtures::user("banned", 50);
        banned.status = UserStatus::Disqualified;
        let users = vec![banned, fixtures::user("idle", 0), fixtures::user("cakes", 12)];

        let board = overall_standings(&users);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].username, "cakes");
    }

    #[test]
    fn test_sorted_descending_with_alphabetical_ties() {
        let users = vec![
            fixtures::user("zed", 10),
            fixtures::user("amber", 10),
            fixtures::user("mia", 25),
        ];

        let board = overall_standings(&users);
        let names: Vec<&str> = board.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["mia", "amber", "zed"]);
    }
}
