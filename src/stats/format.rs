//! Plain-text leaderboard, laid out like the stats post the bot used to send.

use super::{LeaderboardRow, LeaderboardTotals};
use crate::games::GameId;

pub const LEADERBOARD_LIMIT: usize = 10;

pub fn format_row(rank: usize, row: &LeaderboardRow) -> String {
    format!(
        "{}. {} — Games: {}, 1️⃣: {}, ❌: {}, Streak: {}, Best Streak: {} | Avg (All/30d/7d): {}/{}/{}",
        rank,
        row.user_id,
        row.total_results,
        row.aces,
        row.failures,
        row.current_streak,
        row.longest_streak,
        row.lifetime_avg,
        row.avg_30d,
        row.avg_7d,
    )
}

pub fn format_totals(totals: &LeaderboardTotals) -> String {
    format!(
        "Games: {} • 1️⃣: {} • ❌: {}",
        totals.results, totals.aces, totals.failures
    )
}

/// Title, the top rows and the totals line for all rows.
pub fn format_leaderboard(game_id: GameId, rows: &[LeaderboardRow]) -> String {
    let mut lines = vec![format!("{} Stats", title(game_id)), "Leaderboard".to_string()];

    if rows.is_empty() {
        lines.push("No data available yet.".to_string());
    }
    lines.extend(
        rows.iter()
            .take(LEADERBOARD_LIMIT)
            .enumerate()
            .map(|(index, row)| format_row(index + 1, row)),
    );

    lines.push("Totals".to_string());
    lines.push(format_totals(&LeaderboardTotals::from_rows(rows)));
    lines.join("\n")
}

fn title(game_id: GameId) -> String {
    let name = game_id.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
