use chrono::NaiveDate;
use tracing::debug;

use super::{average_of, windows, AveragePolicy, LeaderboardRow, StreakAnchor, Streaks};
use crate::config::ScoreboardConfig;
use crate::dates::trailing_window;
use crate::games::{Game, GamePlugin, Score};
use crate::ingest::GameResult;
use crate::store::{DateRange, ResultSnapshot};

/// Read-only aggregation over a result snapshot.
#[derive(Debug, Clone, Copy)]
pub struct StatsEngine {
    streak_anchor: StreakAnchor,
    numeric_only_averages: bool,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsEngine {
    pub fn new() -> Self {
        Self {
            streak_anchor: StreakAnchor::default(),
            numeric_only_averages: true,
        }
    }

    pub fn from_config(config: &ScoreboardConfig) -> Self {
        Self::new()
            .with_streak_anchor(config.streak_anchor)
            .with_numeric_only_averages(config.numeric_only_averages)
    }

    pub fn with_streak_anchor(mut self, anchor: StreakAnchor) -> Self {
        self.streak_anchor = anchor;
        self
    }

    pub fn with_numeric_only_averages(mut self, numeric_only: bool) -> Self {
        self.numeric_only_averages = numeric_only;
        self
    }

    /// One row per user with a result on or before `as_of`, in rank order.
    pub fn leaderboard(
        &self,
        snapshot: &ResultSnapshot,
        game: &Game,
        as_of: NaiveDate,
    ) -> Vec<LeaderboardRow> {
        let mut rows: Vec<LeaderboardRow> = snapshot
            .users()
            .filter_map(|user_id| self.player_row(snapshot, game, user_id, as_of))
            .collect();
        rows.sort_by(LeaderboardRow::rank_cmp);

        debug!(
            game = %game.id(),
            as_of = %as_of,
            players = rows.len(),
            "Computed leaderboard"
        );
        rows
    }

    pub fn player_row(
        &self,
        snapshot: &ResultSnapshot,
        game: &Game,
        user_id: &str,
        as_of: NaiveDate,
    ) -> Option<LeaderboardRow> {
        let history = snapshot.history_as_of(user_id, as_of);
        if history.is_empty() {
            return None;
        }

        let days: Vec<NaiveDate> = history.iter().map(|r| r.date).collect();
        let streaks = Streaks::from_days(&days, as_of, self.streak_anchor);
        let policy = AveragePolicy::for_game(game, self.numeric_only_averages);
        let window_avg = |days: u32| {
            let (start, end) = trailing_window(as_of, days);
            let range = DateRange::new(start, end);
            average_of(game, policy, history.iter().filter(|r| range.contains(r.date)))
        };

        Some(LeaderboardRow {
            user_id: user_id.to_string(),
            total_results: count(history, |_| true),
            current_streak: streaks.current,
            longest_streak: streaks.longest,
            lifetime_avg: average_of(game, policy, history),
            avg_30d: window_avg(windows::MONTH),
            avg_7d: window_avg(windows::WEEK),
            failures: count(history, |s| matches!(s, Score::Failed)),
            aces: count(history, |s| *s == Score::Numeric(1)),
        })
    }
}

fn count(history: &[GameResult], predicate: impl Fn(&Score) -> bool) -> u32 {
    history.iter().filter(|r| predicate(&r.score)).count() as u32
}
