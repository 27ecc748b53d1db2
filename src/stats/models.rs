use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Mean score over a window. A window without any countable result has no
/// average rather than a zero one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Average {
    #[default]
    NoData,
    Value(f64),
}

impl Average {
    pub fn from_sum(sum: f64, count: usize) -> Self {
        if count == 0 {
            Average::NoData
        } else {
            Average::Value(sum / count as f64)
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Average::NoData => None,
            Average::Value(v) => Some(*v),
        }
    }

    /// Lower averages first; windows without data sort after every value.
    pub fn ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Average::Value(a), Average::Value(b)) => a.total_cmp(b),
            (Average::Value(_), Average::NoData) => Ordering::Less,
            (Average::NoData, Average::Value(_)) => Ordering::Greater,
            (Average::NoData, Average::NoData) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::NoData => write!(f, "—"),
            Average::Value(v) => write!(f, "{:.2}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: String,
    pub total_results: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub lifetime_avg: Average,
    pub avg_30d: Average,
    pub avg_7d: Average,
    pub failures: u32,
    pub aces: u32,
}

impl LeaderboardRow {
    /// Leaderboard order: most results, then best lifetime average, then user id.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .total_results
            .cmp(&self.total_results)
            .then_with(|| self.lifetime_avg.ascending(&other.lifetime_avg))
            .then_with(|| self.user_id.cmp(&other.user_id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardTotals {
    pub players: u32,
    pub results: u32,
    pub failures: u32,
    pub aces: u32,
}

impl LeaderboardTotals {
    pub fn from_rows(rows: &[LeaderboardRow]) -> Self {
        rows.iter().fold(Self::default(), |mut totals, row| {
            totals.players += 1;
            totals.results += row.total_results;
            totals.failures += row.failures;
            totals.aces += row.aces;
            totals
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user: &str, total: u32, avg: Average) -> LeaderboardRow {
        LeaderboardRow {
            user_id: user.into(),
            total_results: total,
            current_streak: 0,
            longest_streak: 0,
            lifetime_avg: avg,
            avg_30d: Average::NoData,
            avg_7d: Average::NoData,
            failures: 1,
            aces: 0,
        }
    }

    #[test]
    fn empty_window_has_no_average() {
        assert_eq!(Average::from_sum(0.0, 0), Average::NoData);
        assert_eq!(Average::from_sum(5.0, 2), Average::Value(2.5));
        assert_eq!(Average::NoData.to_string(), "—");
        assert_eq!(Average::Value(3.0).to_string(), "3.00");
    }

    #[test]
    fn rows_rank_by_total_then_average_then_user() {
        let mut rows = vec![
            row("dave", 3, Average::NoData),
            row("carol", 3, Average::Value(3.5)),
            row("bob", 5, Average::Value(4.0)),
            row("alice", 3, Average::Value(3.5)),
        ];
        rows.sort_by(LeaderboardRow::rank_cmp);

        let order: Vec<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(order, vec!["bob", "alice", "carol", "dave"]);
    }

    #[test]
    fn totals_sum_every_row() {
        let rows = vec![row("a", 3, Average::NoData), row("b", 4, Average::NoData)];
        let totals = LeaderboardTotals::from_rows(&rows);
        assert_eq!(
            totals,
            LeaderboardTotals {
                players: 2,
                results: 7,
                failures: 2,
                aces: 0
            }
        );
    }
}
