use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::games::GameId;
use crate::ingest::GameResult;

/// Immutable copy of one game's results, grouped by user and sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSnapshot {
    game_id: GameId,
    by_user: BTreeMap<String, Vec<GameResult>>,
}

impl ResultSnapshot {
    pub fn new(game_id: GameId, results: impl IntoIterator<Item = GameResult>) -> Self {
        let mut by_user: BTreeMap<String, Vec<GameResult>> = BTreeMap::new();
        for result in results.into_iter().filter(|r| r.game_id == game_id) {
            by_user.entry(result.user_id.clone()).or_default().push(result);
        }
        for history in by_user.values_mut() {
            history.sort_by_key(|r| r.date);
            history.dedup_by_key(|r| r.date);
        }
        Self { game_id, by_user }
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Users with at least one result, ascending.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.by_user.keys().map(String::as_str)
    }

    pub fn history(&self, user_id: &str) -> &[GameResult] {
        self.by_user.get(user_id).map_or(&[], Vec::as_slice)
    }

    /// A user's history restricted to days on or before `as_of`.
    pub fn history_as_of(&self, user_id: &str, as_of: NaiveDate) -> &[GameResult] {
        let history = self.history(user_id);
        let end = history.partition_point(|r| r.date <= as_of);
        &history[..end]
    }

    pub fn result_on(&self, user_id: &str, date: NaiveDate) -> Option<&GameResult> {
        let history = self.history(user_id);
        history
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &history[i])
    }

    pub fn len(&self) -> usize {
        self.by_user.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Score;
    use chrono::{TimeZone, Utc};

    fn result(user: &str, d: u32) -> GameResult {
        GameResult {
            user_id: user.to_string(),
            game_id: GameId::Wordle,
            date: NaiveDate::from_ymd_opt(2024, 5, d).unwrap(),
            score: Score::Numeric(3),
            source_text: String::new(),
            reported_by: user.to_string(),
            puzzle_number: None,
            reported_at: Utc.with_ymd_and_hms(2024, 5, d, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn groups_by_user_in_date_order() {
        let snapshot = ResultSnapshot::new(
            GameId::Wordle,
            vec![result("bob", 4), result("alice", 9), result("alice", 2)],
        );

        assert_eq!(snapshot.users().collect::<Vec<_>>(), vec!["alice", "bob"]);
        let days: Vec<NaiveDate> = snapshot.history("alice").iter().map(|r| r.date).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 9).unwrap()
            ]
        );
        assert!(snapshot.history("nobody").is_empty());
    }

    #[test]
    fn history_as_of_cuts_off_later_days() {
        let snapshot = ResultSnapshot::new(
            GameId::Wordle,
            vec![result("alice", 2), result("alice", 5), result("alice", 9)],
        );
        let as_of = NaiveDate::from_ymd_opt(2024, 5, 5).unwrap();

        assert_eq!(snapshot.history_as_of("alice", as_of).len(), 2);
        assert!(snapshot.result_on("alice", as_of).is_some());
        assert!(snapshot
            .result_on("alice", NaiveDate::from_ymd_opt(2024, 5, 6).unwrap())
            .is_none());
    }
}
