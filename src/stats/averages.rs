use crate::games::{Game, GamePlugin, Score};
use crate::ingest::GameResult;

use super::Average;

/// How non-numeric results enter an average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AveragePolicy {
    pub numeric_only: bool,
    pub failure_penalty: Option<u8>,
}

impl AveragePolicy {
    pub fn numeric_only() -> Self {
        Self {
            numeric_only: true,
            failure_penalty: None,
        }
    }

    /// Uses the game's failure penalty when `numeric_only` is off. Games
    /// without a penalty keep excluding failures.
    pub fn for_game(game: &Game, numeric_only: bool) -> Self {
        Self {
            numeric_only,
            failure_penalty: game.failure_penalty(),
        }
    }

    fn value_of(&self, game: &Game, score: &Score) -> Option<f64> {
        if game.is_numeric(score) {
            return score.as_numeric().map(f64::from);
        }
        match score {
            Score::Failed if !self.numeric_only => self.failure_penalty.map(f64::from),
            _ => None,
        }
    }
}

pub fn average_of<'a>(
    game: &Game,
    policy: AveragePolicy,
    results: impl IntoIterator<Item = &'a GameResult>,
) -> Average {
    let (sum, count) = results
        .into_iter()
        .filter_map(|r| policy.value_of(game, &r.score))
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    Average::from_sum(sum, count)
}
