use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::{ResultSnapshot, StoreError};
use crate::games::GameId;
use crate::ingest::{GameResult, ResultKey};

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Results keyed by (game, user, day). Writing a result whose key already
/// exists replaces the stored one.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Inserts or replaces; returns the record that was replaced, if any.
    async fn upsert(&self, result: GameResult) -> Result<Option<GameResult>, StoreError>;

    /// Writes a batch as one unit: a concurrent snapshot sees all of it or
    /// none of it. Returns the replaced record for each input, in order.
    async fn upsert_all(
        &self,
        results: Vec<GameResult>,
    ) -> Result<Vec<Option<GameResult>>, StoreError>;

    /// Results for a game, optionally narrowed to one user and a day range,
    /// ordered by date ascending then user id.
    async fn query(
        &self,
        game_id: GameId,
        user_id: Option<&str>,
        range: Option<DateRange>,
    ) -> Result<Vec<GameResult>, StoreError>;

    /// Point-in-time copy of every result for a game.
    async fn snapshot(&self, game_id: GameId) -> Result<ResultSnapshot, StoreError>;

    async fn len(&self) -> Result<usize, StoreError>;

    /// Drops every result for a game; returns how many were removed.
    async fn clear_game(&self, game_id: GameId) -> Result<usize, StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryResultStore {
    results: Arc<RwLock<BTreeMap<ResultKey, GameResult>>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    #[instrument(skip(self, result), fields(user_id = %result.user_id, game = %result.game_id, date = %result.date))]
    async fn upsert(&self, result: GameResult) -> Result<Option<GameResult>, StoreError> {
        let mut results = self.results.write().await;
        let replaced = results.insert(result.key(), result);

        match &replaced {
            Some(previous) => info!(
                previous_score = %previous.score,
                previous_reporter = %previous.reported_by,
                "Overwrote existing result"
            ),
            None => debug!("Stored new result"),
        }
        Ok(replaced)
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    async fn upsert_all(
        &self,
        results: Vec<GameResult>,
    ) -> Result<Vec<Option<GameResult>>, StoreError> {
        let mut stored = self.results.write().await;
        let replaced: Vec<Option<GameResult>> = results
            .into_iter()
            .map(|result| stored.insert(result.key(), result))
            .collect();

        for previous in replaced.iter().flatten() {
            info!(
                user_id = %previous.user_id,
                date = %previous.date,
                previous_score = %previous.score,
                previous_reporter = %previous.reported_by,
                "Overwrote existing result"
            );
        }
        debug!("Stored result batch");
        Ok(replaced)
    }

    #[instrument(skip(self))]
    async fn query(
        &self,
        game_id: GameId,
        user_id: Option<&str>,
        range: Option<DateRange>,
    ) -> Result<Vec<GameResult>, StoreError> {
        let results = self.results.read().await;
        let mut found: Vec<GameResult> = results
            .values()
            .filter(|r| r.game_id == game_id)
            .filter(|r| user_id.map_or(true, |u| r.user_id == u))
            .filter(|r| range.map_or(true, |range| range.contains(r.date)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.user_id.cmp(&b.user_id)));
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn snapshot(&self, game_id: GameId) -> Result<ResultSnapshot, StoreError> {
        let results = self.results.read().await;
        let copied: Vec<GameResult> = results
            .values()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        debug!(count = copied.len(), "Took result snapshot");
        Ok(ResultSnapshot::new(game_id, copied))
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.results.read().await.len())
    }

    #[instrument(skip(self))]
    async fn clear_game(&self, game_id: GameId) -> Result<usize, StoreError> {
        let mut results = self.results.write().await;
        let before = results.len();
        results.retain(|key, _| key.game_id != game_id);
        let removed = before - results.len();
        info!(removed, "Cleared game results");
        Ok(removed)
    }
}
