use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::games::{GameId, Score};

/// A raw chat message as handed over by the delivery layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author_id: String,
    pub timestamp: DateTime<Utc>,
    pub text: String,
    /// Users the platform resolved as mentioned, in any order.
    #[serde(default)]
    pub mentioned_user_ids: Vec<String>,
}

impl ChatMessage {
    pub fn new(author_id: impl Into<String>, timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            timestamp,
            text: text.into(),
            mentioned_user_ids: Vec::new(),
        }
    }

    pub fn with_mentions(mut self, mentions: &[&str]) -> Self {
        self.mentioned_user_ids = mentions.iter().map(|m| m.to_string()).collect();
        self
    }
}

/// One player's outcome for one game on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub user_id: String,
    pub game_id: GameId,
    pub date: NaiveDate,
    pub score: Score,
    pub source_text: String,
    pub reported_by: String,
    pub puzzle_number: Option<u32>,
    pub reported_at: DateTime<Utc>,
}

impl GameResult {
    pub fn key(&self) -> ResultKey {
        ResultKey {
            game_id: self.game_id,
            user_id: self.user_id.clone(),
            date: self.date,
        }
    }

    pub fn is_proxy(&self) -> bool {
        self.user_id != self.reported_by
    }
}

/// Identity of a result: at most one per player, game and day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultKey {
    pub game_id: GameId,
    pub user_id: String,
    pub date: NaiveDate,
}
