use thiserror::Error;

use crate::config::ConfigError;
use crate::games::GameId;
use crate::ingest::ParseError;
use crate::store::StoreError;

/// Errors surfaced by the [`Scoreboard`](crate::scoreboard::Scoreboard) facade.
#[derive(Error, Debug)]
pub enum ScoreboardError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Game {0} is not registered")]
    UnknownGame(GameId),
}

impl ScoreboardError {
    /// Per-message rejections; anything else points at the store or setup.
    pub fn is_parse(&self) -> bool {
        matches!(self, ScoreboardError::Parse(_))
    }
}
