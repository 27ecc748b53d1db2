use chrono::NaiveDate;
use thiserror::Error;

use crate::games::GameId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The message is not a game result. Most chatter ends here.
    #[error("message does not contain a game result")]
    NoMatch,

    #[error("message mentions more than one player: {}", candidates.join(", "))]
    AmbiguousSubject { candidates: Vec<String> },

    #[error("invalid {game} score token '{token}'")]
    InvalidScore { game: GameId, token: String },

    #[error("{game} result for {date} posted on {message_date} is in the future")]
    FuturePuzzle {
        game: GameId,
        date: NaiveDate,
        message_date: NaiveDate,
    },
}

impl ParseError {
    /// Whether the caller can drop the message without telling anyone.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, ParseError::NoMatch)
    }
}
