//! Per-game parsing and presentation rules.
//!
//! Each supported game is a plugin struct implementing [`GamePlugin`]. The set
//! is closed: [`Game`] has one variant per plugin and the parser walks a
//! [`GameRegistry`] in registration order.

mod nerdle;
mod score;
mod wordle;

pub use nerdle::NerdlePlugin;
pub use wordle::WordlePlugin;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::ConfigError;
use crate::ingest::ParseError;
use crate::mentions::MentionToken;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameId {
    Wordle,
    Nerdle,
}

/// A game outcome. `Failed` is the `X` sentinel; `Custom` carries values a
/// game cannot express on its numeric scale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Score {
    Numeric(u8),
    Failed,
    Custom(String),
}

impl Score {
    pub fn as_numeric(&self) -> Option<u8> {
        match self {
            Score::Numeric(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Numeric(n) => write!(f, "{}", n),
            Score::Failed => write!(f, "X"),
            Score::Custom(value) => write!(f, "{}", value),
        }
    }
}

/// Abstract colors a game can paint a calendar cell with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum Color {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
    Brown,
    Purple,
    White,
}

/// Presentation token for a score: a color for emoji output and a single
/// character for monospaced output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub color: Color,
    pub code: char,
}

impl Symbol {
    pub const fn new(color: Color, code: char) -> Self {
        Self { color, code }
    }
}

/// A structured single-result match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMatch {
    pub score: Score,
    /// Present only when the content carries a puzzle index mapped to a day.
    pub date: Option<NaiveDate>,
    pub puzzle_number: Option<u32>,
    /// Users referenced in the text; the parser decides who the result is for.
    pub subjects: Vec<MentionToken>,
    pub source_text: String,
}

/// One line of a group recap, e.g. `👑 3/6: @tim @joe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub score: Score,
    pub handles: Vec<MentionToken>,
    pub source_text: String,
    /// Days between the recapped puzzle and the day the recap was posted.
    pub days_back: u32,
}

pub trait GamePlugin {
    fn id(&self) -> GameId;

    /// `Ok(None)` when the text does not look like this game's share card.
    fn try_parse(&self, text: &str) -> Result<Option<PluginMatch>, ParseError>;

    /// Validates a bare score token such as `4/6`. `Ok(None)` when the token
    /// is not score-shaped for this game.
    fn parse_score_token(&self, token: &str) -> Result<Option<Score>, ParseError>;

    fn parse_summary(&self, _text: &str) -> Vec<Result<SummaryLine, ParseError>> {
        Vec::new()
    }

    fn score_to_symbol(&self, score: &Score) -> Symbol;

    fn is_numeric(&self, score: &Score) -> bool {
        matches!(score, Score::Numeric(_))
    }

    /// What a failed attempt is worth when failures are averaged in.
    fn failure_penalty(&self) -> Option<u8> {
        None
    }
}

#[derive(Debug, Clone)]
pub enum Game {
    Wordle(WordlePlugin),
    Nerdle(NerdlePlugin),
}

impl GamePlugin for Game {
    fn id(&self) -> GameId {
        match self {
            Game::Wordle(plugin) => plugin.id(),
            Game::Nerdle(plugin) => plugin.id(),
        }
    }

    fn try_parse(&self, text: &str) -> Result<Option<PluginMatch>, ParseError> {
        match self {
            Game::Wordle(plugin) => plugin.try_parse(text),
            Game::Nerdle(plugin) => plugin.try_parse(text),
        }
    }

    fn parse_score_token(&self, token: &str) -> Result<Option<Score>, ParseError> {
        match self {
            Game::Wordle(plugin) => plugin.parse_score_token(token),
            Game::Nerdle(plugin) => plugin.parse_score_token(token),
        }
    }

    fn parse_summary(&self, text: &str) -> Vec<Result<SummaryLine, ParseError>> {
        match self {
            Game::Wordle(plugin) => plugin.parse_summary(text),
            Game::Nerdle(plugin) => plugin.parse_summary(text),
        }
    }

    fn score_to_symbol(&self, score: &Score) -> Symbol {
        match self {
            Game::Wordle(plugin) => plugin.score_to_symbol(score),
            Game::Nerdle(plugin) => plugin.score_to_symbol(score),
        }
    }

    fn is_numeric(&self, score: &Score) -> bool {
        match self {
            Game::Wordle(plugin) => plugin.is_numeric(score),
            Game::Nerdle(plugin) => plugin.is_numeric(score),
        }
    }

    fn failure_penalty(&self) -> Option<u8> {
        match self {
            Game::Wordle(plugin) => plugin.failure_penalty(),
            Game::Nerdle(plugin) => plugin.failure_penalty(),
        }
    }
}

impl From<WordlePlugin> for Game {
    fn from(plugin: WordlePlugin) -> Self {
        Game::Wordle(plugin)
    }
}

impl From<NerdlePlugin> for Game {
    fn from(plugin: NerdlePlugin) -> Self {
        Game::Nerdle(plugin)
    }
}

/// Ordered set of games. The first game that claims a message wins, and the
/// first game is the target of bare `@handle score` proxy posts.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    games: Vec<Game>,
}

impl Default for GameRegistry {
    /// Wordle, then Nerdle.
    fn default() -> Self {
        Self {
            games: vec![
                Game::Wordle(WordlePlugin::new()),
                Game::Nerdle(NerdlePlugin::new()),
            ],
        }
    }
}

impl GameRegistry {
    pub fn new(games: Vec<Game>) -> Result<Self, ConfigError> {
        if games.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        for (index, game) in games.iter().enumerate() {
            if games[..index].iter().any(|g| g.id() == game.id()) {
                return Err(ConfigError::DuplicateGame(game.id()));
            }
        }
        Ok(Self { games })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id() == id)
    }

    pub fn fallback(&self) -> &Game {
        &self.games[0]
    }

    pub fn ids(&self) -> Vec<GameId> {
        self.games.iter().map(GamePlugin::id).collect()
    }
}
