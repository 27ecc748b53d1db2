// Library crate for the daily puzzle scoreboard
// This file exposes the public API for the binary and integration tests

pub mod calendar;
pub mod config;
pub mod dates;
pub mod games;
pub mod ingest;
pub mod mentions;
pub mod scoreboard;
pub mod shared;
pub mod stats;
pub mod store;

// Re-export commonly used types for easier access in tests
pub use calendar::{Cell, MonthGrid, RenderedMonth, SymbolSet};
pub use config::{ConfigError, ScoreboardConfig};
pub use games::{Game, GameId, GamePlugin, GameRegistry, NerdlePlugin, Score, WordlePlugin};
pub use ingest::{ChatMessage, GameResult, ParseError, ResultParser};
pub use mentions::{Member, MemberDirectory};
pub use scoreboard::{IngestReport, Scoreboard};
pub use shared::ScoreboardError;
pub use stats::{Average, LeaderboardRow, StatsEngine, StreakAnchor};
pub use store::{InMemoryResultStore, ResultSnapshot, ResultStore, StoreError};
