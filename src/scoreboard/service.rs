use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use super::IngestReport;
use crate::calendar::{CalendarRenderer, MonthGrid, RenderedMonth, SymbolSet};
use crate::config::ScoreboardConfig;
use crate::games::{Game, GameId, GameRegistry};
use crate::ingest::{ChatMessage, GameResult, ParseError, ResultParser};
use crate::mentions::MemberDirectory;
use crate::shared::ScoreboardError;
use crate::stats::{format::format_leaderboard, LeaderboardRow, StatsEngine};
use crate::store::{ResultSnapshot, ResultStore};

/// Entry point tying the parser, the result store and the read-side engines
/// together.
///
/// Ingestion is serialized so that last-write-wins follows arrival order.
/// Reads work on a snapshot of the store and never wait for the ingest lock.
pub struct Scoreboard {
    parser: ResultParser,
    store: Arc<dyn ResultStore>,
    engine: StatsEngine,
    renderer: CalendarRenderer,
    config: ScoreboardConfig,
    ingest_lock: AsyncMutex<()>,
}

impl Scoreboard {
    pub fn builder(store: Arc<dyn ResultStore>) -> ScoreboardBuilder {
        ScoreboardBuilder::new(store)
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    pub fn registry(&self) -> &GameRegistry {
        self.parser.registry()
    }

    /// Parses one message and stores the result it carries.
    ///
    /// `Ok(None)` means the message held a recognizable result that was
    /// dropped for being dated more than a day after the message itself.
    #[instrument(skip(self, message), fields(author_id = %message.author_id))]
    pub async fn ingest(&self, message: &ChatMessage) -> Result<Option<GameResult>, ScoreboardError> {
        let _guard = self.ingest_lock.lock().await;

        let result = match self.parser.parse(message) {
            Ok(result) => result,
            Err(err) => return self.rejected(err).map(|()| None),
        };

        self.store.upsert(result.clone()).await?;
        Ok(Some(result))
    }

    /// Like [`ingest`](Self::ingest) but accepts group recap posts carrying
    /// several results. A future-dated result yields an empty list.
    #[instrument(skip(self, message), fields(author_id = %message.author_id))]
    pub async fn ingest_all(&self, message: &ChatMessage) -> Result<Vec<GameResult>, ScoreboardError> {
        let _guard = self.ingest_lock.lock().await;

        let results = match self.parser.parse_all(message) {
            Ok(results) => results,
            Err(err) => return self.rejected(err).map(|()| Vec::new()),
        };

        self.store.upsert_all(results.clone()).await?;
        Ok(results)
    }

    /// Replays a message log in order. Parse failures are counted, store
    /// failures abort the replay.
    pub async fn ingest_log<'a>(
        &self,
        messages: impl IntoIterator<Item = &'a ChatMessage>,
    ) -> Result<IngestReport, ScoreboardError> {
        let _guard = self.ingest_lock.lock().await;
        let mut report = IngestReport::default();

        for (index, message) in messages.into_iter().enumerate() {
            report.messages += 1;
            match self.parser.parse_all(message) {
                Ok(results) => {
                    let replaced = self.store.upsert_all(results).await?;
                    report.overwritten += replaced.iter().filter(|r| r.is_some()).count();
                    report.stored += replaced.len();
                }
                Err(ParseError::NoMatch) => report.ignored += 1,
                Err(err @ ParseError::FuturePuzzle { .. }) => {
                    warn!(index, error = %err, "Dropping future-dated result");
                    report.future += 1;
                }
                Err(err) => {
                    warn!(index, author_id = %message.author_id, error = %err, "Rejected message");
                    report.rejected.push((index, err.to_string()));
                }
            }
        }

        info!(
            messages = report.messages,
            stored = report.stored,
            overwritten = report.overwritten,
            rejected = report.rejected.len(),
            "Replayed message log"
        );
        Ok(report)
    }

    #[instrument(skip(self))]
    pub async fn get_leaderboard(
        &self,
        game_id: GameId,
        as_of: NaiveDate,
    ) -> Result<Vec<LeaderboardRow>, ScoreboardError> {
        let (game, snapshot) = self.read(game_id).await?;
        Ok(self.engine.leaderboard(&snapshot, game, as_of))
    }

    /// The leaderboard as the plain-text stats post.
    pub async fn leaderboard_text(
        &self,
        game_id: GameId,
        as_of: NaiveDate,
    ) -> Result<String, ScoreboardError> {
        let rows = self.get_leaderboard(game_id, as_of).await?;
        Ok(format_leaderboard(game_id, &rows))
    }

    pub async fn get_player_stats(
        &self,
        user_id: &str,
        game_id: GameId,
        as_of: NaiveDate,
    ) -> Result<Option<LeaderboardRow>, ScoreboardError> {
        let (game, snapshot) = self.read(game_id).await?;
        Ok(self.engine.player_row(&snapshot, game, user_id, as_of))
    }

    /// Users with at least one stored result for the game.
    pub async fn players(&self, game_id: GameId) -> Result<Vec<String>, ScoreboardError> {
        let (_, snapshot) = self.read(game_id).await?;
        Ok(snapshot.users().map(str::to_string).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_calendar(
        &self,
        user_id: &str,
        game_id: GameId,
        month_count: u8,
        as_of: NaiveDate,
        symbol_set: SymbolSet,
    ) -> Result<Vec<RenderedMonth>, ScoreboardError> {
        let grids = self
            .get_calendar_grids(user_id, game_id, month_count, as_of)
            .await?;
        Ok(grids
            .iter()
            .map(|grid| RenderedMonth::from_grid(grid, symbol_set))
            .collect())
    }

    /// Calendar cells before any symbol set is applied.
    pub async fn get_calendar_grids(
        &self,
        user_id: &str,
        game_id: GameId,
        month_count: u8,
        as_of: NaiveDate,
    ) -> Result<Vec<MonthGrid>, ScoreboardError> {
        let (game, snapshot) = self.read(game_id).await?;
        Ok(self
            .renderer
            .render(&snapshot, game, user_id, month_count, as_of))
    }

    async fn read(&self, game_id: GameId) -> Result<(&Game, ResultSnapshot), ScoreboardError> {
        let game = self
            .parser
            .registry()
            .get(game_id)
            .ok_or(ScoreboardError::UnknownGame(game_id))?;
        let snapshot = self.store.snapshot(game_id).await?;
        Ok((game, snapshot))
    }

    fn rejected(&self, err: ParseError) -> Result<(), ScoreboardError> {
        match &err {
            ParseError::NoMatch => {
                debug!("Message is not a result");
                Err(err.into())
            }
            ParseError::FuturePuzzle { .. } => {
                warn!(error = %err, "Dropping future-dated result; check the day boundary offset");
                Ok(())
            }
            ParseError::AmbiguousSubject { .. } | ParseError::InvalidScore { .. } => {
                warn!(error = %err, "Rejected message");
                Err(err.into())
            }
        }
    }
}

pub struct ScoreboardBuilder {
    store: Arc<dyn ResultStore>,
    registry: GameRegistry,
    directory: MemberDirectory,
    config: ScoreboardConfig,
}

impl ScoreboardBuilder {
    fn new(store: Arc<dyn ResultStore>) -> Self {
        Self {
            store,
            registry: GameRegistry::default(),
            directory: MemberDirectory::default(),
            config: ScoreboardConfig::default(),
        }
    }

    pub fn with_registry(mut self, registry: GameRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_directory(mut self, directory: MemberDirectory) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_config(mut self, config: ScoreboardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Scoreboard, ScoreboardError> {
        self.config.validate()?;
        let day_boundary = self.config.day_boundary()?;

        Ok(Scoreboard {
            parser: ResultParser::new(self.registry, self.directory, day_boundary),
            store: self.store,
            engine: StatsEngine::from_config(&self.config),
            renderer: CalendarRenderer::new(),
            config: self.config,
            ingest_lock: AsyncMutex::new(()),
        })
    }
}
