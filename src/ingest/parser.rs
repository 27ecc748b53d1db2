use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{ChatMessage, GameResult, ParseError};
use crate::dates::{latest_puzzle_day, DayBoundary};
use crate::games::{Game, GamePlugin, GameRegistry, Score, SummaryLine};
use crate::mentions::{MemberDirectory, MentionToken};

/// Bare proxy post: one or more mentions followed by a single trailing token,
/// e.g. `@alice 4/6` or `<@42>: X/6`.
static PROXY_FALLBACK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<handles>(?:<@!?\d+>|@[A-Za-z0-9._-]+)(?:\s+(?:<@!?\d+>|@[A-Za-z0-9._-]+))*)[\s:]+(?P<token>.+?)\s*$",
    )
    .expect("proxy fallback pattern compiles")
});

/// Turns chat messages into results. Pure: the caller stores what comes out.
#[derive(Debug, Clone, Default)]
pub struct ResultParser {
    registry: GameRegistry,
    directory: MemberDirectory,
    day_boundary: DayBoundary,
}

impl ResultParser {
    pub fn new(registry: GameRegistry, directory: MemberDirectory, day_boundary: DayBoundary) -> Self {
        Self {
            registry,
            directory,
            day_boundary,
        }
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    /// Parses a message carrying at most one result.
    ///
    /// Games are tried in registration order and the first one that claims
    /// the text decides the outcome, including `InvalidScore`. When no share
    /// card matches, a bare `@handle score` post is read as a proxy post for
    /// the registry's fallback game.
    pub fn parse(&self, message: &ChatMessage) -> Result<GameResult, ParseError> {
        let message_date = self.day_boundary.local_date(message.timestamp);

        for game in self.registry.iter() {
            let Some(found) = game.try_parse(&message.text)? else {
                continue;
            };

            let user_id = self.resolve_subject(message, &found.subjects)?;
            let date = found.date.unwrap_or(message_date);
            if date > latest_puzzle_day(message_date) {
                return Err(ParseError::FuturePuzzle {
                    game: game.id(),
                    date,
                    message_date,
                });
            }

            debug!(
                game = %game.id(),
                user_id = %user_id,
                author_id = %message.author_id,
                %date,
                score = %found.score,
                "Matched share card"
            );
            return Ok(GameResult {
                user_id,
                game_id: game.id(),
                date,
                score: found.score,
                source_text: found.source_text,
                reported_by: message.author_id.clone(),
                puzzle_number: found.puzzle_number,
                reported_at: message.timestamp,
            });
        }

        self.parse_proxy_fallback(message, message_date)
    }

    /// Parses a message that may carry several results.
    ///
    /// Group recap lines produce one result per listed player, dated on the
    /// day the recap covers. Handles that the member directory cannot place are
    /// skipped. Messages without recap lines go through [`parse`](Self::parse).
    pub fn parse_all(&self, message: &ChatMessage) -> Result<Vec<GameResult>, ParseError> {
        for game in self.registry.iter() {
            let lines = game.parse_summary(&message.text);
            if lines.is_empty() {
                continue;
            }
            return self.collect_summary(game, message, lines);
        }

        self.parse(message).map(|result| vec![result])
    }

    fn collect_summary(
        &self,
        game: &Game,
        message: &ChatMessage,
        lines: Vec<Result<SummaryLine, ParseError>>,
    ) -> Result<Vec<GameResult>, ParseError> {
        let message_date = self.day_boundary.local_date(message.timestamp);
        let mut results = Vec::new();
        let mut first_error = None;

        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(game = %game.id(), author_id = %message.author_id, error = %err, "Skipping recap line");
                    first_error.get_or_insert(err);
                    continue;
                }
            };

            let date = message_date
                .checked_sub_days(Days::new(u64::from(line.days_back)))
                .unwrap_or(message_date);
            for token in &line.handles {
                let Some(user_id) = self.directory.strict_user_id_for(token) else {
                    warn!(game = %game.id(), token = ?token, "Could not resolve recap handle");
                    continue;
                };
                results.push(GameResult {
                    user_id,
                    game_id: game.id(),
                    date,
                    score: line.score.clone(),
                    source_text: line.source_text.clone(),
                    reported_by: message.author_id.clone(),
                    puzzle_number: None,
                    reported_at: message.timestamp,
                });
            }
        }

        if results.is_empty() {
            return Err(first_error.unwrap_or(ParseError::NoMatch));
        }
        debug!(game = %game.id(), count = results.len(), "Parsed group recap");
        Ok(results)
    }

    fn parse_proxy_fallback(
        &self,
        message: &ChatMessage,
        message_date: NaiveDate,
    ) -> Result<GameResult, ParseError> {
        let Some(caps) = PROXY_FALLBACK.captures(&message.text) else {
            return Err(ParseError::NoMatch);
        };

        let game = self.registry.fallback();
        let score: Score = game
            .parse_score_token(&caps["token"])?
            .ok_or(ParseError::NoMatch)?;

        let tokens: Vec<MentionToken> = caps["handles"]
            .split_whitespace()
            .filter_map(MentionToken::parse)
            .collect();
        if tokens.is_empty() {
            return Err(ParseError::NoMatch);
        }
        let user_id = self.resolve_subject(message, &tokens)?;

        debug!(
            game = %game.id(),
            user_id = %user_id,
            author_id = %message.author_id,
            score = %score,
            "Matched proxy post"
        );
        Ok(GameResult {
            user_id,
            game_id: game.id(),
            date: message_date,
            score,
            source_text: message.text.trim().to_string(),
            reported_by: message.author_id.clone(),
            puzzle_number: None,
            reported_at: message.timestamp,
        })
    }

    /// The platform's mention list wins when present; otherwise the handles
    /// found in the text. No candidate means the author posted for themselves.
    fn resolve_subject(
        &self,
        message: &ChatMessage,
        tokens: &[MentionToken],
    ) -> Result<String, ParseError> {
        let raw: Vec<String> = if message.mentioned_user_ids.is_empty() {
            tokens.iter().map(|t| self.directory.user_id_for(t)).collect()
        } else {
            message.mentioned_user_ids.clone()
        };

        let mut candidates: Vec<String> = Vec::new();
        for id in raw {
            if !candidates.contains(&id) {
                candidates.push(id);
            }
        }

        match candidates.len() {
            0 => Ok(message.author_id.clone()),
            1 => Ok(candidates.remove(0)),
            _ => Err(ParseError::AmbiguousSubject { candidates }),
        }
    }
}
