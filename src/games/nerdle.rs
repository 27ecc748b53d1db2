use once_cell::sync::Lazy;
use regex::Regex;

use super::score::{parse_fraction, parse_fraction_token};
use super::{Color, GameId, GamePlugin, PluginMatch, Score, Symbol};
use crate::ingest::ParseError;
use crate::mentions::extract_mentions;

const MAX_TRIES: u8 = 6;

/// `nerdlegame 728 3/6` share card header.
static SHARE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bnerdle(?:game)?\s+#?(?P<number>\d+)\s+(?P<tries>\d+|x)\s*/\s*(?P<total>\d+)\*?",
    )
    .expect("nerdle share pattern compiles")
});

/// Nerdle results carry a puzzle number but no day mapping; the message
/// timestamp decides the date.
#[derive(Debug, Clone, Default)]
pub struct NerdlePlugin;

impl NerdlePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl GamePlugin for NerdlePlugin {
    fn id(&self) -> GameId {
        GameId::Nerdle
    }

    fn try_parse(&self, text: &str) -> Result<Option<PluginMatch>, ParseError> {
        let Some(caps) = SHARE_PATTERN.captures(text) else {
            return Ok(None);
        };

        let score = parse_fraction(self.id(), &caps["tries"], &caps["total"], MAX_TRIES)?;

        Ok(Some(PluginMatch {
            score,
            date: None,
            puzzle_number: caps["number"].parse().ok(),
            subjects: extract_mentions(text),
            source_text: caps[0].to_string(),
        }))
    }

    fn parse_score_token(&self, token: &str) -> Result<Option<Score>, ParseError> {
        parse_fraction_token(self.id(), token, MAX_TRIES)
    }

    /// Banded palette: 1-2 green, 3-4 yellow, 5-6 orange, X red.
    fn score_to_symbol(&self, score: &Score) -> Symbol {
        match score {
            Score::Numeric(n @ 1..=2) => Symbol::new(Color::Green, digit(*n)),
            Score::Numeric(n @ 3..=4) => Symbol::new(Color::Yellow, digit(*n)),
            Score::Numeric(n @ 5..=6) => Symbol::new(Color::Orange, digit(*n)),
            Score::Failed => Symbol::new(Color::Red, 'X'),
            Score::Numeric(_) | Score::Custom(_) => Symbol::new(Color::White, '?'),
        }
    }
}

fn digit(n: u8) -> char {
    char::from_digit(u32::from(n), 10).unwrap_or('?')
}
