use once_cell::sync::Lazy;
use regex::Regex;

use super::{GameId, Score};
use crate::ingest::ParseError;

/// A bare `tries/total` token, e.g. `4/6`, `X/6` or `3/6*` (hard mode).
pub static FRACTION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<tries>\d+|[xX])\s*/\s*(?P<total>\d+)\*?$").expect("fraction pattern compiles")
});

/// Turns captured `tries` / `total` text into a score on a `1..=max_tries`
/// scale, where `X` is a failure.
pub fn parse_fraction(
    game: GameId,
    tries: &str,
    total: &str,
    max_tries: u8,
) -> Result<Score, ParseError> {
    let invalid = || ParseError::InvalidScore {
        game,
        token: format!("{}/{}", tries, total),
    };

    if total.parse::<u8>().ok() != Some(max_tries) {
        return Err(invalid());
    }
    if tries.eq_ignore_ascii_case("x") {
        return Ok(Score::Failed);
    }
    match tries.parse::<u8>() {
        Ok(n) if (1..=max_tries).contains(&n) => Ok(Score::Numeric(n)),
        _ => Err(invalid()),
    }
}

/// Shared bare-token check for games scored as `tries/max_tries`.
pub(super) fn parse_fraction_token(
    game: GameId,
    token: &str,
    max_tries: u8,
) -> Result<Option<Score>, ParseError> {
    let Some(caps) = FRACTION_TOKEN.captures(token.trim()) else {
        return Ok(None);
    };
    parse_fraction(game, &caps["tries"], &caps["total"], max_tries).map(Some)
}
