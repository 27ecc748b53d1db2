use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::score::{parse_fraction, parse_fraction_token};
use super::{Color, GameId, GamePlugin, PluginMatch, Score, Symbol, SummaryLine};
use crate::dates::PuzzleCalendar;
use crate::ingest::ParseError;
use crate::mentions::{extract_mentions, MentionToken};

const MAX_TRIES: u8 = 6;

/// `Wordle 1,234 3/6*` share card header; the emoji grid that follows is ignored.
static SHARE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bwordle\s+#?(?P<number>\d{1,3}(?:[,.]\d{3})+|\d+)\s+(?P<tries>\d+|x)\s*/\s*(?P<total>\d+)\*?",
    )
    .expect("wordle share pattern compiles")
});

/// Group recap lines posted by the Wordle app: `👑 3/6: @tim`, `X/6: @bob @joe`.
static SUMMARY_LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[^\S\n]*(?:\S+[^\S\n]+)?(?P<tries>\d+|X)[^\S\n]*/[^\S\n]*(?P<total>\d+)[^\S\n]*:[^\S\n]*(?P<handles>(?:<@!?\d+>|@[A-Za-z0-9._-]+)(?:[^\S\n]+(?:<@!?\d+>|@[A-Za-z0-9._-]+))*)[^\S\n]*$",
    )
    .expect("wordle summary pattern compiles")
});

/// Recap header of the Wordle app, which reports the previous day's games.
static YESTERDAY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\byesterday(?:'|’)?s\s+results\b").expect("wordle recap header compiles")
});

#[derive(Debug, Clone)]
pub struct WordlePlugin {
    calendar: PuzzleCalendar,
}

impl Default for WordlePlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl WordlePlugin {
    /// Puzzle 0 was published on 2021-06-19.
    pub fn new() -> Self {
        let epoch = NaiveDate::from_ymd_opt(2021, 6, 19).unwrap_or(NaiveDate::MIN);
        Self::with_calendar(PuzzleCalendar::new(epoch, 0))
    }

    pub fn with_calendar(calendar: PuzzleCalendar) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &PuzzleCalendar {
        &self.calendar
    }
}

impl GamePlugin for WordlePlugin {
    fn id(&self) -> GameId {
        GameId::Wordle
    }

    fn try_parse(&self, text: &str) -> Result<Option<PluginMatch>, ParseError> {
        let Some(caps) = SHARE_PATTERN.captures(text) else {
            return Ok(None);
        };

        let score = parse_fraction(self.id(), &caps["tries"], &caps["total"], MAX_TRIES)?;
        let puzzle_number = caps["number"].replace([',', '.'], "").parse::<u32>().ok();
        let date = puzzle_number.and_then(|n| self.calendar.date_for(n));

        Ok(Some(PluginMatch {
            score,
            date,
            puzzle_number,
            subjects: extract_mentions(text),
            source_text: caps[0].to_string(),
        }))
    }

    fn parse_score_token(&self, token: &str) -> Result<Option<Score>, ParseError> {
        parse_fraction_token(self.id(), token, MAX_TRIES)
    }

    fn parse_summary(&self, text: &str) -> Vec<Result<SummaryLine, ParseError>> {
        let days_back = u32::from(YESTERDAY_HEADER.is_match(text));
        SUMMARY_LINE_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let score = parse_fraction(self.id(), &caps["tries"], &caps["total"], MAX_TRIES)?;
                let handles: Vec<MentionToken> = caps["handles"]
                    .split_whitespace()
                    .filter_map(MentionToken::parse)
                    .collect();
                Ok(SummaryLine {
                    score,
                    handles,
                    source_text: caps[0].trim().to_string(),
                    days_back,
                })
            })
            .collect()
    }

    /// 1 green, 2 blue, 3 yellow, 4 orange, 5 red, 6 brown, X purple.
    fn score_to_symbol(&self, score: &Score) -> Symbol {
        match score {
            Score::Numeric(1) => Symbol::new(Color::Green, '1'),
            Score::Numeric(2) => Symbol::new(Color::Blue, '2'),
            Score::Numeric(3) => Symbol::new(Color::Yellow, '3'),
            Score::Numeric(4) => Symbol::new(Color::Orange, '4'),
            Score::Numeric(5) => Symbol::new(Color::Red, '5'),
            Score::Numeric(6) => Symbol::new(Color::Brown, '6'),
            Score::Failed => Symbol::new(Color::Purple, 'X'),
            Score::Numeric(_) | Score::Custom(_) => Symbol::new(Color::White, '?'),
        }
    }

    fn failure_penalty(&self) -> Option<u8> {
        Some(MAX_TRIES + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn share_card_yields_numeric_score(#[case] tries: u8) {
        let text = format!("Wordle 1,234 {}/6\n\n⬛🟨⬛⬛⬛\n🟩🟩🟩🟩🟩", tries);
        let found = WordlePlugin::new().try_parse(&text).unwrap().unwrap();

        assert_eq!(found.score, Score::Numeric(tries));
        assert_eq!(found.puzzle_number, Some(1234));
        assert_eq!(found.date, Some(date(2024, 11, 4)));
        assert_eq!(found.source_text, format!("Wordle 1,234 {}/6", tries));
        assert!(found.subjects.is_empty());
    }

    #[test]
    fn share_card_with_x_is_a_failure() {
        let found = WordlePlugin::new()
            .try_parse("Wordle 1,234 X/6\n⬛⬛⬛⬛⬛")
            .unwrap()
            .unwrap();
        assert_eq!(found.score, Score::Failed);
    }

    #[rstest]
    #[case("Wordle 1.234 3/6*")]
    #[case("wordle #1234 3/6")]
    #[case("today: Wordle 1234 3 / 6 🎉")]
    fn tolerates_share_card_variants(#[case] text: &str) {
        let found = WordlePlugin::new().try_parse(text).unwrap().unwrap();
        assert_eq!(found.score, Score::Numeric(3));
        assert_eq!(found.puzzle_number, Some(1234));
    }

    #[test]
    fn share_card_keeps_mentioned_subjects() {
        let found = WordlePlugin::new()
            .try_parse("for @alice: Wordle 1,234 2/6")
            .unwrap()
            .unwrap();
        assert_eq!(found.subjects, vec![MentionToken::Handle("alice".into())]);
    }

    #[rstest]
    #[case("Wordle 1,234 7/6")]
    #[case("Wordle 1,234 0/6")]
    #[case("Wordle 1,234 3/5")]
    fn out_of_range_scores_are_invalid(#[case] text: &str) {
        assert!(matches!(
            WordlePlugin::new().try_parse(text),
            Err(ParseError::InvalidScore { game: GameId::Wordle, .. })
        ));
    }

    #[rstest]
    #[case("I love wordle")]
    #[case("3/6 today")]
    #[case("Wordle was hard today, 5 tries")]
    fn chatter_is_not_a_match(#[case] text: &str) {
        assert_eq!(WordlePlugin::new().try_parse(text).unwrap(), None);
    }

    #[test]
    fn parses_group_recap_lines() {
        let text = "Your group is on a 12 day streak! 🔥 Here are yesterday's results:\n\
                    👑 3/6: @tim\n\
                    4/6: <@42> @joe\n\
                    X/6: @bob";
        let lines: Vec<SummaryLine> = WordlePlugin::new()
            .parse_summary(text)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].score, Score::Numeric(3));
        assert_eq!(lines[0].handles, vec![MentionToken::Handle("tim".into())]);
        assert_eq!(
            lines[1].handles,
            vec![
                MentionToken::Id("42".into()),
                MentionToken::Handle("joe".into())
            ]
        );
        assert_eq!(lines[2].score, Score::Failed);
        assert_eq!(lines[2].source_text, "X/6: @bob");
        assert!(lines.iter().all(|line| line.days_back == 1));
    }

    #[test]
    fn recap_without_header_is_for_the_posting_day() {
        let lines = WordlePlugin::new().parse_summary("👑 3/6: @tim");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().unwrap().days_back, 0);
    }

    #[test]
    fn recap_line_with_bad_score_is_reported() {
        let lines = WordlePlugin::new().parse_summary("9/6: @tim");
        assert_eq!(lines.len(), 1);
        assert!(matches!(lines[0], Err(ParseError::InvalidScore { .. })));
    }

    #[test]
    fn plain_text_has_no_recap_lines() {
        assert!(WordlePlugin::new().parse_summary("good morning").is_empty());
    }

    #[test]
    fn symbols_are_distinct_per_score() {
        let plugin = WordlePlugin::new();
        let mut seen = Vec::new();
        for score in (1..=6).map(Score::Numeric).chain([Score::Failed]) {
            let symbol = plugin.score_to_symbol(&score);
            assert!(!seen.contains(&symbol.color));
            seen.push(symbol.color);
        }
        assert_eq!(plugin.score_to_symbol(&Score::Failed).code, 'X');
        assert_eq!(
            plugin.score_to_symbol(&Score::Custom("?".into())).color,
            Color::White
        );
    }

    #[test]
    fn failures_count_as_seven_when_averaged() {
        assert_eq!(WordlePlugin::new().failure_penalty(), Some(7));
    }
}
