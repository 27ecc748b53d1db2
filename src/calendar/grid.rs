use chrono::{Datelike, Days, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MAX_MONTHS;
use crate::dates::{days_in_month, months_back};
use crate::games::{Game, GamePlugin, Score, Symbol};
use crate::store::ResultSnapshot;

/// One square of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Leading or trailing day of the first/last week that belongs to another month.
    Padding,
    Future(NaiveDate),
    Missed(NaiveDate),
    Played {
        date: NaiveDate,
        score: Score,
        symbol: Symbol,
    },
}

impl Cell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Padding => None,
            Cell::Future(date) | Cell::Missed(date) => Some(*date),
            Cell::Played { date, .. } => Some(*date),
        }
    }
}

/// A calendar month laid out in Monday-first weeks of seven cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    pub first_day: NaiveDate,
    pub weeks: Vec<[Cell; 7]>,
}

impl MonthGrid {
    /// e.g. `October 2026`.
    pub fn title(&self) -> String {
        let name = u8::try_from(self.first_day.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("", |m| m.name());
        format!("{} {}", name, self.first_day.year())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.weeks.iter().flatten()
    }

    pub fn played(&self) -> usize {
        self.cells()
            .filter(|c| matches!(c, Cell::Played { .. }))
            .count()
    }

    pub fn missed(&self) -> usize {
        self.cells().filter(|c| matches!(c, Cell::Missed(_))).count()
    }

    /// In-month days on or before the as-of day.
    pub fn elapsed(&self) -> usize {
        self.played() + self.missed()
    }

    pub fn summary(&self) -> String {
        format!(
            "Played: {}/{} — Missed: {}",
            self.played(),
            self.elapsed(),
            self.missed()
        )
    }
}

/// Builds month grids for one user from a result snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarRenderer;

impl CalendarRenderer {
    pub fn new() -> Self {
        Self
    }

    /// The `month_count` months ending with the as-of month, oldest first.
    /// `month_count` is clamped to 1..=12.
    pub fn render(
        &self,
        snapshot: &ResultSnapshot,
        game: &Game,
        user_id: &str,
        month_count: u8,
        as_of: NaiveDate,
    ) -> Vec<MonthGrid> {
        let count = month_count.clamp(1, MAX_MONTHS);
        debug!(user_id, game = %game.id(), months = count, as_of = %as_of, "Rendering calendar");

        (0..u32::from(count))
            .rev()
            .map(|back| self.render_month(snapshot, game, user_id, months_back(as_of, back), as_of))
            .collect()
    }

    pub fn render_month(
        &self,
        snapshot: &ResultSnapshot,
        game: &Game,
        user_id: &str,
        first_day: NaiveDate,
        as_of: NaiveDate,
    ) -> MonthGrid {
        let lead = first_day.weekday().num_days_from_monday() as usize;
        let length = days_in_month(first_day) as usize;
        let slots = (lead + length).div_ceil(7) * 7;

        let cells: Vec<Cell> = (0..slots)
            .map(|slot| {
                if slot < lead || slot >= lead + length {
                    return Cell::Padding;
                }
                let Some(date) = first_day.checked_add_days(Days::new((slot - lead) as u64)) else {
                    return Cell::Padding;
                };
                if date > as_of {
                    return Cell::Future(date);
                }
                match snapshot.result_on(user_id, date) {
                    Some(result) => Cell::Played {
                        date,
                        score: result.score.clone(),
                        symbol: game.score_to_symbol(&result.score),
                    },
                    None => Cell::Missed(date),
                }
            })
            .collect();

        let weeks = cells
            .chunks(7)
            .filter_map(|week| <[Cell; 7]>::try_from(week.to_vec()).ok())
            .collect();

        MonthGrid { first_day, weeks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Color, GameId, WordlePlugin};
    use crate::ingest::GameResult;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn result(d: NaiveDate, score: Score) -> GameResult {
        GameResult {
            user_id: "alice".into(),
            game_id: GameId::Wordle,
            date: d,
            score,
            source_text: String::new(),
            reported_by: "alice".into(),
            puzzle_number: None,
            reported_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn wordle() -> Game {
        Game::from(WordlePlugin::new())
    }

    #[test]
    fn days_up_to_as_of_are_missed_and_later_days_are_future() {
        let snapshot = ResultSnapshot::new(GameId::Wordle, Vec::new());
        let as_of = date(2024, 5, 10);

        let grids = CalendarRenderer::new().render(&snapshot, &wordle(), "alice", 1, as_of);
        assert_eq!(grids.len(), 1);

        for cell in grids[0].cells() {
            match cell {
                Cell::Padding => {}
                Cell::Missed(d) => assert!(d.day() <= 10),
                Cell::Future(d) => assert!(d.day() >= 11),
                Cell::Played { .. } => panic!("no results were stored"),
            }
        }
        assert_eq!(grids[0].missed(), 10);
        assert_eq!(grids[0].summary(), "Played: 0/10 — Missed: 10");
    }

    #[test]
    fn weeks_are_monday_first() {
        // May 2024 starts on a Wednesday and ends on a Friday.
        let snapshot = ResultSnapshot::new(GameId::Wordle, Vec::new());
        let grid = CalendarRenderer::new().render_month(
            &snapshot,
            &wordle(),
            "alice",
            date(2024, 5, 1),
            date(2024, 5, 31),
        );

        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0], Cell::Padding);
        assert_eq!(grid.weeks[0][1], Cell::Padding);
        assert_eq!(grid.weeks[0][2].date(), Some(date(2024, 5, 1)));
        assert_eq!(grid.weeks[4][4].date(), Some(date(2024, 5, 31)));
        assert_eq!(grid.weeks[4][5], Cell::Padding);
        assert_eq!(grid.title(), "May 2024");
    }

    #[test]
    fn played_days_carry_the_game_symbol() {
        let snapshot = ResultSnapshot::new(
            GameId::Wordle,
            vec![
                result(date(2024, 5, 2), Score::Numeric(2)),
                result(date(2024, 5, 3), Score::Failed),
            ],
        );
        let grid = CalendarRenderer::new().render_month(
            &snapshot,
            &wordle(),
            "alice",
            date(2024, 5, 1),
            date(2024, 5, 3),
        );

        let played: Vec<&Cell> = grid
            .cells()
            .filter(|c| matches!(c, Cell::Played { .. }))
            .collect();
        assert_eq!(played.len(), 2);
        assert!(matches!(
            played[1],
            Cell::Played { symbol: Symbol { color: Color::Purple, code: 'X' }, .. }
        ));
        assert_eq!(grid.summary(), "Played: 2/3 — Missed: 1");
    }

    #[test]
    fn months_run_oldest_first_and_count_is_clamped() {
        let snapshot = ResultSnapshot::new(GameId::Wordle, Vec::new());
        let renderer = CalendarRenderer::new();
        let as_of = date(2024, 2, 14);

        let grids = renderer.render(&snapshot, &wordle(), "alice", 3, as_of);
        let titles: Vec<String> = grids.iter().map(MonthGrid::title).collect();
        assert_eq!(titles, vec!["December 2023", "January 2024", "February 2024"]);

        assert_eq!(renderer.render(&snapshot, &wordle(), "alice", 0, as_of).len(), 1);
        assert_eq!(renderer.render(&snapshot, &wordle(), "alice", 40, as_of).len(), 12);
    }

    #[test]
    fn past_months_have_no_future_days() {
        let snapshot = ResultSnapshot::new(GameId::Wordle, Vec::new());
        let grids = CalendarRenderer::new().render(&snapshot, &wordle(), "alice", 2, date(2024, 3, 1));

        assert_eq!(grids[0].missed(), 29);
        assert!(!grids[0].cells().any(|c| matches!(c, Cell::Future(_))));
    }
}
