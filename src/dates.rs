use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// The day boundary shared by every component.
///
/// Message timestamps arrive in UTC; a result's calendar day is the timestamp's
/// date at this fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}

impl DayBoundary {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Returns `None` when the offset is outside ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn local_date(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.offset).date_naive()
    }
}

/// Maps a daily puzzle index to the calendar day it was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleCalendar {
    pub epoch: NaiveDate,
    pub base_number: u32,
}

impl PuzzleCalendar {
    pub const fn new(epoch: NaiveDate, base_number: u32) -> Self {
        Self { epoch, base_number }
    }

    pub fn date_for(&self, number: u32) -> Option<NaiveDate> {
        let offset = number.checked_sub(self.base_number)?;
        self.epoch.checked_add_days(Days::new(u64::from(offset)))
    }

    /// Days before the epoch clamp to the base number.
    pub fn number_for(&self, date: NaiveDate) -> u32 {
        let delta = (date - self.epoch).num_days().max(0);
        self.base_number
            .saturating_add(u32::try_from(delta).unwrap_or(u32::MAX))
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `back` months before the month containing `date`.
pub fn months_back(date: NaiveDate, back: u32) -> NaiveDate {
    let first = first_of_month(date);
    first.checked_sub_months(Months::new(back)).unwrap_or(first)
}

pub fn days_in_month(first: NaiveDate) -> u32 {
    first
        .checked_add_months(Months::new(1))
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31)
}

/// How far a puzzle's day may run ahead of the day a message was posted.
/// Puzzle days roll over from UTC+14 to UTC-12, so a player east of the
/// configured boundary can already be on the next puzzle.
pub const PUZZLE_LEAD_DAYS: u64 = 1;

/// Latest puzzle day a message posted on `message_date` may carry.
pub fn latest_puzzle_day(message_date: NaiveDate) -> NaiveDate {
    message_date
        .checked_add_days(Days::new(PUZZLE_LEAD_DAYS))
        .unwrap_or(message_date)
}

/// Inclusive range of `days` calendar days ending at `end`.
pub fn trailing_window(end: NaiveDate, days: u32) -> (NaiveDate, NaiveDate) {
    let start = end
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN);
    (start, end)
}
