use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Which day the current streak has to reach.
///
/// A streak counts consecutive days with any result, failures included.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StreakAnchor {
    /// The run must include the as-of day itself.
    #[default]
    AsOfDate,
    /// Not having played yet on the as-of day keeps a run ending the day before.
    AsOfDateWithGrace,
    /// The run ending at the latest result on or before the as-of day.
    LatestResult,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub current: u32,
    pub longest: u32,
}

impl Streaks {
    /// `days` must be sorted ascending without duplicates; days after
    /// `as_of` are ignored.
    pub fn from_days(days: &[NaiveDate], as_of: NaiveDate, anchor: StreakAnchor) -> Self {
        let days = &days[..days.partition_point(|d| *d <= as_of)];
        let Some(&latest) = days.last() else {
            return Self::default();
        };

        let mut longest = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;
        for &day in days {
            run = match previous {
                Some(prev) if prev.succ_opt() == Some(day) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
            previous = Some(day);
        }
        // `run` is now the length of the run ending at `latest`.

        let reaches = |target: Option<NaiveDate>| if target == Some(latest) { run } else { 0 };
        let yesterday = as_of.checked_sub_days(Days::new(1));
        let current = match anchor {
            StreakAnchor::AsOfDate => reaches(Some(as_of)),
            StreakAnchor::AsOfDateWithGrace if latest == as_of => run,
            StreakAnchor::AsOfDateWithGrace => reaches(yesterday),
            StreakAnchor::LatestResult => run,
        };

        Self { current, longest }
    }
}
