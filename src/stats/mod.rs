mod averages;
mod engine;
pub mod format;
pub mod models;
mod streaks;

pub use averages::{average_of, AveragePolicy};
pub use engine::StatsEngine;
pub use models::{Average, LeaderboardRow, LeaderboardTotals};
pub use streaks::{StreakAnchor, Streaks};

/// Trailing windows reported next to the lifetime average, in days.
pub mod windows {
    pub const MONTH: u32 = 30;
    pub const WEEK: u32 = 7;
}
