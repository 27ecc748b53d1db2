pub mod models;
pub mod service;

pub use models::IngestReport;
pub use service::{Scoreboard, ScoreboardBuilder};
