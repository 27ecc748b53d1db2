use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::SymbolSet;
use crate::dates::DayBoundary;
use crate::games::GameId;
use crate::stats::StreakAnchor;

pub const MAX_MONTHS: u8 = 12;

pub const ENV_MONTH_COUNT: &str = "SCORECARD_MONTH_COUNT";
pub const ENV_SYMBOL_SET: &str = "SCORECARD_SYMBOL_SET";
pub const ENV_NUMERIC_ONLY_AVERAGES: &str = "SCORECARD_NUMERIC_ONLY_AVERAGES";
pub const ENV_STREAK_ANCHOR: &str = "SCORECARD_STREAK_ANCHOR";
pub const ENV_UTC_OFFSET_MINUTES: &str = "SCORECARD_UTC_OFFSET_MINUTES";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("month count must be between 1 and 12, got {0}")]
    MonthCount(u8),

    #[error("UTC offset of {0} minutes is outside a day")]
    UtcOffset(i32),

    #[error("at least one game must be registered")]
    EmptyRegistry,

    #[error("game {0} is registered twice")]
    DuplicateGame(GameId),

    #[error("invalid value '{value}' for {name}")]
    InvalidVar { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    pub month_count: u8,
    pub symbol_set: SymbolSet,
    pub numeric_only_averages: bool,
    pub streak_anchor: StreakAnchor,
    pub utc_offset_minutes: i32,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            month_count: 4,
            symbol_set: SymbolSet::Ascii,
            numeric_only_averages: true,
            streak_anchor: StreakAnchor::AsOfDate,
            utc_offset_minutes: 0,
        }
    }
}

impl ScoreboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_MONTHS).contains(&self.month_count) {
            return Err(ConfigError::MonthCount(self.month_count));
        }
        self.day_boundary()?;
        Ok(())
    }

    pub fn day_boundary(&self) -> Result<DayBoundary, ConfigError> {
        DayBoundary::from_offset_minutes(self.utc_offset_minutes)
            .ok_or(ConfigError::UtcOffset(self.utc_offset_minutes))
    }

    /// Defaults overridden by `SCORECARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MONTH_COUNT) {
            config.month_count = parse_var(ENV_MONTH_COUNT, &value)?;
        }
        if let Some(value) = lookup(ENV_SYMBOL_SET) {
            config.symbol_set = parse_var(ENV_SYMBOL_SET, &value)?;
        }
        if let Some(value) = lookup(ENV_NUMERIC_ONLY_AVERAGES) {
            config.numeric_only_averages = parse_bool(ENV_NUMERIC_ONLY_AVERAGES, &value)?;
        }
        if let Some(value) = lookup(ENV_STREAK_ANCHOR) {
            config.streak_anchor = parse_var(ENV_STREAK_ANCHOR, &value)?;
        }
        if let Some(value) = lookup(ENV_UTC_OFFSET_MINUTES) {
            config.utc_offset_minutes = parse_var(ENV_UTC_OFFSET_MINUTES, &value)?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidVar {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = ScoreboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.month_count, 4);
        assert_eq!(config.symbol_set, SymbolSet::Ascii);
        assert!(config.numeric_only_averages);
    }

    #[test]
    fn reads_overrides_from_environment() {
        let config = ScoreboardConfig::from_lookup(lookup(&[
            (ENV_MONTH_COUNT, "12"),
            (ENV_SYMBOL_SET, "Emoji"),
            (ENV_NUMERIC_ONLY_AVERAGES, "off"),
            (ENV_STREAK_ANCHOR, "latest_result"),
            (ENV_UTC_OFFSET_MINUTES, "-300"),
        ]))
        .unwrap();

        assert_eq!(config.month_count, 12);
        assert_eq!(config.symbol_set, SymbolSet::Emoji);
        assert!(!config.numeric_only_averages);
        assert_eq!(config.streak_anchor, StreakAnchor::LatestResult);
        assert_eq!(config.utc_offset_minutes, -300);
    }

    #[rstest]
    #[case(ENV_MONTH_COUNT, "0", ConfigError::MonthCount(0))]
    #[case(ENV_MONTH_COUNT, "13", ConfigError::MonthCount(13))]
    #[case(ENV_UTC_OFFSET_MINUTES, "1440", ConfigError::UtcOffset(1440))]
    #[case(
        ENV_SYMBOL_SET,
        "braille",
        ConfigError::InvalidVar { name: ENV_SYMBOL_SET, value: "braille".into() }
    )]
    #[case(
        ENV_NUMERIC_ONLY_AVERAGES,
        "maybe",
        ConfigError::InvalidVar { name: ENV_NUMERIC_ONLY_AVERAGES, value: "maybe".into() }
    )]
    fn rejects_bad_values(
        #[case] name: &'static str,
        #[case] value: &str,
        #[case] expected: ConfigError,
    ) {
        let err = ScoreboardConfig::from_lookup(lookup(&[(name, value)])).unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let config: ScoreboardConfig =
            serde_json::from_str(r#"{"month_count": 2, "symbol_set": "emoji"}"#).unwrap();
        assert_eq!(config.month_count, 2);
        assert_eq!(config.symbol_set, SymbolSet::Emoji);
        assert_eq!(config.streak_anchor, StreakAnchor::AsOfDate);
    }
}
