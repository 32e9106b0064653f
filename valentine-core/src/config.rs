//! Gift configuration: timezone, unlock policy knobs and keepsake dates.
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes east of UTC used to decide when a day opens (+05:30).
pub const IST_OFFSET_MINUTES: i32 = 330;

/// SHA-256 of the default passphrase.
pub const DEFAULT_PASSPHRASE_SHA256: &str =
    "4c8feec6c11bf23d8140d72ac359867fc05627151676eb6929a6afb353b7e41e";

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// How the calendar gate behaves when "now" is not in the days' month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffSeasonPolicy {
    /// Compare day-of-month only, ignoring the month mismatch.
    #[default]
    DayOfMonth,
    /// Keep every calendar-gated day closed.
    Locked,
    /// Treat every day as open.
    Open,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("UTC offset of {0} minutes is outside ±24h")]
    InvalidOffset(i32),
    #[error("heart click threshold must be at least 1")]
    InvalidHeartThreshold,
    #[error("passphrase digest must be 64 hex characters")]
    InvalidDigest,
}

/// Everything about the gift that is not compiled into the day catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftConfig {
    pub utc_offset_minutes: i32,
    /// Opens every day outside the unlock month.
    pub dev_mode: bool,
    pub off_season: OffSeasonPolicy,
    /// When set, days open on full dates in this year instead of by day-of-month.
    pub season_year: Option<i32>,
    pub meeting_date: NaiveDate,
    pub relationship_start: NaiveDate,
    pub passphrase_sha256: String,
    pub heart_clicks_for_memory_lane: u32,
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: IST_OFFSET_MINUTES,
            dev_mode: false,
            off_season: OffSeasonPolicy::DayOfMonth,
            season_year: None,
            meeting_date: NaiveDate::from_ymd_opt(2026, 3, 15).unwrap_or_default(),
            relationship_start: NaiveDate::from_ymd_opt(2019, 8, 27).unwrap_or_default(),
            passphrase_sha256: DEFAULT_PASSPHRASE_SHA256.to_string(),
            heart_clicks_for_memory_lane: 5,
        }
    }
}

impl GiftConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(ConfigError::InvalidOffset(self.utc_offset_minutes));
        }
        if self.heart_clicks_for_memory_lane == 0 {
            return Err(ConfigError::InvalidHeartThreshold);
        }
        let digest = &self.passphrase_sha256;
        if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidDigest);
        }
        Ok(())
    }

    /// The fixed offset all date math is done in.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix())
    }

    #[must_use]
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    #[must_use]
    pub fn with_season_year(mut self, year: Option<i32>) -> Self {
        self.season_year = year;
        self
    }
}
