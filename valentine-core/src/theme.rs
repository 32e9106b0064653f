//! Page palette by time of day.
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeTheme {
    Morning,
    Afternoon,
    Evening,
    /// 22:00 through 05:59.
    Night,
}

impl TimeTheme {
    #[must_use]
    pub const fn for_hour(hour: u32) -> Self {
        match hour {
            22.. | 0..6 => Self::Night,
            18.. => Self::Evening,
            12.. => Self::Afternoon,
            _ => Self::Morning,
        }
    }

    #[must_use]
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::for_hour(now.with_timezone(&offset).hour())
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for TimeTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
